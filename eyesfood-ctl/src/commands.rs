use anyhow::{anyhow, bail, Context};
use eyesfood_client::{
    api::{
        ArticleForm, ArticleId, ArticlesQuery, CommentId, CommentPatch, ExpertId, ExpertPatch,
        FoodAdviceId, FoodAdvicePatch, FoodAdviceQuery, FoodId, NewArticle, NewComment,
        NewFoodAdvice, UserId,
    },
    DbDump,
};

use crate::{api, screens, AdviceCmd, ArticlesCmd, CommentCmd, LoginInfo, ProfileCmd};

fn logged_in_user(login: &LoginInfo) -> anyhow::Result<&UserId> {
    login
        .viewer
        .user_id()
        .ok_or_else(|| anyhow!("this command needs --user-id"))
}

fn logged_in_expert(login: &LoginInfo) -> anyhow::Result<&ExpertId> {
    login
        .viewer
        .expert_id
        .as_ref()
        .ok_or_else(|| anyhow!("only experts can do this, pass --expert-id"))
}

pub async fn list_experts(login: &LoginInfo, search: &str) -> anyhow::Result<()> {
    let db = api::fetch_expert_board(login).await?;
    let experts = db.search_experts(search);
    if experts.is_empty() {
        println!("No experts found");
    }
    for e in experts {
        println!("{}\n", screens::expert_card(e, &db.stat_for(&e.user_id)));
    }
    Ok(())
}

pub async fn show_expert(login: &LoginInfo, user_id: &UserId) -> anyhow::Result<()> {
    let db = api::fetch_expert_board(login).await?;
    let expert = db
        .expert_by_user_id(user_id)
        .ok_or_else(|| anyhow!("no expert profile for user {user_id}"))?;
    println!(
        "{}",
        screens::expert_detail(expert, &db.stat_for(user_id), &db.comments_for(expert))
    );
    Ok(())
}

fn print_stat(db: &DbDump, expert: &UserId) {
    println!("Now: {}", screens::stat_line(&db.stat_for(expert)));
}

pub async fn comment(login: &LoginInfo, cmd: CommentCmd) -> anyhow::Result<()> {
    let mut db = api::fetch_expert_board(login).await?;
    match cmd {
        CommentCmd::Add {
            expert,
            content,
            recommendation,
        } => {
            let user_id = logged_in_user(login)?.clone();
            let expert = db
                .expert_by_user_id(&UserId(expert.clone()))
                .ok_or_else(|| anyhow!("no expert profile for user {expert}"))?;
            if !db.viewer.can_comment_on(expert) {
                bail!("experts cannot comment on their own profile");
            }
            let expert_id = expert.user_id.clone();
            let new = NewComment {
                content,
                is_recommended: recommendation,
                user_id,
                expert_id: expert_id.clone(),
            };
            new.validate()?;
            let c = api::create_comment(login, &new).await?;
            println!("{}", screens::comment_line(&c));
            db.push_comment(c);
            print_stat(&db, &expert_id);
        }
        CommentCmd::Edit {
            id,
            content,
            recommendation,
        } => {
            let id = CommentId(id);
            let c = db
                .comment(&id)
                .ok_or_else(|| anyhow!("no comment with id {id}"))?;
            if !db.viewer.can_edit_comment(c) {
                bail!("you can only edit your own comments");
            }
            let mut patch = CommentPatch::from_comment(c);
            if let Some(content) = content {
                patch.content = content;
            }
            if let Some(r) = recommendation {
                patch.is_recommended = r;
            }
            patch.validate()?;
            let c = api::update_comment(login, &id, &patch).await?;
            println!("{}", screens::comment_line(&c));
            let expert = c.expert_id.clone();
            db.replace_comment(c);
            if let Some(expert) = expert {
                print_stat(&db, &expert);
            }
        }
        CommentCmd::Delete { id } => {
            let id = CommentId(id);
            let c = db
                .comment(&id)
                .ok_or_else(|| anyhow!("no comment with id {id}"))?;
            if !db.viewer.can_edit_comment(c) {
                bail!("you can only delete your own comments");
            }
            let expert = c.expert_id.clone();
            api::delete_comment(login, &id).await?;
            db.remove_comment(&id);
            println!("Deleted comment {id}");
            if let Some(expert) = expert {
                print_stat(&db, &expert);
            }
        }
    }
    Ok(())
}

async fn fetch_articles(login: &LoginInfo) -> anyhow::Result<DbDump> {
    let mut db = DbDump::new(login.viewer.clone());
    db.add_articles(api::fetch_articles(login, ArticlesQuery { we: true }).await?);
    Ok(db)
}

pub async fn articles(login: &LoginInfo, cmd: ArticlesCmd) -> anyhow::Result<()> {
    match cmd {
        ArticlesCmd::List { mine } => {
            let db = fetch_articles(login).await?;
            for a in db
                .articles
                .iter()
                .filter(|a| !mine || db.viewer.can_edit_article(a))
            {
                println!("{}\n", screens::article_line(a));
            }
        }
        ArticlesCmd::Create {
            title,
            description,
            link,
        } => {
            let new = NewArticle {
                form: ArticleForm {
                    title,
                    description,
                    link,
                },
                expert_id: logged_in_expert(login)?.clone(),
            };
            new.validate()?;
            let a = api::create_article(login, &new).await?;
            println!("{}", screens::article_line(&a));
        }
        ArticlesCmd::Edit {
            id,
            title,
            description,
            link,
        } => {
            logged_in_expert(login)?;
            let mut db = fetch_articles(login).await?;
            let id = ArticleId(id);
            let a = db
                .article(&id)
                .ok_or_else(|| anyhow!("no article with id {id}"))?;
            if !db.viewer.can_edit_article(a) {
                bail!("you can only edit your own articles");
            }
            let mut form = ArticleForm::from_article(a);
            form.title = title.unwrap_or(form.title);
            form.description = description.unwrap_or(form.description);
            form.link = link.unwrap_or(form.link);
            form.validate()?;
            let a = api::update_article(login, &id, &form).await?;
            println!("{}", screens::article_line(&a));
            db.replace_article(a);
        }
        ArticlesCmd::Delete { id } => {
            logged_in_expert(login)?;
            let mut db = fetch_articles(login).await?;
            let id = ArticleId(id);
            let a = db
                .article(&id)
                .ok_or_else(|| anyhow!("no article with id {id}"))?;
            if !db.viewer.can_edit_article(a) {
                bail!("you can only delete your own articles");
            }
            api::delete_article(login, &id).await?;
            db.remove_article(&id);
            println!("Deleted article {id}");
        }
    }
    Ok(())
}

async fn fetch_advice(login: &LoginInfo, food: Option<FoodId>) -> anyhow::Result<DbDump> {
    let mut db = DbDump::new(login.viewer.clone());
    let q = FoodAdviceQuery { we: true, f: food };
    db.add_food_advice(api::fetch_food_advice(login, &q).await?);
    Ok(db)
}

pub async fn advice(login: &LoginInfo, cmd: AdviceCmd) -> anyhow::Result<()> {
    match cmd {
        AdviceCmd::List { food } => {
            let db = fetch_advice(login, Some(FoodId(food.clone()))).await?;
            if db.food_advice.is_empty() {
                println!("No advice about {food} yet");
            }
            for a in db.food_advice.iter() {
                println!("{}\n", screens::food_advice_line(a));
            }
        }
        AdviceCmd::Create {
            food,
            content,
            advice_type,
        } => {
            let new = NewFoodAdvice {
                expert_id: logged_in_expert(login)?.clone(),
                food_local_id: FoodId(food),
                content,
                advice_type,
            };
            new.validate()?;
            let a = api::create_food_advice(login, &new).await?;
            println!("{}", screens::food_advice_line(&a));
        }
        AdviceCmd::Edit {
            id,
            content,
            advice_type,
        } => {
            logged_in_expert(login)?;
            let mut db = fetch_advice(login, None).await?;
            let id = FoodAdviceId(id);
            let a = db
                .food_advice(&id)
                .ok_or_else(|| anyhow!("no food advice with id {id}"))?;
            if !db.viewer.can_edit_food_advice(a) {
                bail!("you can only edit your own advice");
            }
            let patch = FoodAdvicePatch {
                content: content.unwrap_or_else(|| a.content.clone()),
                advice_type: advice_type.unwrap_or(a.advice_type),
            };
            patch.validate()?;
            let a = api::update_food_advice(login, &id, &patch).await?;
            println!("{}", screens::food_advice_line(&a));
            db.replace_food_advice(a);
        }
        AdviceCmd::Delete { id } => {
            logged_in_expert(login)?;
            let mut db = fetch_advice(login, None).await?;
            let id = FoodAdviceId(id);
            let a = db
                .food_advice(&id)
                .ok_or_else(|| anyhow!("no food advice with id {id}"))?;
            if !db.viewer.can_edit_food_advice(a) {
                bail!("you can only delete your own advice");
            }
            api::delete_food_advice(login, &id).await?;
            db.remove_food_advice(&id);
            println!("Deleted food advice {id}");
        }
    }
    Ok(())
}

/// Profile of `user_id` with its live stats and the comments about it
async fn profile_screen(login: &LoginInfo, user_id: &UserId) -> anyhow::Result<String> {
    let db = api::fetch_expert_board(login).await?;
    let e = match db.expert_by_user_id(user_id) {
        Some(e) => e.clone(),
        None => api::fetch_expert_by_user(login, user_id).await?,
    };
    Ok(screens::expert_detail(
        &e,
        &db.stat_for(user_id),
        &db.comments_for(&e),
    ))
}

async fn run_profile(login: &LoginInfo, cmd: ProfileCmd) -> anyhow::Result<String> {
    match cmd {
        ProfileCmd::Show { user_id } => profile_screen(login, &UserId(user_id)).await,
        ProfileCmd::Update {
            address,
            description,
            phone,
            web_page,
            specialty,
            coach,
            nutritionist,
        } => {
            let user_id = logged_in_user(login)?;
            let expert_id = logged_in_expert(login)?;
            let e = api::fetch_expert_by_user(login, user_id)
                .await
                .context("fetching your expert profile")?;
            if e.id != *expert_id {
                bail!("expert profile {expert_id} does not belong to user {user_id}");
            }
            let mut patch = ExpertPatch::from_expert(&e);
            patch.address = address.unwrap_or(patch.address);
            patch.description = description.unwrap_or(patch.description);
            patch.phone = phone.unwrap_or(patch.phone);
            patch.web_page = web_page.unwrap_or(patch.web_page);
            patch.specialty = specialty.unwrap_or(patch.specialty);
            patch.is_coach = coach.unwrap_or(patch.is_coach);
            patch.is_nutritionist = nutritionist.unwrap_or(patch.is_nutritionist);
            patch.validate()?;
            api::update_expert(login, expert_id, &patch).await?;
            profile_screen(login, user_id).await
        }
    }
}

pub async fn profile(login: &LoginInfo, cmd: ProfileCmd) -> anyhow::Result<()> {
    println!("{}", run_profile(login, cmd).await?);
    Ok(())
}
