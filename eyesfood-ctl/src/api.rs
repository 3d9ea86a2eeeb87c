use anyhow::{anyhow, Context};
use eyesfood_client::{
    api::{
        self, Article, ArticleForm, ArticleId, ArticlesQuery, Comment, CommentId, CommentPatch,
        CommentsQuery, Expert, ExpertId, ExpertPatch, FoodAdvice, FoodAdviceId, FoodAdvicePatch,
        FoodAdviceQuery, NewArticle, NewComment, NewFoodAdvice, UserId,
    },
    DbDump,
};
use reqwest::Method;
use serde::{de::DeserializeOwned, Serialize};

use crate::LoginInfo;

/// Turns non-success responses into the error the server described
async fn check(resp: reqwest::Response) -> anyhow::Result<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp
        .bytes()
        .await
        .with_context(|| format!("reading error body of {status} response"))?;
    match api::Error::parse(&body) {
        Ok(err) => Err(anyhow::Error::new(err).context(format!("server answered {status}"))),
        Err(_) => Err(anyhow!("server answered {status} with an unreadable body")),
    }
}

fn request(login: &LoginInfo, method: Method, path: &str) -> reqwest::RequestBuilder {
    crate::CLIENT
        .request(method, format!("{}/{}", login.host, path))
        .bearer_auth(login.token.as_str())
}

async fn fetch<R, Q>(login: &LoginInfo, path: &str, query: &Q) -> anyhow::Result<R>
where
    R: DeserializeOwned,
    Q: Serialize + ?Sized,
{
    let resp = request(login, Method::GET, path)
        .query(query)
        .send()
        .await
        .with_context(|| format!("fetching {path}"))?;
    check(resp)
        .await?
        .json()
        .await
        .with_context(|| format!("parsing {path}"))
}

async fn submit<B, R>(login: &LoginInfo, method: Method, path: &str, body: &B) -> anyhow::Result<R>
where
    B: Serialize + ?Sized,
    R: DeserializeOwned,
{
    let resp = request(login, method.clone(), path)
        .json(body)
        .send()
        .await
        .with_context(|| format!("sending {method} {path}"))?;
    let res = check(resp)
        .await?
        .json()
        .await
        .with_context(|| format!("parsing answer to {method} {path}"))?;
    tracing::info!(%method, path, "request succeeded");
    Ok(res)
}

async fn delete(login: &LoginInfo, path: &str) -> anyhow::Result<()> {
    let resp = request(login, Method::DELETE, path)
        .send()
        .await
        .with_context(|| format!("deleting {path}"))?;
    check(resp).await?;
    tracing::info!(path, "deleted");
    Ok(())
}

pub async fn fetch_experts(login: &LoginInfo) -> anyhow::Result<Vec<Expert>> {
    fetch(login, "expert-profile", &()).await
}

pub async fn fetch_expert_by_user(login: &LoginInfo, user: &UserId) -> anyhow::Result<Expert> {
    fetch(login, &format!("experts/byUserId/{user}"), &()).await
}

pub async fn update_expert(
    login: &LoginInfo,
    id: &ExpertId,
    patch: &ExpertPatch,
) -> anyhow::Result<Expert> {
    submit(login, Method::PATCH, &format!("experts/byId/{id}"), patch).await
}

pub async fn fetch_comments(login: &LoginInfo, q: CommentsQuery) -> anyhow::Result<Vec<Comment>> {
    fetch(login, "comments-expert", &q).await
}

pub async fn create_comment(login: &LoginInfo, c: &NewComment) -> anyhow::Result<Comment> {
    submit(login, Method::POST, "comments-expert", c).await
}

pub async fn update_comment(
    login: &LoginInfo,
    id: &CommentId,
    patch: &CommentPatch,
) -> anyhow::Result<Comment> {
    submit(login, Method::PATCH, &format!("comments-expert/{id}"), patch).await
}

pub async fn delete_comment(login: &LoginInfo, id: &CommentId) -> anyhow::Result<()> {
    delete(login, &format!("comments-expert/{id}")).await
}

pub async fn fetch_articles(login: &LoginInfo, q: ArticlesQuery) -> anyhow::Result<Vec<Article>> {
    fetch(login, "articles", &q).await
}

pub async fn create_article(login: &LoginInfo, a: &NewArticle) -> anyhow::Result<Article> {
    submit(login, Method::POST, "articles", a).await
}

pub async fn update_article(
    login: &LoginInfo,
    id: &ArticleId,
    form: &ArticleForm,
) -> anyhow::Result<Article> {
    submit(login, Method::PATCH, &format!("articles/{id}"), form).await
}

pub async fn delete_article(login: &LoginInfo, id: &ArticleId) -> anyhow::Result<()> {
    delete(login, &format!("articles/{id}")).await
}

pub async fn fetch_food_advice(
    login: &LoginInfo,
    q: &FoodAdviceQuery,
) -> anyhow::Result<Vec<FoodAdvice>> {
    fetch(login, "food-advice", q).await
}

pub async fn create_food_advice(
    login: &LoginInfo,
    a: &NewFoodAdvice,
) -> anyhow::Result<FoodAdvice> {
    submit(login, Method::POST, "food-advice", a).await
}

pub async fn update_food_advice(
    login: &LoginInfo,
    id: &FoodAdviceId,
    patch: &FoodAdvicePatch,
) -> anyhow::Result<FoodAdvice> {
    submit(login, Method::PATCH, &format!("food-advice/{id}"), patch).await
}

pub async fn delete_food_advice(login: &LoginInfo, id: &FoodAdviceId) -> anyhow::Result<()> {
    delete(login, &format!("food-advice/{id}")).await
}

/// Fetches experts and comments together and derives their stats
pub async fn fetch_expert_board(login: &LoginInfo) -> anyhow::Result<DbDump> {
    let (experts, comments) = futures::try_join!(
        fetch_experts(login),
        fetch_comments(login, CommentsQuery { wu: true, we: true }),
    )?;
    let mut db = DbDump::new(login.viewer.clone());
    db.add_experts(experts);
    db.add_comments(comments);
    tracing::info!(
        num_experts = db.experts.len(),
        num_comments = db.comments.len(),
        "fetched expert board"
    );
    Ok(db)
}

#[cfg(test)]
mod tests {
    use eyesfood_client::{
        api::{AdviceType, AuthToken, FoodId, Recommendation},
        Viewer,
    };
    use eyesfood_mock_server::{spawn_on_localhost, MockServer};

    use super::*;

    struct Setup {
        ana: LoginInfo,
        bob: LoginInfo,
        ana_id: UserId,
    }

    async fn setup() -> Setup {
        let mut srv = MockServer::new();
        let (ana_id, ana_tok) = srv.admin_create_user("Ana Pérez", "ana@example.org");
        let ana_expert = srv.admin_create_expert(&ana_id, "Sports").unwrap();
        let (bob_id, bob_tok) = srv.admin_create_user("Bob", "bob@example.org");
        let (host, _) = spawn_on_localhost(srv).await.unwrap();
        Setup {
            ana: LoginInfo {
                host: host.clone(),
                token: ana_tok,
                viewer: Viewer::new(Some(ana_id.clone()), Some(ana_expert)),
            },
            bob: LoginInfo {
                host,
                token: bob_tok,
                viewer: Viewer::new(Some(bob_id), None),
            },
            ana_id,
        }
    }

    fn comment_from(login: &LoginInfo, expert: &UserId, rec: Recommendation) -> NewComment {
        NewComment {
            content: String::from("Helped me a lot"),
            is_recommended: rec,
            user_id: login.viewer.user_id.clone().unwrap(),
            expert_id: expert.clone(),
        }
    }

    #[tokio::test]
    async fn stats_track_comment_mutations() {
        let s = setup().await;
        let mut db = fetch_expert_board(&s.bob).await.unwrap();
        assert_eq!(db.experts.len(), 1);
        assert_eq!(db.experts[0].name(), Some("Ana Pérez"));
        assert_eq!(db.stat_for(&s.ana_id).total_comments, 0);

        let c = create_comment(&s.bob, &comment_from(&s.bob, &s.ana_id, Recommendation::Recommended))
            .await
            .unwrap();
        db.push_comment(c.clone());
        let stat = db.stat_for(&s.ana_id);
        assert_eq!((stat.recommendation_count, stat.total_comments), (1, 1));
        assert!(stat.user_has_recommended);

        let patch = CommentPatch {
            content: String::from("Not so sure anymore"),
            is_recommended: Recommendation::Undecided,
        };
        db.replace_comment(update_comment(&s.bob, &c.id, &patch).await.unwrap());
        let stat = db.stat_for(&s.ana_id);
        assert_eq!((stat.recommendation_count, stat.total_comments), (0, 1));
        assert!(stat.user_has_commented && !stat.user_has_recommended);

        // the local state matches what a fresh fetch computes
        assert_eq!(db.stats, fetch_expert_board(&s.bob).await.unwrap().stats);

        delete_comment(&s.bob, &c.id).await.unwrap();
        db.remove_comment(&c.id);
        assert_eq!(db.stat_for(&s.ana_id), Default::default());
    }

    #[tokio::test]
    async fn server_errors_are_decoded() {
        let s = setup().await;
        let err = create_comment(&s.ana, &comment_from(&s.ana, &s.ana_id, Recommendation::Recommended))
            .await
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<api::Error>(),
            Some(&api::Error::PermissionDenied)
        );

        let anonymous = LoginInfo {
            token: AuthToken(String::from("bogus")),
            ..s.bob.clone()
        };
        let err = fetch_experts(&anonymous).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<api::Error>(),
            Some(&api::Error::PermissionDenied)
        );

        let err = fetch_expert_by_user(&s.bob, &UserId::from("nobody"))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<api::Error>(),
            Some(api::Error::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn articles_and_advice() {
        let s = setup().await;
        let ana_expert = s.ana.viewer.expert_id.clone().unwrap();
        let article = create_article(
            &s.ana,
            &NewArticle {
                form: ArticleForm {
                    title: String::from("Eat your greens"),
                    description: String::new(),
                    link: String::from("example.org/greens"),
                },
                expert_id: ana_expert.clone(),
            },
        )
        .await
        .unwrap();
        let listed = fetch_articles(&s.bob, ArticlesQuery { we: true }).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].link_url().as_deref(), Some("https://example.org/greens"));
        assert_eq!(
            listed[0].expert_profile.as_ref().and_then(|e| e.name()),
            Some("Ana Pérez")
        );
        assert!(delete_article(&s.bob, &article.id).await.is_err());
        delete_article(&s.ana, &article.id).await.unwrap();

        let food = FoodId::from("7802800533520");
        let advice = create_food_advice(
            &s.ana,
            &NewFoodAdvice {
                expert_id: ana_expert,
                food_local_id: food.clone(),
                content: String::from("High in sodium"),
                advice_type: AdviceType::Negative,
            },
        )
        .await
        .unwrap();
        let q = FoodAdviceQuery {
            we: false,
            f: Some(food),
        };
        assert_eq!(fetch_food_advice(&s.bob, &q).await.unwrap(), vec![advice.clone()]);
        let other_food = FoodAdviceQuery {
            we: false,
            f: Some(FoodId::from("other")),
        };
        assert!(fetch_food_advice(&s.bob, &other_food).await.unwrap().is_empty());

        let updated = update_food_advice(
            &s.ana,
            &advice.id,
            &FoodAdvicePatch {
                content: String::from("Fine in moderation"),
                advice_type: AdviceType::Warning,
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.advice_type, AdviceType::Warning);
    }
}
