use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use anyhow::Context;
use axum::{
    routing::{get, patch},
    Router,
};
use chrono::Utc;
use eyesfood_api::{
    Article, ArticleForm, ArticleId, ArticlesQuery, AuthToken, Comment, CommentId, CommentPatch,
    CommentsQuery, Error, Expert, ExpertId, ExpertPatch, FoodAdvice, FoodAdviceId,
    FoodAdvicePatch, FoodAdviceQuery, NewArticle, NewComment, NewFoodAdvice, User, UserId,
};
use tokio::sync::Mutex;

mod error;
mod extractors;
mod handlers;

pub type SharedServer = Arc<Mutex<MockServer>>;

/// In-memory stand-in for the remote API, enforcing the same ownership rules
#[derive(Debug, Default)]
pub struct MockServer {
    sessions: HashMap<AuthToken, UserId>,
    users: BTreeMap<UserId, User>,
    experts: Vec<Expert>,
    comments: Vec<Comment>,
    articles: Vec<Article>,
    food_advice: Vec<FoodAdvice>,
}

fn fresh_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

impl MockServer {
    pub fn new() -> MockServer {
        MockServer::default()
    }

    /// Creates a user and logs them in, returning their id and session token
    pub fn admin_create_user(&mut self, name: &str, email: &str) -> (UserId, AuthToken) {
        let id = UserId(fresh_id());
        let tok = AuthToken(fresh_id());
        self.users.insert(
            id.clone(),
            User::new(id.clone(), String::from(name), String::from(email)),
        );
        self.sessions.insert(tok.clone(), id.clone());
        (id, tok)
    }

    pub fn admin_create_expert(
        &mut self,
        user_id: &UserId,
        specialty: &str,
    ) -> Result<ExpertId, Error> {
        if !self.users.contains_key(user_id) {
            return Err(Error::NotFound(format!("user {user_id}")));
        }
        let id = ExpertId(fresh_id());
        self.experts.push(Expert {
            id: id.clone(),
            user_id: user_id.clone(),
            address: None,
            description: None,
            phone: None,
            web_page: None,
            specialty: Some(String::from(specialty)),
            is_coach: false,
            is_nutritionist: true,
            user: None,
        });
        Ok(id)
    }

    /// Number of comments currently stored, hidden ones included
    pub fn test_num_comments(&self) -> usize {
        self.comments.len()
    }

    fn resolve(&self, tok: &AuthToken) -> Result<UserId, Error> {
        self.sessions
            .get(tok)
            .cloned()
            .ok_or(Error::PermissionDenied)
    }

    /// The expert profile owned by `tok`'s user, if any
    fn resolve_expert(&self, tok: &AuthToken) -> Result<ExpertId, Error> {
        let user = self.resolve(tok)?;
        self.experts
            .iter()
            .find(|e| e.user_id == user)
            .map(|e| e.id.clone())
            .ok_or(Error::PermissionDenied)
    }

    fn with_user(&self, mut e: Expert) -> Expert {
        e.user = self.users.get(&e.user_id).cloned();
        e
    }

    pub fn fetch_experts(&self, tok: &AuthToken) -> Result<Vec<Expert>, Error> {
        self.resolve(tok)?;
        Ok(self
            .experts
            .iter()
            .map(|e| self.with_user(e.clone()))
            .collect())
    }

    pub fn fetch_expert_by_user(&self, tok: &AuthToken, user: &UserId) -> Result<Expert, Error> {
        self.resolve(tok)?;
        self.experts
            .iter()
            .find(|e| e.user_id == *user)
            .map(|e| self.with_user(e.clone()))
            .ok_or_else(|| Error::NotFound(format!("expert for user {user}")))
    }

    pub fn update_expert(
        &mut self,
        tok: &AuthToken,
        id: &ExpertId,
        patch: ExpertPatch,
    ) -> Result<Expert, Error> {
        patch.validate()?;
        let user = self.resolve(tok)?;
        let e = self
            .experts
            .iter_mut()
            .find(|e| e.id == *id)
            .ok_or_else(|| Error::NotFound(format!("expert {id}")))?;
        if e.user_id != user {
            return Err(Error::PermissionDenied);
        }
        e.apply(&patch);
        let e = e.clone();
        Ok(self.with_user(e))
    }

    pub fn fetch_comments(&self, tok: &AuthToken, q: CommentsQuery) -> Result<Vec<Comment>, Error> {
        self.resolve(tok)?;
        Ok(self
            .comments
            .iter()
            .map(|c| {
                let mut c = c.clone();
                if q.wu {
                    c.user = self.users.get(&c.user_id).cloned();
                }
                if q.we {
                    c.expert = c.expert_id.as_ref().and_then(|e| self.users.get(e)).cloned();
                }
                c
            })
            .collect())
    }

    pub fn create_comment(&mut self, tok: &AuthToken, c: NewComment) -> Result<Comment, Error> {
        c.validate()?;
        let user = self.resolve(tok)?;
        if c.user_id != user || c.expert_id == user {
            return Err(Error::PermissionDenied);
        }
        if !self.experts.iter().any(|e| e.user_id == c.expert_id) {
            return Err(Error::NotFound(format!("expert for user {}", c.expert_id)));
        }
        let comment = Comment {
            id: CommentId(fresh_id()),
            user_id: c.user_id,
            expert_id: Some(c.expert_id),
            content: Some(c.content),
            is_hidden: false,
            is_recommended: c.is_recommended,
            created_at: Some(Utc::now()),
            user: None,
            expert: None,
        };
        self.comments.push(comment.clone());
        Ok(comment)
    }

    fn own_comment_mut(&mut self, tok: &AuthToken, id: &CommentId) -> Result<&mut Comment, Error> {
        let user = self.resolve(tok)?;
        let c = self
            .comments
            .iter_mut()
            .find(|c| c.id == *id)
            .ok_or_else(|| Error::NotFound(format!("comment {id}")))?;
        if c.user_id != user {
            return Err(Error::PermissionDenied);
        }
        Ok(c)
    }

    pub fn update_comment(
        &mut self,
        tok: &AuthToken,
        id: &CommentId,
        patch: CommentPatch,
    ) -> Result<Comment, Error> {
        patch.validate()?;
        let c = self.own_comment_mut(tok, id)?;
        c.apply(&patch);
        Ok(c.clone())
    }

    pub fn delete_comment(&mut self, tok: &AuthToken, id: &CommentId) -> Result<(), Error> {
        self.own_comment_mut(tok, id)?;
        self.comments.retain(|c| c.id != *id);
        Ok(())
    }

    pub fn fetch_articles(&self, tok: &AuthToken, q: ArticlesQuery) -> Result<Vec<Article>, Error> {
        self.resolve(tok)?;
        Ok(self
            .articles
            .iter()
            .map(|a| {
                let mut a = a.clone();
                if q.we {
                    a.expert_profile = self
                        .experts
                        .iter()
                        .find(|e| Some(&e.id) == a.expert_id.as_ref())
                        .map(|e| Box::new(self.with_user(e.clone())));
                }
                a
            })
            .collect())
    }

    pub fn create_article(&mut self, tok: &AuthToken, a: NewArticle) -> Result<Article, Error> {
        a.validate()?;
        if self.resolve_expert(tok)? != a.expert_id {
            return Err(Error::PermissionDenied);
        }
        let now = Utc::now();
        let article = Article {
            id: ArticleId(fresh_id()),
            expert_id: Some(a.expert_id),
            title: Some(a.form.title),
            description: Some(a.form.description),
            link: Some(a.form.link),
            created_at: Some(now),
            updated_at: Some(now),
            expert_profile: None,
        };
        self.articles.push(article.clone());
        Ok(article)
    }

    fn own_article_mut(&mut self, tok: &AuthToken, id: &ArticleId) -> Result<&mut Article, Error> {
        let expert = self.resolve_expert(tok)?;
        let a = self
            .articles
            .iter_mut()
            .find(|a| a.id == *id)
            .ok_or_else(|| Error::NotFound(format!("article {id}")))?;
        if a.expert_id.as_ref() != Some(&expert) {
            return Err(Error::PermissionDenied);
        }
        Ok(a)
    }

    pub fn update_article(
        &mut self,
        tok: &AuthToken,
        id: &ArticleId,
        form: ArticleForm,
    ) -> Result<Article, Error> {
        form.validate()?;
        let a = self.own_article_mut(tok, id)?;
        a.apply(&form);
        a.updated_at = Some(Utc::now());
        Ok(a.clone())
    }

    pub fn delete_article(&mut self, tok: &AuthToken, id: &ArticleId) -> Result<(), Error> {
        self.own_article_mut(tok, id)?;
        self.articles.retain(|a| a.id != *id);
        Ok(())
    }

    pub fn fetch_food_advice(
        &self,
        tok: &AuthToken,
        q: FoodAdviceQuery,
    ) -> Result<Vec<FoodAdvice>, Error> {
        self.resolve(tok)?;
        Ok(self
            .food_advice
            .iter()
            .filter(|a| q.f.as_ref().map(|f| a.food_local_id == *f).unwrap_or(true))
            .map(|a| {
                let mut a = a.clone();
                if q.we {
                    a.expert_profile = self
                        .experts
                        .iter()
                        .find(|e| e.id == a.expert_id)
                        .map(|e| Box::new(self.with_user(e.clone())));
                }
                a
            })
            .collect())
    }

    pub fn create_food_advice(
        &mut self,
        tok: &AuthToken,
        a: NewFoodAdvice,
    ) -> Result<FoodAdvice, Error> {
        a.validate()?;
        if self.resolve_expert(tok)? != a.expert_id {
            return Err(Error::PermissionDenied);
        }
        let now = Utc::now();
        let advice = FoodAdvice {
            id: FoodAdviceId(fresh_id()),
            expert_id: a.expert_id,
            food_local_id: a.food_local_id,
            advice_type: a.advice_type,
            content: a.content,
            created_at: Some(now),
            updated_at: Some(now),
            expert_profile: None,
        };
        self.food_advice.push(advice.clone());
        Ok(advice)
    }

    fn own_food_advice_mut(
        &mut self,
        tok: &AuthToken,
        id: &FoodAdviceId,
    ) -> Result<&mut FoodAdvice, Error> {
        let expert = self.resolve_expert(tok)?;
        let a = self
            .food_advice
            .iter_mut()
            .find(|a| a.id == *id)
            .ok_or_else(|| Error::NotFound(format!("food advice {id}")))?;
        if a.expert_id != expert {
            return Err(Error::PermissionDenied);
        }
        Ok(a)
    }

    pub fn update_food_advice(
        &mut self,
        tok: &AuthToken,
        id: &FoodAdviceId,
        patch: FoodAdvicePatch,
    ) -> Result<FoodAdvice, Error> {
        patch.validate()?;
        let a = self.own_food_advice_mut(tok, id)?;
        a.apply(&patch);
        a.updated_at = Some(Utc::now());
        Ok(a.clone())
    }

    pub fn delete_food_advice(&mut self, tok: &AuthToken, id: &FoodAdviceId) -> Result<(), Error> {
        self.own_food_advice_mut(tok, id)?;
        self.food_advice.retain(|a| a.id != *id);
        Ok(())
    }
}

pub fn router(state: SharedServer) -> Router {
    Router::new()
        .route("/expert-profile", get(handlers::fetch_experts))
        .route("/experts/byUserId/:id", get(handlers::fetch_expert_by_user))
        .route("/experts/byId/:id", patch(handlers::update_expert))
        .route(
            "/comments-expert",
            get(handlers::fetch_comments).post(handlers::create_comment),
        )
        .route(
            "/comments-expert/:id",
            patch(handlers::update_comment).delete(handlers::delete_comment),
        )
        .route(
            "/articles",
            get(handlers::fetch_articles).post(handlers::create_article),
        )
        .route(
            "/articles/:id",
            patch(handlers::update_article).delete(handlers::delete_article),
        )
        .route(
            "/food-advice",
            get(handlers::fetch_food_advice).post(handlers::create_food_advice),
        )
        .route(
            "/food-advice/:id",
            patch(handlers::update_food_advice).delete(handlers::delete_food_advice),
        )
        .with_state(state)
}

/// Serves `server` on an ephemeral localhost port from the current tokio
/// runtime, returning the base url and a handle on the shared state
pub async fn spawn_on_localhost(server: MockServer) -> anyhow::Result<(String, SharedServer)> {
    let state = Arc::new(Mutex::new(server));
    let listener =
        std::net::TcpListener::bind("127.0.0.1:0").context("binding mock server socket")?;
    let addr = listener
        .local_addr()
        .context("retrieving mock server address")?;
    let app = router(state.clone());
    let server = axum::Server::from_tcp(listener)
        .context("starting mock server")?
        .serve(app.into_make_service());
    tokio::spawn(async move {
        if let Err(err) = server.await {
            tracing::error!(?err, "mock server stopped");
        }
    });
    tracing::info!(%addr, "mock server listening");
    Ok((format!("http://{addr}"), state))
}
