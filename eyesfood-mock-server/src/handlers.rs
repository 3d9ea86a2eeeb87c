use axum::{
    extract::{Path, Query, State},
    Json,
};
use eyesfood_api::{
    Article, ArticleForm, ArticleId, ArticlesQuery, Comment, CommentId, CommentPatch,
    CommentsQuery, Expert, ExpertId, ExpertPatch, FoodAdvice, FoodAdviceId, FoodAdvicePatch,
    FoodAdviceQuery, NewArticle, NewComment, NewFoodAdvice, UserId,
};

use crate::{error::Error, extractors::Auth, SharedServer};

pub async fn fetch_experts(
    Auth(tok): Auth,
    State(srv): State<SharedServer>,
) -> Result<Json<Vec<Expert>>, Error> {
    Ok(Json(srv.lock().await.fetch_experts(&tok)?))
}

pub async fn fetch_expert_by_user(
    Auth(tok): Auth,
    State(srv): State<SharedServer>,
    Path(user): Path<UserId>,
) -> Result<Json<Expert>, Error> {
    Ok(Json(srv.lock().await.fetch_expert_by_user(&tok, &user)?))
}

pub async fn update_expert(
    Auth(tok): Auth,
    State(srv): State<SharedServer>,
    Path(id): Path<ExpertId>,
    Json(patch): Json<ExpertPatch>,
) -> Result<Json<Expert>, Error> {
    Ok(Json(srv.lock().await.update_expert(&tok, &id, patch)?))
}

pub async fn fetch_comments(
    Auth(tok): Auth,
    State(srv): State<SharedServer>,
    Query(q): Query<CommentsQuery>,
) -> Result<Json<Vec<Comment>>, Error> {
    Ok(Json(srv.lock().await.fetch_comments(&tok, q)?))
}

pub async fn create_comment(
    Auth(tok): Auth,
    State(srv): State<SharedServer>,
    Json(c): Json<NewComment>,
) -> Result<Json<Comment>, Error> {
    let c = srv.lock().await.create_comment(&tok, c)?;
    tracing::debug!(comment_id = %c.id, "created comment");
    Ok(Json(c))
}

pub async fn update_comment(
    Auth(tok): Auth,
    State(srv): State<SharedServer>,
    Path(id): Path<CommentId>,
    Json(patch): Json<CommentPatch>,
) -> Result<Json<Comment>, Error> {
    Ok(Json(srv.lock().await.update_comment(&tok, &id, patch)?))
}

pub async fn delete_comment(
    Auth(tok): Auth,
    State(srv): State<SharedServer>,
    Path(id): Path<CommentId>,
) -> Result<(), Error> {
    Ok(srv.lock().await.delete_comment(&tok, &id)?)
}

pub async fn fetch_articles(
    Auth(tok): Auth,
    State(srv): State<SharedServer>,
    Query(q): Query<ArticlesQuery>,
) -> Result<Json<Vec<Article>>, Error> {
    Ok(Json(srv.lock().await.fetch_articles(&tok, q)?))
}

pub async fn create_article(
    Auth(tok): Auth,
    State(srv): State<SharedServer>,
    Json(a): Json<NewArticle>,
) -> Result<Json<Article>, Error> {
    Ok(Json(srv.lock().await.create_article(&tok, a)?))
}

pub async fn update_article(
    Auth(tok): Auth,
    State(srv): State<SharedServer>,
    Path(id): Path<ArticleId>,
    Json(form): Json<ArticleForm>,
) -> Result<Json<Article>, Error> {
    Ok(Json(srv.lock().await.update_article(&tok, &id, form)?))
}

pub async fn delete_article(
    Auth(tok): Auth,
    State(srv): State<SharedServer>,
    Path(id): Path<ArticleId>,
) -> Result<(), Error> {
    Ok(srv.lock().await.delete_article(&tok, &id)?)
}

pub async fn fetch_food_advice(
    Auth(tok): Auth,
    State(srv): State<SharedServer>,
    Query(q): Query<FoodAdviceQuery>,
) -> Result<Json<Vec<FoodAdvice>>, Error> {
    Ok(Json(srv.lock().await.fetch_food_advice(&tok, q)?))
}

pub async fn create_food_advice(
    Auth(tok): Auth,
    State(srv): State<SharedServer>,
    Json(a): Json<NewFoodAdvice>,
) -> Result<Json<FoodAdvice>, Error> {
    Ok(Json(srv.lock().await.create_food_advice(&tok, a)?))
}

pub async fn update_food_advice(
    Auth(tok): Auth,
    State(srv): State<SharedServer>,
    Path(id): Path<FoodAdviceId>,
    Json(patch): Json<FoodAdvicePatch>,
) -> Result<Json<FoodAdvice>, Error> {
    Ok(Json(srv.lock().await.update_food_advice(&tok, &id, patch)?))
}

pub async fn delete_food_advice(
    Auth(tok): Auth,
    State(srv): State<SharedServer>,
    Path(id): Path<FoodAdviceId>,
) -> Result<(), Error> {
    Ok(srv.lock().await.delete_food_advice(&tok, &id)?)
}
