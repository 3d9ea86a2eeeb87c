use std::{collections::HashMap, sync::Arc};

use crate::{
    api::{
        Article, ArticleId, Comment, CommentId, Expert, FoodAdvice, FoodAdviceId, UserId,
    },
    compute_stats, ExpertStat, Viewer,
};

/// Everything the client currently knows, as fetched from the server
///
/// Mutations are only applied after the server acknowledged them. Comment
/// stats are recomputed from the whole comment list after every change.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DbDump {
    pub viewer: Viewer,
    pub experts: Arc<Vec<Expert>>,
    pub comments: Arc<Vec<Comment>>,
    pub articles: Arc<Vec<Article>>,
    pub food_advice: Arc<Vec<FoodAdvice>>,
    pub stats: Arc<HashMap<UserId, ExpertStat>>,
}

impl DbDump {
    pub fn new(viewer: Viewer) -> DbDump {
        DbDump {
            viewer,
            experts: Arc::new(Vec::new()),
            comments: Arc::new(Vec::new()),
            articles: Arc::new(Vec::new()),
            food_advice: Arc::new(Vec::new()),
            stats: Arc::new(HashMap::new()),
        }
    }

    pub fn add_experts(&mut self, experts: Vec<Expert>) {
        Arc::make_mut(&mut self.experts).extend(experts);
    }

    pub fn add_comments(&mut self, comments: Vec<Comment>) {
        Arc::make_mut(&mut self.comments).extend(comments);
        self.refresh_stats();
    }

    pub fn refresh_stats(&mut self) {
        self.stats = Arc::new(compute_stats(
            self.comments.iter(),
            self.viewer.user_id(),
        ));
    }

    pub fn stat_for(&self, expert_user_id: &UserId) -> ExpertStat {
        self.stats.get(expert_user_id).copied().unwrap_or_default()
    }

    pub fn expert_by_user_id(&self, user_id: &UserId) -> Option<&Expert> {
        self.experts.iter().find(|e| e.user_id == *user_id)
    }

    /// Experts whose name matches `query`, in server order
    pub fn search_experts(&self, query: &str) -> Vec<&Expert> {
        let query = crate::api::clamp_search(query);
        self.experts
            .iter()
            .filter(|e| e.matches_name(query))
            .collect()
    }

    pub fn comments_for(&self, expert: &Expert) -> Vec<&Comment> {
        self.comments
            .iter()
            .filter(|c| c.expert_id.as_ref() == Some(&expert.user_id))
            .collect()
    }

    pub fn comment(&self, id: &CommentId) -> Option<&Comment> {
        self.comments.iter().find(|c| c.id == *id)
    }

    pub fn push_comment(&mut self, comment: Comment) {
        Arc::make_mut(&mut self.comments).push(comment);
        self.refresh_stats();
    }

    pub fn replace_comment(&mut self, comment: Comment) {
        let comments = Arc::make_mut(&mut self.comments);
        match comments.iter_mut().find(|c| c.id == comment.id) {
            Some(c) => *c = comment,
            None => tracing::warn!(comment_id = %comment.id, "replacing unknown comment"),
        }
        self.refresh_stats();
    }

    pub fn remove_comment(&mut self, id: &CommentId) {
        Arc::make_mut(&mut self.comments).retain(|c| c.id != *id);
        self.refresh_stats();
    }

    pub fn add_articles(&mut self, articles: Vec<Article>) {
        Arc::make_mut(&mut self.articles).extend(articles);
    }

    pub fn article(&self, id: &ArticleId) -> Option<&Article> {
        self.articles.iter().find(|a| a.id == *id)
    }

    pub fn push_article(&mut self, article: Article) {
        Arc::make_mut(&mut self.articles).push(article);
    }

    pub fn replace_article(&mut self, article: Article) {
        let articles = Arc::make_mut(&mut self.articles);
        match articles.iter_mut().find(|a| a.id == article.id) {
            Some(a) => *a = article,
            None => tracing::warn!(article_id = %article.id, "replacing unknown article"),
        }
    }

    pub fn remove_article(&mut self, id: &ArticleId) {
        Arc::make_mut(&mut self.articles).retain(|a| a.id != *id);
    }

    pub fn add_food_advice(&mut self, advice: Vec<FoodAdvice>) {
        Arc::make_mut(&mut self.food_advice).extend(advice);
    }

    pub fn food_advice(&self, id: &FoodAdviceId) -> Option<&FoodAdvice> {
        self.food_advice.iter().find(|a| a.id == *id)
    }

    pub fn push_food_advice(&mut self, advice: FoodAdvice) {
        Arc::make_mut(&mut self.food_advice).push(advice);
    }

    pub fn replace_food_advice(&mut self, advice: FoodAdvice) {
        let list = Arc::make_mut(&mut self.food_advice);
        match list.iter_mut().find(|a| a.id == advice.id) {
            Some(a) => *a = advice,
            None => tracing::warn!(advice_id = %advice.id, "replacing unknown food advice"),
        }
    }

    pub fn remove_food_advice(&mut self, id: &FoodAdviceId) {
        Arc::make_mut(&mut self.food_advice).retain(|a| a.id != *id);
    }
}
