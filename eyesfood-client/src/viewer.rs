use crate::api::{Article, Comment, Expert, ExpertId, FoodAdvice, UserId};

/// The person using the client, as known from their session
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Viewer {
    pub user_id: Option<UserId>,

    /// Set when the viewer is an expert themself
    pub expert_id: Option<ExpertId>,
}

impl Viewer {
    pub fn anonymous() -> Viewer {
        Viewer::default()
    }

    pub fn new(user_id: Option<UserId>, expert_id: Option<ExpertId>) -> Viewer {
        Viewer {
            user_id: user_id.filter(|u| !u.is_empty()),
            expert_id: expert_id.filter(|e| !e.is_empty()),
        }
    }

    pub fn user_id(&self) -> Option<&UserId> {
        self.user_id.as_ref()
    }

    pub fn is(&self, user: &UserId) -> bool {
        self.user_id.as_ref() == Some(user)
    }

    fn is_expert(&self, expert: Option<&ExpertId>) -> bool {
        self.expert_id.is_some() && self.expert_id.as_ref() == expert
    }

    /// Experts cannot comment on their own profile
    pub fn can_comment_on(&self, expert: &Expert) -> bool {
        self.user_id.is_some() && !self.is(&expert.user_id)
    }

    pub fn can_edit_comment(&self, comment: &Comment) -> bool {
        self.is(&comment.user_id)
    }

    pub fn can_create_article(&self) -> bool {
        self.expert_id.is_some()
    }

    pub fn can_edit_article(&self, article: &Article) -> bool {
        self.is_expert(article.expert_id.as_ref())
    }

    pub fn can_create_food_advice(&self) -> bool {
        self.expert_id.is_some()
    }

    pub fn can_edit_food_advice(&self, advice: &FoodAdvice) -> bool {
        self.is_expert(Some(&advice.expert_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ArticleId, CommentId, Recommendation};

    fn article(expert: Option<&str>) -> Article {
        Article {
            id: ArticleId::from("a1"),
            expert_id: expert.map(ExpertId::from),
            title: Some(String::from("Hydration")),
            description: None,
            link: None,
            created_at: None,
            updated_at: None,
            expert_profile: None,
        }
    }

    #[test]
    fn empty_ids_are_anonymous() {
        let v = Viewer::new(Some(UserId::from("")), Some(ExpertId::from("")));
        assert_eq!(v, Viewer::anonymous());
        assert!(!v.can_create_article());
        assert!(!v.can_edit_article(&article(None)));
    }

    #[test]
    fn article_ownership() {
        let v = Viewer::new(Some(UserId::from("u1")), Some(ExpertId::from("p1")));
        assert!(v.can_create_article());
        assert!(v.can_edit_article(&article(Some("p1"))));
        assert!(!v.can_edit_article(&article(Some("p2"))));
        assert!(!v.can_edit_article(&article(None)));
    }

    #[test]
    fn comment_ownership() {
        let v = Viewer::new(Some(UserId::from("u1")), None);
        let mut c = Comment {
            id: CommentId::from("c1"),
            user_id: UserId::from("u1"),
            expert_id: Some(UserId::from("u2")),
            content: None,
            is_hidden: false,
            is_recommended: Recommendation::Undecided,
            created_at: None,
            user: None,
            expert: None,
        };
        assert!(v.can_edit_comment(&c));
        c.user_id = UserId::from("u3");
        assert!(!v.can_edit_comment(&c));
        assert!(!Viewer::anonymous().can_edit_comment(&c));
    }
}
