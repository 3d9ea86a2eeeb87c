use crate::{Error, Time, User, UserId};

/// Longest comment body accepted, in characters
pub const MAX_COMMENT_LEN: usize = 500;

string_id!(CommentId);

/// Whether a comment recommends the expert it is about
///
/// On the wire this is `isRecommended: bool | null`, and `null` (or a
/// missing field) means the author did not decide yet.
#[derive(
    Clone, Copy, Debug, Default, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize,
)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum Recommendation {
    #[default]
    Undecided,
    Recommended,
    NotRecommended,
}

impl Recommendation {
    pub fn is_recommended(&self) -> bool {
        *self == Recommendation::Recommended
    }
}

impl From<Option<bool>> for Recommendation {
    fn from(b: Option<bool>) -> Recommendation {
        match b {
            None => Recommendation::Undecided,
            Some(true) => Recommendation::Recommended,
            Some(false) => Recommendation::NotRecommended,
        }
    }
}

impl From<Recommendation> for Option<bool> {
    fn from(r: Recommendation) -> Option<bool> {
        match r {
            Recommendation::Undecided => None,
            Recommendation::Recommended => Some(true),
            Recommendation::NotRecommended => Some(false),
        }
    }
}

impl From<bool> for Recommendation {
    fn from(b: bool) -> Recommendation {
        Recommendation::from(Some(b))
    }
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub user_id: UserId,

    /// User id of the expert this comment is about
    #[serde(default)]
    pub expert_id: Option<UserId>,

    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub is_hidden: bool,
    #[serde(default)]
    pub is_recommended: Recommendation,
    #[serde(default)]
    pub created_at: Option<Time>,

    /// Author, embedded when listing with `wu=true`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,

    /// Expert's user record, embedded when listing with `we=true`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expert: Option<User>,
}

impl Comment {
    pub fn content(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }

    pub fn apply(&mut self, patch: &CommentPatch) {
        self.content = Some(patch.content.clone());
        self.is_recommended = patch.is_recommended;
    }
}

fn validate_content(content: &str) -> Result<(), Error> {
    crate::validate_required("content", content)?;
    crate::validate_max_len("content", content, MAX_COMMENT_LEN)
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub content: String,
    #[serde(default)]
    pub is_recommended: Recommendation,
    pub user_id: UserId,
    pub expert_id: UserId,
}

impl NewComment {
    pub fn validate(&self) -> Result<(), Error> {
        validate_content(&self.content)?;
        crate::validate_string(self.user_id.as_str())?;
        crate::validate_string(self.expert_id.as_str())?;
        Ok(())
    }
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentPatch {
    pub content: String,
    #[serde(default)]
    pub is_recommended: Recommendation,
}

impl CommentPatch {
    /// Prefills an edit from the current state of `c`
    pub fn from_comment(c: &Comment) -> CommentPatch {
        CommentPatch {
            content: String::from(c.content()),
            is_recommended: c.is_recommended,
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        validate_content(&self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recommendation_is_three_valued() {
        let parse = |s: &str| -> Comment {
            serde_json::from_str(&format!(
                r#"{{"id":"c1","userId":"u1","expertId":"e1"{s}}}"#
            ))
            .expect("parsing comment")
        };
        assert_eq!(parse("").is_recommended, Recommendation::Undecided);
        assert_eq!(
            parse(r#","isRecommended":null"#).is_recommended,
            Recommendation::Undecided
        );
        assert_eq!(
            parse(r#","isRecommended":true"#).is_recommended,
            Recommendation::Recommended
        );
        assert_eq!(
            parse(r#","isRecommended":false"#).is_recommended,
            Recommendation::NotRecommended
        );
    }

    #[test]
    fn undecided_serializes_as_null() {
        let patch = CommentPatch {
            content: String::from("hi"),
            is_recommended: Recommendation::Undecided,
        };
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            serde_json::json!({"content": "hi", "isRecommended": null}),
        );
    }

    #[test]
    fn null_hidden_flag_keeps_the_list() {
        let list: Vec<Comment> = serde_json::from_str(
            r#"[
                {"id":"c1","userId":"u1","expertId":"e1","isHidden":null,"isRecommended":true},
                {"id":"c2","userId":"u2","expertId":"e1","isHidden":true}
            ]"#,
        )
        .expect("parsing comment list");
        assert_eq!(list.len(), 2);
        assert!(!list[0].is_hidden);
        assert_eq!(list[0].is_recommended, Recommendation::Recommended);
        assert!(list[1].is_hidden);
    }

    #[test]
    fn missing_expert_id_still_parses() {
        let c: Comment = serde_json::from_str(r#"{"id":"c1","userId":"u1"}"#).unwrap();
        assert_eq!(c.expert_id, None);
        assert_eq!(c.content(), "");
    }

    #[test]
    fn content_validation() {
        let mut c = NewComment {
            content: String::from("  "),
            is_recommended: Recommendation::Recommended,
            user_id: UserId::from("u1"),
            expert_id: UserId::from("e1"),
        };
        assert_eq!(
            c.validate(),
            Err(Error::MissingField(String::from("content")))
        );
        c.content = "a".repeat(MAX_COMMENT_LEN);
        assert_eq!(c.validate(), Ok(()));
        c.content.push('a');
        assert_eq!(
            c.validate(),
            Err(Error::TooLong {
                field: String::from("content"),
                max: MAX_COMMENT_LEN,
            })
        );
    }
}
