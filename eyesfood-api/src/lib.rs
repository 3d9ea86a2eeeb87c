use chrono::Utc;

pub type Time = chrono::DateTime<Utc>;

/// Longest search query the expert list accepts, in characters
pub const MAX_SEARCH_LEN: usize = 100;

macro_rules! string_id {
    ($name:ident) => {
        #[derive(
            Clone,
            Debug,
            Default,
            Eq,
            Hash,
            Ord,
            PartialEq,
            PartialOrd,
            serde::Deserialize,
            serde::Serialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> $name {
                $name(String::from(s))
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> $name {
                $name(s)
            }
        }
    };
}

mod article;
pub use article::{Article, ArticleForm, ArticleId, NewArticle};

mod auth;
pub use auth::AuthToken;

mod comment;
pub use comment::{Comment, CommentId, CommentPatch, NewComment, Recommendation, MAX_COMMENT_LEN};

mod error;
pub use error::Error;

mod expert;
pub use expert::{Expert, ExpertId, ExpertPatch, Professions};

mod food_advice;
pub use food_advice::{AdviceType, FoodAdvice, FoodAdviceId, FoodAdvicePatch, FoodId, NewFoodAdvice};

mod query;
pub use query::{ArticlesQuery, CommentsQuery, FoodAdviceQuery};

mod user;
pub use user::{User, UserId};

pub fn validate_string(s: &str) -> Result<(), Error> {
    if s.contains('\0') {
        return Err(Error::NullByteInString(String::from(s)));
    }
    Ok(())
}

/// Validates a form field that must hold something other than whitespace
pub fn validate_required(field: &str, s: &str) -> Result<(), Error> {
    validate_string(s)?;
    if s.trim().is_empty() {
        return Err(Error::MissingField(String::from(field)));
    }
    Ok(())
}

pub fn validate_max_len(field: &str, s: &str, max: usize) -> Result<(), Error> {
    if s.chars().count() > max {
        return Err(Error::TooLong {
            field: String::from(field),
            max,
        });
    }
    Ok(())
}

/// Turns a user-entered link into something a browser can open
///
/// Links without a scheme are assumed to be https. Blank links are `None`.
pub fn normalize_link(link: &str) -> Option<String> {
    let link = link.trim();
    if link.is_empty() {
        return None;
    }
    if link.starts_with("http://") || link.starts_with("https://") {
        Some(String::from(link))
    } else {
        Some(format!("https://{link}"))
    }
}

/// Reads an explicit `null` the same way as a missing field
///
/// Meant for `#[serde(default, deserialize_with = ...)]` on non-optional
/// fields that the server sometimes sends as `null`.
pub fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + serde::Deserialize<'de>,
{
    Ok(<Option<T> as serde::Deserialize>::deserialize(d)?.unwrap_or_default())
}

/// Truncates a search query to `MAX_SEARCH_LEN` characters
pub fn clamp_search(query: &str) -> &str {
    match query.char_indices().nth(MAX_SEARCH_LEN) {
        Some((idx, _)) => &query[..idx],
        None => query,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn links_get_a_scheme() {
        assert_eq!(normalize_link(""), None);
        assert_eq!(normalize_link("   "), None);
        assert_eq!(
            normalize_link("example.org/a"),
            Some(String::from("https://example.org/a"))
        );
        assert_eq!(
            normalize_link("http://example.org"),
            Some(String::from("http://example.org"))
        );
        assert_eq!(
            normalize_link(" https://example.org "),
            Some(String::from("https://example.org"))
        );
    }

    #[test]
    fn required_fields() {
        assert_eq!(
            validate_required("title", " \n"),
            Err(Error::MissingField(String::from("title")))
        );
        assert_eq!(
            validate_required("title", "a\0b"),
            Err(Error::NullByteInString(String::from("a\0b")))
        );
        assert_eq!(validate_required("title", "ok"), Ok(()));
    }

    #[test]
    fn search_is_clamped() {
        let long = "é".repeat(MAX_SEARCH_LEN + 20);
        assert_eq!(clamp_search(&long).chars().count(), MAX_SEARCH_LEN);
        assert_eq!(clamp_search("ana"), "ana");
    }
}
