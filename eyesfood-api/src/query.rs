//! Query strings understood by the listing endpoints

use crate::FoodId;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct CommentsQuery {
    /// Embed each comment's author
    #[serde(default)]
    pub wu: bool,

    /// Embed the user record of the expert each comment is about
    #[serde(default)]
    pub we: bool,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct ArticlesQuery {
    /// Embed each article's expert profile
    #[serde(default)]
    pub we: bool,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct FoodAdviceQuery {
    #[serde(default)]
    pub we: bool,

    /// Only return advice about this food
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub f: Option<FoodId>,
}
