use std::fmt;

use crate::{Error, Expert, ExpertId, Time};

string_id!(FoodAdviceId);
string_id!(FoodId);

#[derive(
    Clone, Copy, Debug, Default, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum AdviceType {
    /// General advice
    #[default]
    Warning,
    Positive,
    Negative,
}

impl fmt::Display for AdviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AdviceType::Warning => "General",
            AdviceType::Positive => "Positive",
            AdviceType::Negative => "Negative",
        })
    }
}

impl std::str::FromStr for AdviceType {
    type Err = String;

    fn from_str(s: &str) -> Result<AdviceType, String> {
        match &s.to_lowercase() as &str {
            "warning" | "general" => Ok(AdviceType::Warning),
            "positive" => Ok(AdviceType::Positive),
            "negative" => Ok(AdviceType::Negative),
            _ => Err(format!("expected general, positive or negative, got {s:?}")),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodAdvice {
    pub id: FoodAdviceId,
    pub expert_id: ExpertId,
    pub food_local_id: FoodId,
    #[serde(rename = "type", default, deserialize_with = "crate::null_as_default")]
    pub advice_type: AdviceType,
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub content: String,
    #[serde(default)]
    pub created_at: Option<Time>,
    #[serde(default)]
    pub updated_at: Option<Time>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expert_profile: Option<Box<Expert>>,
}

impl FoodAdvice {
    pub fn apply(&mut self, patch: &FoodAdvicePatch) {
        self.content = patch.content.clone();
        self.advice_type = patch.advice_type;
    }
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFoodAdvice {
    pub expert_id: ExpertId,
    pub food_local_id: FoodId,
    pub content: String,
    #[serde(rename = "type", default)]
    pub advice_type: AdviceType,
}

impl NewFoodAdvice {
    pub fn validate(&self) -> Result<(), Error> {
        crate::validate_required("content", &self.content)?;
        crate::validate_string(self.expert_id.as_str())?;
        crate::validate_required("foodLocalId", self.food_local_id.as_str())?;
        Ok(())
    }
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct FoodAdvicePatch {
    pub content: String,
    #[serde(rename = "type", default)]
    pub advice_type: AdviceType,
}

impl FoodAdvicePatch {
    pub fn validate(&self) -> Result<(), Error> {
        crate::validate_required("content", &self.content)
    }
}
