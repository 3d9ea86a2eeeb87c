use std::fmt;

use crate::{Error, User, UserId};

string_id!(ExpertId);

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Expert {
    /// Id of the expert-profile record
    pub id: ExpertId,

    /// Id of the user behind this profile, which comments refer to
    pub user_id: UserId,

    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub web_page: Option<String>,
    #[serde(default)]
    pub specialty: Option<String>,
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub is_coach: bool,
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub is_nutritionist: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Professions {
    NutritionistAndCoach,
    Coach,
    Nutritionist,
    Unspecified,
}

impl fmt::Display for Professions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Professions::NutritionistAndCoach => "Nutritionist and coach",
            Professions::Coach => "Coach",
            Professions::Nutritionist => "Nutritionist",
            Professions::Unspecified => "No profession set",
        })
    }
}

impl Expert {
    pub fn name(&self) -> Option<&str> {
        self.user.as_ref().and_then(|u| u.name.as_deref())
    }

    pub fn email(&self) -> Option<&str> {
        self.user.as_ref().and_then(|u| u.email.as_deref())
    }

    pub fn professions(&self) -> Professions {
        match (self.is_nutritionist, self.is_coach) {
            (true, true) => Professions::NutritionistAndCoach,
            (false, true) => Professions::Coach,
            (true, false) => Professions::Nutritionist,
            (false, false) => Professions::Unspecified,
        }
    }

    pub fn web_page_url(&self) -> Option<String> {
        self.web_page.as_deref().and_then(crate::normalize_link)
    }

    /// Case-insensitive substring match on the expert's name
    ///
    /// A blank query matches everyone, including experts with no known name.
    pub fn matches_name(&self, query: &str) -> bool {
        let query = query.trim();
        if query.is_empty() {
            return true;
        }
        let query = query.to_lowercase();
        self.name()
            .map(|n| n.to_lowercase().contains(&query))
            .unwrap_or(false)
    }

    pub fn apply(&mut self, patch: &ExpertPatch) {
        self.address = Some(patch.address.clone());
        self.description = Some(patch.description.clone());
        self.phone = Some(patch.phone.clone());
        self.web_page = Some(patch.web_page.clone());
        self.specialty = Some(patch.specialty.clone());
        self.is_coach = patch.is_coach;
        self.is_nutritionist = patch.is_nutritionist;
    }
}

/// Profile edit, as submitted by the expert themself
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpertPatch {
    pub address: String,
    pub description: String,
    pub phone: String,
    pub web_page: String,
    pub specialty: String,
    pub is_coach: bool,
    pub is_nutritionist: bool,
}

impl ExpertPatch {
    pub fn from_expert(e: &Expert) -> ExpertPatch {
        let field = |f: &Option<String>| f.clone().unwrap_or_default();
        ExpertPatch {
            address: field(&e.address),
            description: field(&e.description),
            phone: field(&e.phone),
            web_page: field(&e.web_page),
            specialty: field(&e.specialty),
            is_coach: e.is_coach,
            is_nutritionist: e.is_nutritionist,
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        crate::validate_required("description", &self.description)?;
        crate::validate_required("specialty", &self.specialty)?;
        crate::validate_string(&self.address)?;
        crate::validate_string(&self.phone)?;
        crate::validate_string(&self.web_page)?;
        Ok(())
    }
}
