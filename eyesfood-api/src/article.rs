use crate::{Error, Expert, ExpertId, Time};

string_id!(ArticleId);

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: ArticleId,
    #[serde(default)]
    pub expert_id: Option<ExpertId>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub created_at: Option<Time>,
    #[serde(default)]
    pub updated_at: Option<Time>,

    /// Author's profile, embedded when listing with `we=true`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expert_profile: Option<Box<Expert>>,
}

impl Article {
    pub fn link_url(&self) -> Option<String> {
        self.link.as_deref().and_then(crate::normalize_link)
    }

    pub fn apply(&mut self, form: &ArticleForm) {
        self.title = Some(form.title.clone());
        self.description = Some(form.description.clone());
        self.link = Some(form.link.clone());
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct ArticleForm {
    pub title: String,
    pub description: String,
    pub link: String,
}

impl ArticleForm {
    pub fn from_article(a: &Article) -> ArticleForm {
        ArticleForm {
            title: a.title.clone().unwrap_or_default(),
            description: a.description.clone().unwrap_or_default(),
            link: a.link.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        crate::validate_required("title", &self.title)?;
        crate::validate_string(&self.description)?;
        crate::validate_string(&self.link)?;
        Ok(())
    }
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewArticle {
    #[serde(flatten)]
    pub form: ArticleForm,
    pub expert_id: ExpertId,
}

impl NewArticle {
    pub fn validate(&self) -> Result<(), Error> {
        self.form.validate()?;
        crate::validate_string(self.expert_id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_article_is_flat_on_the_wire() {
        let a = NewArticle {
            form: ArticleForm {
                title: String::from("Fibre"),
                description: String::new(),
                link: String::from("example.org/fibre"),
            },
            expert_id: ExpertId::from("p1"),
        };
        assert_eq!(
            serde_json::to_value(&a).unwrap(),
            serde_json::json!({
                "title": "Fibre",
                "description": "",
                "link": "example.org/fibre",
                "expertId": "p1",
            }),
        );
        assert_eq!(a.validate(), Ok(()));
    }

    #[test]
    fn title_is_required() {
        let form = ArticleForm::default();
        assert_eq!(
            form.validate(),
            Err(Error::MissingField(String::from("title")))
        );
    }
}
