string_id!(UserId);

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub profile_pic: Option<String>,
}

impl User {
    pub fn new(id: UserId, name: String, email: String) -> User {
        User {
            id,
            name: Some(name),
            email: Some(email),
            profile_pic: None,
        }
    }
}
