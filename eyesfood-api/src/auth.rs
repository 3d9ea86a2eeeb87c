/// Bearer token identifying a session with the remote API
#[derive(Clone, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(transparent)]
pub struct AuthToken(pub String);

impl AuthToken {
    pub fn stub() -> AuthToken {
        AuthToken(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
