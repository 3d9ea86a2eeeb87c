use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{self, request},
};
use eyesfood_api::AuthToken;

use crate::error::Error;

/// Bearer token from the `Authorization` header
pub struct Auth(pub AuthToken);

#[async_trait]
impl<S: Sync> FromRequestParts<S> for Auth {
    type Rejection = Error;

    async fn from_request_parts(req: &mut request::Parts, _state: &S) -> Result<Auth, Error> {
        let auth = req
            .headers
            .get(http::header::AUTHORIZATION)
            .ok_or_else(Error::permission_denied)?;
        let auth = auth.to_str().map_err(|_| Error::permission_denied())?;
        let mut auth = auth.split(' ');
        if !auth
            .next()
            .ok_or_else(Error::permission_denied)?
            .eq_ignore_ascii_case("bearer")
        {
            return Err(Error::permission_denied());
        }
        let token = auth.next().ok_or_else(Error::permission_denied)?;
        if auth.next().is_some() || token.is_empty() {
            return Err(Error::permission_denied());
        }
        Ok(Auth(AuthToken(String::from(token))))
    }
}
