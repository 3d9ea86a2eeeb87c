use anyhow::{anyhow, Context};
use serde_json::json;

#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Unknown error: {0}")]
    Unknown(String),

    #[error("Permission denied")]
    PermissionDenied,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Missing required field {0}")]
    MissingField(String),

    #[error("Field {field} is longer than {max} characters")]
    TooLong { field: String, max: usize },

    #[error("Null byte in string is not allowed {0:?}")]
    NullByteInString(String),
}

impl Error {
    pub fn status_code(&self) -> http::StatusCode {
        use http::StatusCode;
        match self {
            Error::Unknown(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::PermissionDenied => StatusCode::FORBIDDEN,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::MissingField(_) => StatusCode::BAD_REQUEST,
            Error::TooLong { .. } => StatusCode::BAD_REQUEST,
            Error::NullByteInString(_) => StatusCode::BAD_REQUEST,
        }
    }

    pub fn contents(&self) -> Vec<u8> {
        serde_json::to_vec(&match self {
            Error::Unknown(msg) => json!({
                "message": msg,
                "type": "unknown",
            }),
            Error::PermissionDenied => json!({
                "message": "permission denied",
                "type": "permission-denied",
            }),
            Error::NotFound(what) => json!({
                "message": format!("{what} not found"),
                "type": "not-found",
                "what": what,
            }),
            Error::MissingField(field) => json!({
                "message": format!("missing required field {field}"),
                "type": "missing-field",
                "field": field,
            }),
            Error::TooLong { field, max } => json!({
                "message": format!("field {field} is too long"),
                "type": "too-long",
                "field": field,
                "max": max,
            }),
            Error::NullByteInString(s) => json!({
                "message": "there was a null byte in argument string",
                "type": "null-byte",
                "string": s,
            }),
        })
        .expect("serializing error contents")
    }

    /// Parses an error body returned by the API
    ///
    /// Bodies with no `type` are the server's native `{"message": ...}`
    /// errors and become `Error::Unknown`.
    pub fn parse(body: &[u8]) -> anyhow::Result<Error> {
        let data: serde_json::Value =
            serde_json::from_slice(body).context("parsing error contents")?;
        let str_field = |name: &str| data.get(name).and_then(|v| v.as_str());
        let message = || match data.get("message") {
            Some(serde_json::Value::String(m)) => Ok(String::from(m)),
            // validation errors come back as a list of messages
            Some(serde_json::Value::Array(msgs)) => Ok(msgs
                .iter()
                .filter_map(|m| m.as_str())
                .collect::<Vec<_>>()
                .join(", ")),
            _ => Err(anyhow!("error has neither a type nor a message")),
        };
        let typ = match data.get("type") {
            None => return Ok(Error::Unknown(message()?)),
            Some(t) => t.as_str().ok_or_else(|| anyhow!("error type is not a string"))?,
        };
        Ok(match typ {
            "unknown" => Error::Unknown(String::from(str_field("message").unwrap_or(""))),
            "permission-denied" => Error::PermissionDenied,
            "not-found" => Error::NotFound(String::from(
                str_field("what").ok_or_else(|| anyhow!("error is a not-found without a what"))?,
            )),
            "missing-field" => Error::MissingField(String::from(
                str_field("field")
                    .ok_or_else(|| anyhow!("error is a missing-field without a field"))?,
            )),
            "too-long" => Error::TooLong {
                field: String::from(
                    str_field("field").ok_or_else(|| anyhow!("error is a too-long without a field"))?,
                ),
                max: data
                    .get("max")
                    .and_then(|m| m.as_u64())
                    .ok_or_else(|| anyhow!("error is a too-long without a max"))?
                    as usize,
            },
            "null-byte" => Error::NullByteInString(String::from(str_field("string").ok_or_else(
                || anyhow!("error is a null-byte-in-string without a string"),
            )?)),
            _ => return Err(anyhow!("error contents has unknown type")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_survive_the_wire() {
        for e in [
            Error::Unknown(String::from("boom")),
            Error::PermissionDenied,
            Error::NotFound(String::from("comment c1")),
            Error::MissingField(String::from("title")),
            Error::TooLong {
                field: String::from("content"),
                max: 500,
            },
            Error::NullByteInString(String::from("a\0")),
        ] {
            assert_eq!(Error::parse(&e.contents()).unwrap(), e);
        }
    }

    #[test]
    fn native_server_messages() {
        assert_eq!(
            Error::parse(br#"{"statusCode":401,"message":"Unauthorized"}"#).unwrap(),
            Error::Unknown(String::from("Unauthorized")),
        );
        assert_eq!(
            Error::parse(br#"{"statusCode":400,"message":["title should not be empty","link must be a URL"]}"#)
                .unwrap(),
            Error::Unknown(String::from("title should not be empty, link must be a URL")),
        );
        assert!(Error::parse(b"<html>").is_err());
        assert!(Error::parse(br#"{"statusCode":500}"#).is_err());
    }
}
