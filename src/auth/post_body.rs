use std::fmt;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::{event, Level};

use super::request::{BodyError, IncomingRequest};
use super::SecretParser;
use crate::core::models::{InputLengthRestrictions, ParsedSecret};
use crate::core::types::AuthenticationMethod;

/// Finds `client_id` and `client_secret` in a JSON or form-encoded POST body.
#[derive(Debug, Clone)]
pub struct PostBodySecretParser {
    restrictions: InputLengthRestrictions,
}

#[derive(Debug)]
#[derive(serde::Deserialize)]
struct PostBodyCredentials {
    client_id: Option<String>,
    client_secret: Option<String>,
}

impl PostBodyCredentials {
    // Duplicate keys resolve to the last occurrence. Numbers and booleans are
    // taken as their JSON text.
    fn from_json(body: &[u8]) -> Result<Self, Error> {
        let mut fields: Map<String, Value> = serde_json::from_slice(body)?;
        Ok(Self {
            client_id: json_field(&mut fields, "client_id")?,
            client_secret: json_field(&mut fields, "client_secret")?,
        })
    }

    // Repeated fields are refused (RFC 6749 section 3.2).
    fn from_form(body: &[u8]) -> Result<Self, Error> {
        Ok(serde_urlencoded::from_bytes(body)?)
    }
}

fn json_field(fields: &mut Map<String, Value>, key: &'static str) -> Result<Option<String>, Error> {
    match fields.remove(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(_) => Err(Error::NotScalar(key)),
    }
}

#[derive(Debug)]
enum Error {
    Body(BodyError),
    Json(serde_json::Error),
    Form(serde_urlencoded::de::Error),
    NotScalar(&'static str),
}

impl From<BodyError> for Error {
    fn from(e: BodyError) -> Self {
        Self::Body(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<serde_urlencoded::de::Error> for Error {
    fn from(e: serde_urlencoded::de::Error) -> Self {
        Self::Form(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Body(e) => e.fmt(f),
            Self::Json(e) => write!(f, "malformed JSON body: {}", e),
            Self::Form(e) => write!(f, "malformed form body: {}", e),
            Self::NotScalar(key) => write!(f, "{} is not a scalar value", key),
        }
    }
}

impl PostBodySecretParser {
    pub fn new(restrictions: InputLengthRestrictions) -> Self {
        Self { restrictions }
    }

    async fn read_credentials(
        &self,
        request: &dyn IncomingRequest,
    ) -> Result<PostBodyCredentials, Error> {
        let body = request.body().await?;

        if is_json(request.content_type()) {
            PostBodyCredentials::from_json(&body)
        } else {
            PostBodyCredentials::from_form(&body)
        }
    }

    fn map_to_parsed_secret(&self, id: String, secret: String) -> Option<ParsedSecret> {
        if !self.restrictions.allows(&id, &secret) {
            event!(Level::DEBUG, "Client ID or secret exceeds maximum length");
            return None;
        }

        Some(ParsedSecret::shared_secret(id, secret))
    }
}

#[async_trait]
impl SecretParser for PostBodySecretParser {
    fn authentication_method(&self) -> AuthenticationMethod {
        AuthenticationMethod::ClientSecretPost
    }

    #[tracing::instrument(name = "post_body_secret", skip_all)]
    async fn parse(&self, request: &dyn IncomingRequest) -> Option<ParsedSecret> {
        event!(Level::TRACE, "Start parsing for secret in post body");

        let credentials = match self.read_credentials(request).await {
            Ok(credentials) => credentials,
            Err(e) => {
                event!(Level::DEBUG, error = %e, "No secret in post body found");
                return None;
            }
        };

        match (
            present(credentials.client_id),
            present(credentials.client_secret),
        ) {
            (Some(id), Some(secret)) => self.map_to_parsed_secret(id, secret),
            _ => {
                event!(Level::DEBUG, "No secret in post body found");
                None
            }
        }
    }
}

// Present means non-empty after trimming. The value itself is kept untrimmed.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn is_json(content_type: Option<&str>) -> bool {
    let essence = match content_type {
        Some(c) => c.split(';').next().unwrap_or_default().trim().to_ascii_lowercase(),
        None => return false,
    };

    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}
