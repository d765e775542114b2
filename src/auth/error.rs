#[derive(Debug, Clone)]
#[derive(serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ErrorResponse<K> {
    #[serde(rename = "error")]
    pub kind: K,
    #[serde(rename = "error_description")]
    pub description: Option<String>,
    #[serde(rename = "error_uri")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

#[derive(Debug, Clone)]
#[derive(serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientAuthenticationErrorKind {
    InvalidClient,
}

pub type ClientAuthenticationError = ErrorResponse<ClientAuthenticationErrorKind>;

impl ClientAuthenticationError {
    pub fn invalid_client() -> Self {
        Self {
            kind: ClientAuthenticationErrorKind::InvalidClient,
            description: Some("Client authentication failed".to_string()),
            uri: None,
        }
    }
}
