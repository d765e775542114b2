use crate::core::models::ParsedSecret;
use crate::core::types::{ClientId, ParsedSecretType};

/// What the server tells a caller about the secret it sent. The credential
/// itself is never echoed back.
#[derive(Debug, Clone)]
#[derive(serde::Serialize)]
pub struct SecretInfo {
    pub client_id: ClientId,
    #[serde(rename = "type")]
    pub kind: ParsedSecretType,
}

impl From<ParsedSecret> for SecretInfo {
    fn from(secret: ParsedSecret) -> Self {
        Self {
            client_id: secret.id,
            kind: secret.kind,
        }
    }
}
