use super::types::{ClientId, ClientSecret, ParsedSecretType};

/// Client authentication material found in a request, not yet verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSecret {
    pub id: ClientId,
    pub credential: ClientSecret,
    pub kind: ParsedSecretType,
}

impl ParsedSecret {
    pub fn shared_secret(id: String, secret: String) -> Self {
        Self {
            id: ClientId(id),
            credential: ClientSecret(secret),
            kind: ParsedSecretType::SharedSecret,
        }
    }
}

/// Upper bounds on client credential lengths, in characters.
///
/// `None` leaves the corresponding value unrestricted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputLengthRestrictions {
    pub client_id: Option<usize>,
    pub client_secret: Option<usize>,
}

impl InputLengthRestrictions {
    pub fn new(client_id: usize, client_secret: usize) -> Self {
        Self {
            client_id: Some(client_id),
            client_secret: Some(client_secret),
        }
    }

    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn allows(&self, id: &str, secret: &str) -> bool {
        within(self.client_id, id) && within(self.client_secret, secret)
    }
}

fn within(limit: Option<usize>, value: &str) -> bool {
    match limit {
        Some(max) => value.chars().count() <= max,
        None => true,
    }
}
