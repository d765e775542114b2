use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{event, Level};

use crate::core::models::ParsedSecret;
use crate::core::types::AuthenticationMethod;

pub mod error;
pub mod post_body;
pub mod request;

pub use post_body::PostBodySecretParser;
use request::IncomingRequest;

/// A strategy for finding client authentication material in one part of a
/// request.
///
/// A parser that finds nothing returns `None` so the next parser in a
/// [`SecretParsers`] chain gets its turn. Malformed input is never an error.
#[async_trait]
pub trait SecretParser: Send + Sync {
    fn authentication_method(&self) -> AuthenticationMethod;
    async fn parse(&self, request: &dyn IncomingRequest) -> Option<ParsedSecret>;
}

/// An ordered set of secret parsers. The first one to produce a secret wins.
#[derive(Clone, Default)]
pub struct SecretParsers {
    parsers: Vec<Arc<dyn SecretParser>>,
}

impl SecretParsers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, parser: impl SecretParser + 'static) -> Self {
        self.parsers.push(Arc::new(parser));
        self
    }

    pub fn supported_authentication_methods(&self) -> Vec<AuthenticationMethod> {
        self.parsers
            .iter()
            .map(|p| p.authentication_method())
            .collect()
    }

    #[tracing::instrument(skip_all)]
    pub async fn parse(&self, request: &dyn IncomingRequest) -> Option<ParsedSecret> {
        for parser in &self.parsers {
            if let Some(secret) = parser.parse(request).await {
                event!(
                    Level::DEBUG,
                    client_id = ?secret.id,
                    method = parser.authentication_method().as_str(),
                    "Parser found secret"
                );
                return Some(secret);
            }
        }

        event!(Level::DEBUG, "Parser found no secret");
        None
    }
}

impl fmt::Debug for SecretParsers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.supported_authentication_methods())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::InputLengthRestrictions;
    use crate::http::request::HttpRequest;

    use std::sync::atomic::{AtomicUsize, Ordering};
    use warp::http::HeaderMap;
    use warp::hyper::body::Bytes;

    struct Fixed(Option<ParsedSecret>, Arc<AtomicUsize>);

    #[async_trait]
    impl SecretParser for Fixed {
        fn authentication_method(&self) -> AuthenticationMethod {
            AuthenticationMethod::ClientSecretPost
        }

        async fn parse(&self, _request: &dyn IncomingRequest) -> Option<ParsedSecret> {
            self.1.fetch_add(1, Ordering::SeqCst);
            self.0.clone()
        }
    }

    fn empty_form() -> HttpRequest {
        let mut headers = HeaderMap::new();
        headers.insert(
            "content-type",
            "application/x-www-form-urlencoded".parse().unwrap(),
        );
        HttpRequest::buffered(headers, Bytes::new())
    }

    #[tokio::test]
    async fn first_parser_with_a_secret_wins() {
        let calls = Arc::new(AtomicUsize::new(0));
        let found = ParsedSecret::shared_secret("a".into(), "b".into());
        let other = ParsedSecret::shared_secret("c".into(), "d".into());
        let parsers = SecretParsers::new()
            .with(Fixed(None, calls.clone()))
            .with(Fixed(Some(found.clone()), calls.clone()))
            .with(Fixed(Some(other), calls.clone()));

        assert_eq!(parsers.parse(&empty_form()).await, Some(found));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn falls_through_when_body_has_no_secret() {
        let calls = Arc::new(AtomicUsize::new(0));
        let fallback = ParsedSecret::shared_secret("basic".into(), "pw".into());
        let parsers = SecretParsers::new()
            .with(PostBodySecretParser::new(InputLengthRestrictions::unlimited()))
            .with(Fixed(Some(fallback.clone()), calls.clone()));

        assert_eq!(parsers.parse(&empty_form()).await, Some(fallback));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn empty_chain_finds_nothing() {
        assert_eq!(SecretParsers::new().parse(&empty_form()).await, None);
    }

    #[test]
    fn reports_one_method_per_parser() {
        let parsers = SecretParsers::new()
            .with(PostBodySecretParser::new(InputLengthRestrictions::unlimited()))
            .with(Fixed(None, Arc::new(AtomicUsize::new(0))));

        assert_eq!(
            parsers.supported_authentication_methods(),
            vec![AuthenticationMethod::ClientSecretPost; 2]
        );
        assert_eq!(format!("{:?}", parsers), "[ClientSecretPost, ClientSecretPost]");
    }
}
