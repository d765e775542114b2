use std::fmt;

use async_trait::async_trait;
use warp::hyper::body::Bytes;

/// The parts of an inbound request a secret parser may look at.
///
/// Implementations must hand out the same bytes for every call to
/// [`IncomingRequest::body`], reading the underlying transport at most once.
#[async_trait]
pub trait IncomingRequest: Send + Sync {
    fn content_type(&self) -> Option<&str>;
    async fn body(&self) -> Result<Bytes, BodyError>;
}

#[derive(Debug)]
pub enum BodyError {
    Read(Box<dyn std::error::Error + Send + Sync>),
    TooLarge(usize),
    Consumed,
}

impl fmt::Display for BodyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read(e) => write!(f, "failed to read request body: {}", e),
            Self::TooLarge(max) => write!(f, "request body exceeds {} bytes", max),
            Self::Consumed => f.write_str("request body was already consumed"),
        }
    }
}

impl std::error::Error for BodyError {}
