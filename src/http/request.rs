use std::fmt;
use std::pin::Pin;

use async_trait::async_trait;
use tokio::sync::{Mutex, OnceCell};
use tokio_stream::{Stream, StreamExt};
use warp::http::{header::CONTENT_TYPE, HeaderMap, Request};
use warp::hyper::body::{Body, Buf, Bytes};

use crate::auth::request::{BodyError, IncomingRequest};

type BodyStream = Pin<Box<dyn Stream<Item = Result<Bytes, BodyError>> + Send>>;

/// An HTTP request whose body is pulled from the transport on first use and
/// cached for every later reader.
pub struct HttpRequest {
    headers: HeaderMap,
    body: Mutex<Option<BodyStream>>,
    buffered: OnceCell<Bytes>,
    max_body_length: Option<usize>,
}

impl HttpRequest {
    pub fn new(request: Request<Body>) -> Self {
        let (parts, body) = request.into_parts();
        Self::streamed(parts.headers, body)
    }

    /// Wraps a chunked body, such as hyper's `Body` or `warp::body::stream()`.
    pub fn streamed<S, B, E>(headers: HeaderMap, body: S) -> Self
    where
        S: Stream<Item = Result<B, E>> + Send + 'static,
        B: Buf,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        let body = body.map(|chunk| {
            chunk
                .map(|mut buf| buf.copy_to_bytes(buf.remaining()))
                .map_err(|e| BodyError::Read(e.into()))
        });

        Self {
            headers,
            body: Mutex::new(Some(Box::pin(body))),
            buffered: OnceCell::new(),
            max_body_length: None,
        }
    }

    pub fn buffered(headers: HeaderMap, body: Bytes) -> Self {
        Self {
            headers,
            body: Mutex::new(None),
            buffered: OnceCell::from(body),
            max_body_length: None,
        }
    }

    pub fn with_max_body_length(mut self, max: usize) -> Self {
        self.max_body_length = Some(max);
        self
    }

    async fn read_stream(&self) -> Result<Bytes, BodyError> {
        let mut body = self.body.lock().await.take().ok_or(BodyError::Consumed)?;
        let mut buf = Vec::new();

        while let Some(chunk) = body.next().await {
            let chunk = chunk?;
            if let Some(max) = self.max_body_length {
                if buf.len() + chunk.len() > max {
                    return Err(BodyError::TooLarge(max));
                }
            }
            buf.extend_from_slice(&chunk);
        }

        Ok(Bytes::from(buf))
    }
}

impl fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpRequest")
            .field("headers", &self.headers)
            .field("buffered", &self.buffered.get().map(Bytes::len))
            .field("max_body_length", &self.max_body_length)
            .finish()
    }
}

impl From<Request<Body>> for HttpRequest {
    fn from(request: Request<Body>) -> Self {
        Self::new(request)
    }
}

#[async_trait]
impl IncomingRequest for HttpRequest {
    fn content_type(&self) -> Option<&str> {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    }

    async fn body(&self) -> Result<Bytes, BodyError> {
        let body = self.buffered.get_or_try_init(|| self.read_stream()).await?;
        Ok(body.clone())
    }
}
