pub mod error;

use std::sync::Arc;

use crate::auth::error::ClientAuthenticationError;
use crate::auth::SecretParsers;
use crate::core::models::ParsedSecret;
use crate::http::request::HttpRequest;
use warp::http::HeaderMap;
use warp::{Filter, Rejection};

use self::error::AuthRejection;

/// Runs the parser chain over the request body.
///
/// The body is streamed and cut off after `max_body_length` bytes. A body
/// that is too large, or already taken by another filter, counts as no
/// secret.
pub fn post_body_secret(
    parsers: Arc<SecretParsers>,
    max_body_length: usize,
) -> impl Filter<Extract = (Option<ParsedSecret>,), Error = Rejection> + Clone {
    warp::header::headers_cloned()
        .and(warp::body::stream())
        .and_then(move |headers: HeaderMap, body| {
            let parsers = Arc::clone(&parsers);
            async move {
                let request = HttpRequest::streamed(headers, body)
                    .with_max_body_length(max_body_length);
                Ok::<_, Rejection>(parsers.parse(&request).await)
            }
        })
        .or_else(|_: Rejection| async move { Ok::<_, Rejection>((None,)) })
}

pub fn client_secret(
    parsers: Arc<SecretParsers>,
    max_body_length: usize,
) -> impl Filter<Extract = (ParsedSecret,), Error = Rejection> + Clone {
    post_body_secret(parsers, max_body_length).and_then(
        |secret: Option<ParsedSecret>| async move {
            secret.ok_or_else(|| {
                warp::reject::custom(AuthRejection::from(
                    ClientAuthenticationError::invalid_client(),
                ))
            })
        },
    )
}
