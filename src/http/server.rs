use std::net::SocketAddr;
use std::sync::Arc;

use warp::Filter;

use crate::auth::SecretParsers;
use crate::core::models::ParsedSecret;

use super::encoding::{client_secret, error::handle_reject};
use super::response::SecretInfo;

#[derive(Debug)]
pub struct Server {
    parsers: Arc<SecretParsers>,
    max_body_length: usize,
}

pub fn routes(
    parsers: Arc<SecretParsers>,
    max_body_length: usize,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let secret = warp::path!("client" / "v1" / "secret")
        .and(warp::post())
        .and(client_secret(parsers, max_body_length))
        .map(|secret: ParsedSecret| warp::reply::json(&SecretInfo::from(secret)));

    secret
        .recover(handle_reject)
        .with(warp::log("http-api"))
}

impl Server {
    pub fn new(parsers: Arc<SecretParsers>, max_body_length: usize) -> Self {
        Self {
            parsers,
            max_body_length,
        }
    }

    pub async fn serve(self, addr: impl Into<SocketAddr>) {
        let routes = routes(self.parsers, self.max_body_length);
        warp::serve(routes).run(addr).await;
    }
}
