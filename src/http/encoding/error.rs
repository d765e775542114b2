use crate::auth::error::ClientAuthenticationError;
use warp::{Rejection, Reply};

#[derive(Debug, Clone)]
pub enum AuthRejection {
    InvalidClient(ClientAuthenticationError),
}

impl warp::reject::Reject for AuthRejection {}

impl From<ClientAuthenticationError> for AuthRejection {
    fn from(error: ClientAuthenticationError) -> Self {
        Self::InvalidClient(error)
    }
}

pub async fn handle_reject(err: Rejection) -> Result<impl Reply, Rejection> {
    match err.find::<AuthRejection>() {
        Some(AuthRejection::InvalidClient(e)) => {
            let resp = warp::reply::json(e);
            Ok(warp::reply::with_status(resp, warp::http::StatusCode::UNAUTHORIZED).into_response())
        }
        _ => Err(err),
    }
}
