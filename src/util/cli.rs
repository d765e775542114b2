use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tracing::{event, Level};

use crate::auth::{PostBodySecretParser, SecretParsers};
use crate::core::models::InputLengthRestrictions;
use crate::http::server::Server;

#[derive(Parser, Debug)]
#[clap(
    name = "kagid",
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS")
)]
pub struct Options {
    /// Address the HTTP server listens on
    #[clap(long, env = "KAGI_BIND", default_value = "127.0.0.1:8001")]
    pub bind: SocketAddr,
    #[clap(long, env = "CLIENT_ID_MAX_LENGTH", default_value = "100")]
    pub client_id_max_length: usize,
    #[clap(long, env = "CLIENT_SECRET_MAX_LENGTH", default_value = "100")]
    pub client_secret_max_length: usize,
    /// Largest POST body accepted, in bytes
    #[clap(long, env = "MAX_BODY_LENGTH", default_value = "16384")]
    pub max_body_length: usize,
}

impl Options {
    pub fn input_length_restrictions(&self) -> InputLengthRestrictions {
        InputLengthRestrictions::new(self.client_id_max_length, self.client_secret_max_length)
    }

    pub fn secret_parsers(&self) -> SecretParsers {
        SecretParsers::new().with(PostBodySecretParser::new(self.input_length_restrictions()))
    }
}

pub async fn run_server(opts: Options) {
    let parsers = Arc::new(opts.secret_parsers());

    event!(
        Level::INFO,
        bind = %opts.bind,
        methods = ?parsers.supported_authentication_methods(),
        "Starting kagid"
    );

    Server::new(parsers, opts.max_body_length)
        .serve(opts.bind)
        .await;
}
