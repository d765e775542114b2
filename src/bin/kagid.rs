use clap::Parser;

#[tokio::main]
async fn main() {
    use kagi::util::cli::*;

    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let opts = Options::parse();
    run_server(opts).await;
}
