use clap::Parser;
use slack_emoji_rankings::Cli;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "slack_emoji_rankings=info".into()),
        )
        .init();

    // slack-morphism's hyper connector needs a process-wide rustls provider.
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let cli = Cli::parse();

    if let Err(e) = slack_emoji_rankings::run_emoji_rankings_async(&cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
