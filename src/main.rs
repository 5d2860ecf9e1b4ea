use cardloader::{
    api::HttpMovieApi, config::Config, context::PageContext, page::Page,
    scheduler::TokioTimers, types::PageSeed,
};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Pre-render a movie page: load every batch and print the resulting HTML
#[derive(Parser, Debug)]
#[command(name = "cardloader")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON page seed (`{"page": "evaluate", "movies": [...]}` and friends)
    seed: PathBuf,

    /// Config file path
    #[arg(short, long, default_value = "config/default.toml")]
    config: String,

    /// Stop after this many trigger rounds even if loaders remain
    #[arg(long, default_value_t = 1000)]
    max_rounds: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let config = Config::load(&cli.config)?;
    info!("cardloader starting with config: {:?}", config);

    let seed: PageSeed = serde_json::from_str(&std::fs::read_to_string(&cli.seed)?)?;

    let api = Arc::new(HttpMovieApi::new(&config.api)?);
    let ctx = PageContext::new(config, api, Arc::new(TokioTimers::new()))?;
    let page = Page::new(ctx.clone());

    page.setup(seed).await?;
    let report = page.load_all(cli.max_rounds).await;
    info!(rounds = report.rounds, completed = report.completed, "pre-render finished");

    println!("{}", ctx.render_html().await?);
    Ok(())
}
