use blog_search::cli::{Cli, run};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries command output; diagnostics go to stderr
    blog_search::tracing::init();

    let cli = Cli::parse();
    let output = run(cli).await.inspect_err(|e| {
        tracing::error!("blog-search failed: {:#}", e);
    })?;
    print!("{output}");

    Ok(())
}
