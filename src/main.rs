// Manna - Scripture study assistant
// Main entry point

use anyhow::Result;
use clap::Parser;

use manna::cli::{print_wisdom, Repl};
use manna::config::load_config;
use manna::wisdom::get_wisdom;
use manna::wisdom::types::Version;

#[derive(Parser)]
#[command(
    name = "manna",
    about = "Scripture study assistant with pluggable AI providers",
    version
)]
struct Args {
    /// Translation to answer from (NIV, KJV, ESV, NLT, NKJV, NASB)
    #[arg(short, long)]
    translation: Option<String>,

    /// Ask a single question and exit; omit to start the interactive REPL
    question: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    // Load configuration
    let mut config = load_config()?;

    if let Some(requested) = args.translation {
        config.default_version = requested
            .parse::<Version>()
            .map_err(|message| anyhow::anyhow!(message))?;
    }

    // One-shot question: dispatch once, print, exit
    if !args.question.is_empty() {
        let question = args.question.join(" ");
        let wisdom = get_wisdom(&question, config.default_version, &config.provider).await;
        let failed = wisdom.is_error();
        print_wisdom(&wisdom);
        if failed {
            std::process::exit(1);
        }
        return Ok(());
    }

    let mut repl = Repl::new(config)?;
    repl.run().await
}
