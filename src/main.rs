use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

use skillswap::Page;
use skillswap::core::config::{SkillSwapConfig, load_config, resolve};
use skillswap::tui;

#[derive(Parser)]
#[command(name = "skillswap", about = "Skill-exchange social platform in the terminal")]
struct Args {
    /// Page to open on start (skips the login screen unless `login`)
    #[arg(short, long, value_enum)]
    page: Option<Page>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to skillswap.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("skillswap.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let config = load_config().unwrap_or_else(|e| {
        log::warn!("Falling back to default config: {}", e);
        SkillSwapConfig::default()
    });
    let resolved = resolve(&config, args.page);

    log::info!(
        "SkillSwap starting up on page {:?} as {}",
        resolved.start_page,
        resolved.user_name
    );

    tui::run(resolved)
}
