use anyhow::Context;
use clap::{Parser, Subcommand, ValueHint};
use clap_complete::Shell;
use std::path::PathBuf;
use std::process::ExitCode;

mod app;
mod commands;
mod config;
mod display;
mod error;
mod featured;
mod github;
mod jobs;
mod normalize;
mod resolver;
mod store;
mod suggest;
#[cfg(test)]
mod testing;
mod types;

use app::TechNerd;
use commands::{
    display_banner, featured_repository, generate_completions, run_session, search_everything,
};
use config::TechNerdConfig;

#[derive(Parser)]
#[command(name = "technerd")]
#[command(about = "Browse GitHub repositories, matching jobs and school suggestions", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
    /// Only warnings and errors
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    quiet: bool,
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
    /// Config file (defaults to ~/.config/technerd/config.json)
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Find a repository and a job posting for a keyword
    #[command(short_flag = 's', visible_alias = "find")]
    Search {
        /// Keyword(s), e.g. "machine learning"
        #[arg(num_args = 0.., trailing_var_arg = true)]
        query: Vec<String>,
    },
    /// Pick a random well-starred repository from a random organization
    #[command(short_flag = 'f')]
    Featured,
    /// Interactive session with selection history
    #[command(visible_alias = "repl")]
    Session,
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_logging(cli: &Cli) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    // reqwest/hyper are noisy at debug
    if !cli.verbose {
        builder.filter_module("hyper", log::LevelFilter::Warn);
        builder.filter_module("reqwest", log::LevelFilter::Warn);
    }
    builder.target(env_logger::Target::Stderr).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(&cli);

    let command = match cli.command {
        None => {
            display_banner();
            return Ok(ExitCode::SUCCESS);
        }
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
            return Ok(ExitCode::SUCCESS);
        }
        Some(command) => command,
    };

    let config = TechNerdConfig::load(cli.config.as_deref()).context("loading configuration")?;
    let mut app = TechNerd::from_config(&config).context("setting up API clients")?;

    let ok = match command {
        Commands::Search { query } => search_everything(&mut app, &query.join(" "), cli.json).await?,
        Commands::Featured => featured_repository(&mut app, cli.json).await?,
        Commands::Session => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            run_session(&mut app, stdin).await?
        }
        Commands::Completions { .. } => true,
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
