use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use lexiscan::config::Config;
use lexiscan::error::LsResult;
use lexiscan::types::ExtractionStatus;
use std::process;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file with analysis settings; flags typed on the command line win
    #[arg(global = true, long = "config")]
    config_file: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rank the most frequent letter combinations of a text file
    Analyze(cmd::analyze::AnalyzeArgs),
    /// Count the words of a text file
    Words(cmd::words::WordsArgs),
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_config(
    cli_config: &Config,
    file: Option<&str>,
    matches: Option<&ArgMatches>,
) -> LsResult<Config> {
    let config = match (file, matches) {
        (Some(path), Some(sub_matches)) => {
            info!("Loading settings from: {}", path);
            let mut config = Config::load_from_file(path)?;
            config.merge_from_cli(cli_config, sub_matches);
            config
        }
        (Some(path), None) => Config::load_from_file(path)?,
        (None, _) => cli_config.clone(),
    };
    config.validate()?;
    Ok(config)
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    init_logging(cli.debug);

    let (cli_config, sub_matches) = match &cli.command {
        Commands::Analyze(args) => (&args.config, matches.subcommand_matches("analyze")),
        Commands::Words(args) => (&args.config, matches.subcommand_matches("words")),
    };

    let config = resolve_config(cli_config, cli.config_file.as_deref(), sub_matches)
        .unwrap_or_else(|e| {
            error!("{}", e);
            process::exit(1);
        });

    let result = match &cli.command {
        Commands::Analyze(args) => cmd::analyze::run(args, config),
        Commands::Words(args) => cmd::words::run(args, config),
    };

    match result {
        Ok(ExtractionStatus::OpenError) => process::exit(1),
        Ok(_) => {}
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    }
}
