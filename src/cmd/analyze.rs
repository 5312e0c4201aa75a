use crate::reports;
use clap::Args;
use lexiscan::config::Config;
use lexiscan::error::LsResult;
use lexiscan::pipeline::{Pipeline, PipelineEvent};
use lexiscan::types::ExtractionStatus;
use std::path::PathBuf;
use tracing::{error, info, warn};

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Text file to analyze
    pub file: PathBuf,

    #[command(flatten)]
    pub config: Config,

    /// Print the result as JSON instead of a table
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: &AnalyzeArgs, config: Config) -> LsResult<ExtractionStatus> {
    info!("📂 Analyzing: {}", args.file.display());

    let handle = Pipeline::spawn(&args.file, config)?;
    let summary = handle.wait_with(|event| match event {
        PipelineEvent::TopK(list) => {
            if let Some(leader) = list.first() {
                info!(
                    "Top updated: '{}' x{} ({} entries)",
                    leader.text,
                    leader.count,
                    list.len()
                );
            }
        }
        PipelineEvent::WordsProcessed(n) => info!("Words processed: {}", n),
        _ => {}
    });

    let status = summary.status.unwrap_or(ExtractionStatus::Interrupted);
    match status {
        ExtractionStatus::OpenError => {
            error!("❌ File not found or unreadable: {}", args.file.display());
            return Ok(status);
        }
        ExtractionStatus::Interrupted => warn!("⚠️  Analysis was interrupted"),
        ExtractionStatus::Finished => {}
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        reports::print_ranking(&args.file.display().to_string(), &summary);
    }

    Ok(status)
}
