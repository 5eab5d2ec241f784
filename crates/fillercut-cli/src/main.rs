//! Filler-word removal pipeline binary.

use clap::Parser;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use fillercut_cli::cli::{Cli, Commands};
use fillercut_cli::config::{default_out_dir, CutOptions, SplitOptions};
use fillercut_cli::outputs::{MANIFEST_FILE, TIMESTAMPS_FILE};
use fillercut_cli::pipeline;
use fillercut_cli::transcriber::CommandTranscriber;
use fillercut_cli::PipelineResult;

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Colored output for dev, JSON when LOG_FORMAT=json
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("fillercut=info"));

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        error!("{e}");
        eprintln!("error: {e}");
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> PipelineResult<()> {
    match cli.command {
        Commands::Split { input, split } => {
            let opts = SplitOptions::from_args(&split, &input)?;
            pipeline::run_split(&input, &opts).await?;
        }

        Commands::Transcribe {
            manifest,
            transcribe,
        } => {
            let transcriber = CommandTranscriber::from_command_line(&transcribe.transcriber_cmd)?;
            pipeline::run_transcribe(&manifest, &transcriber).await?;
        }

        Commands::Merge { manifest } => {
            pipeline::run_merge(&manifest).await?;
        }

        Commands::Cut {
            input,
            transcript,
            cut,
            encode,
        } => {
            let opts = CutOptions::from_args(&cut, &encode, &input)?;
            let transcript_path = transcript
                .unwrap_or_else(|| default_out_dir(&input).join(TIMESTAMPS_FILE));
            let words = pipeline::load_merged_transcript(&transcript_path).await?;
            let plan = pipeline::run_cut(&input, &opts, &words).await?;
            pipeline::print_cut_summary(&plan, &opts.output);
        }

        Commands::Run {
            input,
            split,
            transcribe,
            cut,
            encode,
        } => {
            let split_opts = SplitOptions::from_args(&split, &input)?;
            let cut_opts = CutOptions::from_args(&cut, &encode, &input)?;

            pipeline::run_split(&input, &split_opts).await?;

            let manifest = split_opts.out_dir.join(MANIFEST_FILE);
            let transcriber = CommandTranscriber::from_command_line(&transcribe.transcriber_cmd)?;
            pipeline::run_transcribe(&manifest, &transcriber).await?;

            let words = pipeline::run_merge(&manifest).await?;
            let plan = pipeline::run_cut(&input, &cut_opts, &words).await?;
            pipeline::print_cut_summary(&plan, &cut_opts.output);
        }
    }

    Ok(())
}
