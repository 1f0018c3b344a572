#![deny(warnings)]

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use session_feedback_core::analysis::{analyze, SessionReport};
use session_feedback_core::capture::{record_session, CaptureConfig, ImageDirSource};
use session_feedback_core::config::{
    resolve_api_url, CaptureInterval, DetectorConfig, RequestTimeout, StdEnv,
    DEFAULT_CAPTURE_INTERVAL_MS, DEFAULT_REQUEST_TIMEOUT_MS,
};
use session_feedback_core::detect::HttpEmotionDetector;
use session_feedback_core::report::render_text;
use session_feedback_core::session::{load_session, save_session};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const NOT_ENOUGH_DATA: &str =
    "Not enough data to generate feedback. Record a longer session with your face clearly visible.";

#[derive(Parser, Debug)]
#[command(name = "session-feedback")]
#[command(about = "Presentation feedback from webcam emotion-detection sessions")]
struct Args {
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score a recorded session file.
    Analyze {
        session: PathBuf,

        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Write the report here instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Record a session from a directory of stills, then score it.
    Record {
        #[arg(long)]
        images: PathBuf,

        #[arg(long)]
        out: PathBuf,

        /// Detection backend base URL; falls back to EMOTION_API_URL.
        #[arg(long)]
        api_url: Option<String>,

        #[arg(long, default_value_t = DEFAULT_CAPTURE_INTERVAL_MS)]
        interval_ms: u64,

        #[arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT_MS)]
        timeout_ms: u64,

        #[arg(long)]
        max_frames: Option<usize>,

        #[arg(long)]
        skip_health_check: bool,

        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    init_tracing(&args.log_level)?;

    match args.command {
        Command::Analyze {
            session,
            format,
            output,
        } => {
            let frames = load_session(&session)
                .with_context(|| format!("failed to load session {}", session.display()))?;
            tracing::info!(frames = frames.len(), "session loaded");
            emit(analyze(&frames), format, output.as_deref())
        }
        Command::Record {
            images,
            out,
            api_url,
            interval_ms,
            timeout_ms,
            max_frames,
            skip_health_check,
            format,
        } => {
            let mut detector_config = DetectorConfig::new(resolve_api_url(api_url, &StdEnv)?);
            detector_config.timeout = RequestTimeout::new(timeout_ms)?;
            let capture_config = CaptureConfig {
                interval: CaptureInterval::new(interval_ms)?,
                max_frames,
            };

            tracing::info!(
                api_url = %detector_config.api_url.as_url(),
                interval_ms,
                "config loaded"
            );

            let detector = HttpEmotionDetector::new(detector_config)?;
            if !skip_health_check {
                detector
                    .health()
                    .await
                    .context("detection backend is not reachable")?;
            }

            let mut source = ImageDirSource::open(&images)
                .with_context(|| format!("failed to open {}", images.display()))?;
            let recorder = record_session(&mut source, &detector, &capture_config).await?;

            save_session(&out, recorder.frames())
                .with_context(|| format!("failed to save session {}", out.display()))?;
            tracing::info!(path = %out.display(), frames = recorder.len(), "session saved");

            emit(analyze(recorder.frames()), format, None)
        }
    }
}

fn emit(
    report: Option<SessionReport>,
    format: Format,
    output: Option<&Path>,
) -> anyhow::Result<ExitCode> {
    let Some(report) = report else {
        eprintln!("{NOT_ENOUGH_DATA}");
        return Ok(ExitCode::from(2));
    };

    let rendered = match format {
        Format::Text => render_text(&report, chrono::Local::now()),
        Format::Json => serde_json::to_string_pretty(&report)?,
    };

    match output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "report written");
        }
        None => println!("{rendered}"),
    }
    Ok(ExitCode::SUCCESS)
}

fn init_tracing(level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(
            level
                .parse()
                .with_context(|| format!("invalid --log-level: {level}"))?,
        )
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_analyze_command() {
        let args = Args::try_parse_from([
            "session-feedback",
            "analyze",
            "session.json",
            "--format",
            "json",
        ])
        .expect("valid args");
        match args.command {
            Command::Analyze {
                session,
                format,
                output,
            } => {
                assert_eq!(session, PathBuf::from("session.json"));
                assert!(matches!(format, Format::Json));
                assert!(output.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn record_defaults() {
        let args = Args::try_parse_from([
            "session-feedback",
            "--log-level",
            "debug",
            "record",
            "--images",
            "stills",
            "--out",
            "session.json",
        ])
        .expect("valid args");
        assert_eq!(args.log_level, "debug");
        match args.command {
            Command::Record {
                interval_ms,
                timeout_ms,
                api_url,
                skip_health_check,
                ..
            } => {
                assert_eq!(interval_ms, DEFAULT_CAPTURE_INTERVAL_MS);
                assert_eq!(timeout_ms, DEFAULT_REQUEST_TIMEOUT_MS);
                assert!(api_url.is_none());
                assert!(!skip_health_check);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn missing_report_exits_with_code_two() {
        let code = emit(None, Format::Text, None).expect("handled");
        assert_eq!(code, ExitCode::from(2));
    }
}
