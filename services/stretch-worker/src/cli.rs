//! Command-line surface of the stretch worker.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

use radar_stretch::{SamplingMode, Viewport};

use crate::service::{FrameService, StretchRequest};

#[derive(Parser, Debug)]
#[command(name = "stretch-worker")]
#[command(about = "Decode radar GIF frames and render viewports to PNG")]
pub struct Args {
    /// Maximum concurrent decode/stretch jobs
    #[arg(long, env = "STRETCH_MAX_CONCURRENCY")]
    pub max_concurrency: Option<usize>,

    /// Log level
    #[arg(long, default_value = "info", env = "LOG_LEVEL")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print frame dimensions and color count as JSON
    Info {
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Stretch a viewport of a frame and write it as PNG
    Render {
        #[arg(short, long)]
        input: PathBuf,

        /// Viewport as left,right,top,bottom in source pixels
        #[arg(long, allow_hyphen_values = true)]
        viewport: Viewport,

        #[arg(long)]
        width: u32,

        #[arg(long)]
        height: u32,

        /// Blank low intensities with the filtered palette
        #[arg(long, conflicts_with = "unfiltered")]
        filtered: bool,

        /// Use the unfiltered palette even when filtering is the configured default
        #[arg(long)]
        unfiltered: bool,

        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameInfo {
    pub width: u32,
    pub height: u32,
    pub color_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderSummary {
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub sampling: SamplingMode,
    pub bytes: usize,
}

/// Decode a frame file and report its geometry.
pub async fn info(service: &FrameService, input: &Path) -> Result<FrameInfo> {
    let bytes = tokio::fs::read(input)
        .await
        .with_context(|| format!("reading {}", input.display()))?;
    let frame = service.decode(bytes.into()).await?;
    Ok(FrameInfo {
        width: frame.width(),
        height: frame.height(),
        color_count: frame.colors().len(),
    })
}

/// Decode a frame file, stretch `request` and write the PNG to `output`.
pub async fn render(
    service: &FrameService,
    input: &Path,
    request: StretchRequest,
    output: &Path,
) -> Result<RenderSummary> {
    let bytes = tokio::fs::read(input)
        .await
        .with_context(|| format!("reading {}", input.display()))?;
    let frame = service.decode(bytes.into()).await?;

    let (width, height) = (request.width, request.height);
    let (sampling, png) = service.render_preview(frame, request).await?;
    tokio::fs::write(output, &png)
        .await
        .with_context(|| format!("writing {}", output.display()))?;

    info!(output = %output.display(), bytes = png.len(), sampling = %sampling, "Wrote preview");
    Ok(RenderSummary {
        output: output.to_path_buf(),
        width,
        height,
        sampling,
        bytes: png.len(),
    })
}

/// Explicit flags win over the configured default.
fn resolve_filtered(filtered: bool, unfiltered: bool, default: bool) -> bool {
    match (filtered, unfiltered) {
        (true, _) => true,
        (_, true) => false,
        _ => default,
    }
}

/// Execute a parsed command, returning its JSON report.
pub async fn execute(service: &FrameService, command: Command) -> Result<String> {
    match command {
        Command::Info { input } => {
            let report = info(service, &input).await?;
            Ok(serde_json::to_string(&report)?)
        }
        Command::Render {
            input,
            viewport,
            width,
            height,
            filtered,
            unfiltered,
            output,
        } => {
            let filtered = resolve_filtered(filtered, unfiltered, service.config().default_filtered);
            let request = StretchRequest::new(viewport, width, height).filtered(filtered);
            let report = render(service, &input, request, &output).await?;
            Ok(serde_json::to_string(&report)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_render_with_negative_viewport() {
        let args = Args::try_parse_from([
            "stretch-worker",
            "render",
            "--input",
            "in.gif",
            "--viewport",
            "-2.5,10,0,8",
            "--width",
            "256",
            "--height",
            "128",
            "--filtered",
            "--output",
            "out.png",
        ])
        .unwrap();

        match args.command {
            Command::Render {
                viewport,
                width,
                filtered,
                ..
            } => {
                assert_eq!(viewport, Viewport::new(-2.5, 10.0, 0.0, 8.0));
                assert_eq!(width, 256);
                assert!(filtered);
            }
            other => panic!("expected render, got {:?}", other),
        }
    }

    #[test]
    fn test_filtered_flags_conflict() {
        let parsed = Args::try_parse_from([
            "stretch-worker",
            "render",
            "-i",
            "in.gif",
            "--viewport",
            "0,4,0,4",
            "--width",
            "8",
            "--height",
            "8",
            "--filtered",
            "--unfiltered",
            "-o",
            "out.png",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_resolve_filtered() {
        assert!(resolve_filtered(false, false, true));
        assert!(!resolve_filtered(false, true, true));
        assert!(resolve_filtered(true, false, false));
        assert!(!resolve_filtered(false, false, false));
    }

    #[test]
    fn test_bad_viewport_rejected() {
        let parsed = Args::try_parse_from([
            "stretch-worker",
            "render",
            "-i",
            "in.gif",
            "--viewport",
            "1,2,3",
            "--width",
            "1",
            "--height",
            "1",
            "-o",
            "out.png",
        ]);
        assert!(parsed.is_err());
    }
}
