// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Figspline: X-spline curves with local shape editing for a figure editor

use anyhow::{Context, Result};
use std::path::PathBuf;

pub mod editing;
pub mod geometry;
pub mod model;
pub mod render;
pub mod settings;

#[cfg(test)]
mod testing;

use editing::{MemoryDocument, ShapeEditor};
use geometry::bounds;
use model::Spline;
use render::TraceRenderer;
use settings::EditorConfig;

const USAGE: &str = "Usage: figspline <spline.json> [--config editor.toml] \
                     [--edit INDEX | --at X,Y] [--value V | --angular] [--cancel]";

/// What to do with the loaded spline
#[derive(Debug, Clone, PartialEq, Default)]
struct Options {
    spline_path: PathBuf,
    config_path: Option<PathBuf>,
    edit: Option<usize>,
    /// Pick the edit target by position instead of index
    at: Option<(i32, i32)>,
    value: Option<f64>,
    angular: bool,
    cancel: bool,
}

/// Entry point for the figspline command-line driver
pub fn run() -> Result<()> {
    // Initialize tracing subscriber (can be controlled via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("figspline=info".parse()?),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_args(&args).context(USAGE)?;

    let config = match &options.config_path {
        Some(path) => EditorConfig::load(path)?,
        None => EditorConfig::default(),
    };

    let text = std::fs::read_to_string(&options.spline_path)
        .with_context(|| format!("Failed to read {}", options.spline_path.display()))?;
    let mut spline: Spline = serde_json::from_str(&text)
        .with_context(|| format!("Invalid spline in {}", options.spline_path.display()))?;

    tracing::info!(
        "Loaded {} spline with {} points",
        if spline.is_closed() { "closed" } else { "open" },
        spline.point_count()
    );
    println!("bounds: {:?}", bounds(&spline)?);
    let samples = geometry::xspline::flatten(&spline, config.flatten_resolution);
    println!("curve: {} samples", samples.len());

    let target = match (options.edit, options.at) {
        (Some(index), _) => Some(index),
        (None, Some((x, y))) => Some(spline.find_nearest_point(x, y, config.hit_tolerance)?),
        (None, None) => None,
    };
    if let Some(index) = target {
        run_edit(&mut spline, index, &options, &config)?;
        println!("{}", serde_json::to_string_pretty(&spline)?);
    }
    Ok(())
}

/// Run one complete edit session on point `index`
fn run_edit(
    spline: &mut Spline,
    index: usize,
    options: &Options,
    config: &EditorConfig,
) -> Result<()> {
    let mut editor = ShapeEditor::with_overlay(config.overlay.style());
    let mut renderer = TraceRenderer::default();
    let mut document = MemoryDocument::default();

    if let Err(e) = editor.begin(spline, index, &document) {
        // Shown to the user the way the canvas would show it
        println!("status: {e}");
        return Ok(());
    }

    let before = match editor.window() {
        Some(window) => {
            let points: Vec<_> = window.spline().points().map(|p| (p.x, p.y)).collect();
            println!("window: {:?} (target at {})", points, window.target());
            bounds(window.spline())?
        }
        None => {
            println!("window: whole spline");
            bounds(spline)?
        }
    };

    if options.angular {
        editor.snap_angular(spline, &mut renderer, &mut document)?;
    } else if let Some(value) = options.value {
        editor.set_value(spline, value, &mut renderer, &mut document)?;
    }

    // Old and new curve both need repainting
    let after = match editor.window() {
        Some(window) => bounds(window.spline())?,
        None => bounds(spline)?,
    };
    println!("redraw: {:?}", before.union(after));

    if options.cancel {
        editor.cancel(spline, &mut renderer, &mut document)?;
        println!("status: edit cancelled");
    } else {
        let factor = editor.commit(spline, &mut renderer, &mut document)?;
        println!("status: point {} set to {}", index, factor.value());
    }
    tracing::debug!(
        "{} paints, {} erases, modified: {}",
        renderer.paints,
        renderer.erases,
        document.modified
    );
    Ok(())
}

fn parse_args(args: &[String]) -> Result<Options> {
    let mut options = Options::default();
    let mut spline_path = None;
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let path = iter.next().context("--config needs a path")?;
                options.config_path = Some(PathBuf::from(path));
            }
            "--edit" => {
                let index = iter.next().context("--edit needs a point index")?;
                options.edit = Some(index.parse().context("Invalid point index")?);
            }
            "--at" => {
                let pos = iter.next().context("--at needs a position X,Y")?;
                options.at = Some(parse_position(pos)?);
            }
            "--value" => {
                let value = iter.next().context("--value needs a number")?;
                options.value = Some(value.parse().context("Invalid shape value")?);
            }
            "--angular" => options.angular = true,
            "--cancel" => options.cancel = true,
            flag if flag.starts_with("--") => anyhow::bail!("Unknown option {flag}"),
            path => {
                if spline_path.replace(PathBuf::from(path)).is_some() {
                    anyhow::bail!("Only one spline file can be given");
                }
            }
        }
    }

    options.spline_path = spline_path.context("No spline file given")?;
    let has_target = options.edit.is_some() || options.at.is_some();
    if options.edit.is_some() && options.at.is_some() {
        anyhow::bail!("Give either --edit or --at, not both");
    }
    if !has_target && (options.value.is_some() || options.angular || options.cancel) {
        anyhow::bail!("--value, --angular and --cancel need --edit or --at");
    }
    Ok(options)
}

fn parse_position(text: &str) -> Result<(i32, i32)> {
    let (x, y) = text
        .split_once(',')
        .with_context(|| format!("Invalid position '{text}', expected X,Y"))?;
    let x = x.trim().parse().context("Invalid x coordinate")?;
    let y = y.trim().parse().context("Invalid y coordinate")?;
    Ok((x, y))
}
