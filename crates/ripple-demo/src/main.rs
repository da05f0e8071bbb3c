//! Ripple demo - walks through the two ways of using an emitter.
//!
//! `basic` binds a handler on a plain emitter, reports an error payload and
//! unbinds. `carousel` embeds an emitter in a slideshow that announces each
//! slide change.

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use ripple::{Emitter, EmitterConfig, Event, EventSource, Handler};
use serde_json::json;
use std::path::PathBuf;
use tracing_subscriber::filter::EnvFilter;

mod carousel;

use carousel::{ADVANCED, Carousel};

#[derive(Parser)]
#[command(name = "ripple-demo", version, about = "Ripple event emitter walkthrough")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Emitter config file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Bind, emit and unbind on a standalone emitter
    Basic {
        #[arg(long, default_value = "Refrigerator unable to connect to Facebook")]
        message: String,
    },
    /// Advance a slideshow that emits an event per slide change
    Carousel {
        #[arg(long, default_value_t = 3)]
        slides: usize,
        #[arg(long, default_value_t = 1)]
        advances: usize,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;
    tracing::debug!(?config, "Emitter config loaded");

    match cli.command {
        Commands::Basic { message } => run_basic(config, message)?,
        Commands::Carousel { slides, advances } => run_carousel(config, slides, advances)?,
    }

    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> Result<EmitterConfig> {
    let Some(path) = path else {
        return Ok(EmitterConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    Ok(EmitterConfig::from_json(&text)?)
}

/// Render an error event as `"<type>: <message>"`, if it carries a message.
fn describe_error(event: &Event<'_>) -> Option<String> {
    let message = event.data()?.get("message")?.as_str()?;
    Some(format!("{}: {}", event.event_type(), message))
}

fn run_basic(config: EmitterConfig, message: String) -> Result<()> {
    let emitter: Emitter = Emitter::with_config(config);
    let handler: Handler = Handler::from_fn(|event: &Event<'_>| {
        if let Some(line) = describe_error(event) {
            println!("{line}");
        }
    });

    emitter.on("error", handler.clone());
    emitter
        .emit("error", Some(json!({ "message": message })))
        .map_err(|e| anyhow!(e))?;
    emitter.off("error", &handler);

    // Nothing is bound any more, so this one goes nowhere.
    emitter
        .emit("error", Some(json!({ "message": "unheard" })))
        .map_err(|e| anyhow!(e))?;

    tracing::info!(bound = emitter.has_listeners("error"), "Basic demo finished");
    Ok(())
}

fn run_carousel(config: EmitterConfig, slides: usize, advances: usize) -> Result<()> {
    let mut carousel = Carousel::new(slides, config);
    carousel.listen(ADVANCED, |event| {
        let advanced = event.data().ok_or("advanced event without payload")?;
        println!("{} of {}", advanced.new_index + 1, advanced.slide_count);
        tracing::debug!(payload = %serde_json::to_string(advanced)?, "Slide changed");
        Ok(())
    });

    for _ in 0..advances {
        carousel.advance().map_err(|e| anyhow!(e))?;
    }

    tracing::info!(index = carousel.index(), "Carousel demo finished");
    Ok(())
}
