//! `codereel` binary: load config, apply flags, run the terminal front-end.

use anyhow::{Context, Result};
use clap::Parser;
use codereel::{Config, RevealUnit, Theme, ZoomLevel};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "codereel", version, about = "Replay source code with a syntax-highlighted typing animation")]
struct Args {
    /// Source file to load into the editor. Without it a short example is used.
    file: Option<PathBuf>,

    /// Theme: Dracula, GitHub, "Night Owl", "Duotone Light" or "VS Dark".
    #[arg(long, value_parser = parse_theme)]
    theme: Option<Theme>,

    /// Zoom level (1 or 2).
    #[arg(long, value_parser = parse_zoom)]
    zoom: Option<ZoomLevel>,

    /// Language tag for highlighting (tsx, rs, py, ...).
    #[arg(long)]
    language: Option<String>,

    /// Milliseconds between two revealed characters.
    #[arg(long = "interval-ms")]
    interval_ms: Option<u64>,

    /// Reveal unit: char or grapheme.
    #[arg(long, value_parser = parse_unit)]
    unit: Option<RevealUnit>,

    /// JSON configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write logs to this file (verbosity from RUST_LOG, default info).
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Print the available themes and exit.
    #[arg(long = "list-themes")]
    list_themes: bool,
}

fn parse_theme(s: &str) -> codereel::Result<Theme> {
    s.parse()
}

fn parse_zoom(s: &str) -> std::result::Result<ZoomLevel, String> {
    let level: u8 = s.parse().map_err(|_| format!("invalid zoom level '{s}' (expected 1 or 2)"))?;
    ZoomLevel::try_from(level).map_err(|e| e.to_string())
}

fn parse_unit(s: &str) -> codereel::Result<RevealUnit> {
    s.parse()
}

impl Args {
    /// Merge the config file (if any) with the flags; flags win.
    fn into_config(self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path).with_context(|| format!("loading config {}", path.display()))?,
            None => Config::default(),
        };
        if let Some(file) = &self.file {
            config.source = std::fs::read_to_string(file)
                .with_context(|| format!("reading source file {}", file.display()))?;
            if self.language.is_none() {
                if let Some(ext) = file.extension().and_then(|e| e.to_str()) {
                    config.language = ext.to_string();
                }
            }
        }
        if let Some(theme) = self.theme {
            config.theme = theme;
        }
        if let Some(zoom) = self.zoom {
            config.zoom = zoom;
        }
        if let Some(language) = self.language {
            config.language = language;
        }
        if let Some(interval_ms) = self.interval_ms {
            config.typing.interval_ms = interval_ms;
        }
        if let Some(unit) = self.unit {
            config.typing.unit = unit;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.list_themes {
        for theme in Theme::ALL {
            println!("{theme}");
        }
        return Ok(());
    }

    codereel::logging::init(args.log_file.as_deref()).context("opening log file")?;
    let config = args.into_config()?;
    codereel::app::run(&config).context("terminal front-end failed")?;
    Ok(())
}
