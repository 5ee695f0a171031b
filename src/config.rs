//! Application settings and command line handling.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::catalog::{default_images, ImageSource};
use crate::error::Result;
use crate::style::DrawingStyle;

/// Log verbosity, used as the default `env_logger` filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub log_level: LogLevel,
    pub window_size: [f32; 2],
    pub style: DrawingStyle,
    pub images: Vec<ImageSource>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            window_size: [1280.0, 800.0],
            style: DrawingStyle::default(),
            images: default_images(),
        }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

// ── Command line ────────────────────────────────────────────────────────────

pub const USAGE: &str = "Usage: polymask [--config FILE] [IMAGE...]";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CliArgs {
    pub config: Option<PathBuf>,
    pub images: Vec<PathBuf>,
    pub help: bool,
}

impl CliArgs {
    /// Parse arguments, program name excluded.
    pub fn parse<I>(args: I) -> std::result::Result<Self, String>
    where
        I: IntoIterator<Item = String>,
    {
        let mut parsed = CliArgs::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => parsed.help = true,
                "-c" | "--config" => {
                    let path = args.next().ok_or("--config needs a file")?;
                    parsed.config = Some(PathBuf::from(path));
                }
                flag if flag.starts_with('-') => return Err(format!("unknown option {flag}")),
                _ => parsed.images.push(PathBuf::from(arg)),
            }
        }
        Ok(parsed)
    }

    /// Settings from the config file (or defaults), with images given on the
    /// command line replacing the configured gallery.
    pub fn resolve(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load(path)?,
            None => AppConfig::default(),
        };
        if !self.images.is_empty() {
            config.images = self
                .images
                .iter()
                .enumerate()
                .map(|(i, path)| {
                    let title = path
                        .file_stem()
                        .and_then(|s| s.to_str())
                        .unwrap_or("untitled");
                    ImageSource::new(format!("img{:03}", i + 1), title, path.clone())
                })
                .collect();
        }
        Ok(config)
    }
}
