//! Application configuration
//!
//! Loaded from an optional JSON file, then overridden by command line flags.
//! Every field has a default so a partial file is fine.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::sphere::SphereParams;

pub const DEFAULT_CONFIG_PATH: &str = "sphere.json";

/// Largest accepted sphere magnification
pub const MAX_SCALE: u32 = 32;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window_width: u32,
    pub window_height: u32,
    /// Logical canvas the spheres draw into; stretched to the window
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub scale: u32,
    pub thickness: i32,
    pub max_stretch: f64,
    pub fps: u32,
    pub vsync: bool,
    pub sprite: Option<PathBuf>,
    pub seed: Option<u64>,
    /// Reset anchors land within ± this many pixels of the canvas centre
    pub spawn_jitter: i32,
    pub background: [u8; 3],
}

impl Default for AppConfig {
    fn default() -> Self {
        let params = SphereParams::default();
        Self {
            window_width: 800,
            window_height: 480,
            canvas_width: 400,
            canvas_height: 240,
            scale: params.scale,
            thickness: params.thickness,
            max_stretch: params.max_stretch,
            fps: 60,
            vsync: true,
            sprite: None,
            seed: None,
            spawn_jitter: 100,
            background: [50, 50, 50],
        }
    }
}

impl AppConfig {
    /// Load config from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Load config if the file exists; a missing or broken file yields defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            },
            Err(e) => {
                log::warn!("Ignoring config {}: {}", path.display(), e);
                Self::default()
            },
        }
    }

    /// Save config as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Sphere construction parameters derived from this config
    pub fn sphere_params(&self) -> SphereParams {
        SphereParams {
            scale: self.scale,
            thickness: self.thickness,
            max_stretch: self.max_stretch,
        }
    }

    /// Apply command line overrides (everything after the config path is resolved)
    pub fn apply_args(&mut self, args: &[String]) -> Result<(), ConfigError> {
        let mut i = 0;
        while i < args.len() {
            let flag = args[i].as_str();
            let value = args.get(i + 1);
            match flag {
                "--no-vsync" => {
                    self.vsync = false;
                    i += 1;
                    continue;
                },
                "--config" | "-c" | "--write-config" => {},
                "--sprite" | "-s" => self.sprite = Some(PathBuf::from(required(flag, value)?)),
                "--scale" => self.scale = parse_value(flag, value)?,
                "--seed" => self.seed = Some(parse_value(flag, value)?),
                "--width" | "-w" => self.window_width = parse_value(flag, value)?,
                "--height" | "-h" => self.window_height = parse_value(flag, value)?,
                "--resolution" | "-r" => {
                    // WxH, e.g. 1600x960
                    let raw = value.cloned().unwrap_or_default();
                    let (w, h) = raw.split_once('x').ok_or_else(|| invalid(flag, &raw))?;
                    self.window_width = w.parse().map_err(|_| invalid(flag, &raw))?;
                    self.window_height = h.parse().map_err(|_| invalid(flag, &raw))?;
                },
                _ => {
                    log::warn!("Ignoring unknown argument {}", flag);
                    i += 1;
                    continue;
                },
            }
            i += 2;
        }
        self.scale = self.scale.clamp(1, MAX_SCALE);
        Ok(())
    }
}

/// Find `--config PATH` in the raw arguments
pub fn config_path(args: &[String]) -> PathBuf {
    flag_value(args, &["--config", "-c"]).map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from)
}

/// Find `--write-config PATH`: write the merged config there and exit
pub fn write_config_path(args: &[String]) -> Option<PathBuf> {
    flag_value(args, &["--write-config"]).map(PathBuf::from)
}

fn flag_value<'a>(args: &'a [String], names: &[&str]) -> Option<&'a String> {
    args.iter()
        .position(|a| names.contains(&a.as_str()))
        .and_then(|i| args.get(i + 1))
}

fn required<'a>(flag: &str, value: Option<&'a String>) -> Result<&'a str, ConfigError> {
    value
        .map(String::as_str)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| invalid(flag, ""))
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<&String>) -> Result<T, ConfigError> {
    let raw = required(flag, value)?;
    raw.parse().map_err(|_| invalid(flag, raw))
}

fn invalid(flag: &str, value: &str) -> ConfigError {
    ConfigError::InvalidArgument {
        flag: flag.to_string(),
        value: value.to_string(),
    }
}
