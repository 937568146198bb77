//! Configuration loading for circuitry.
//!
//! Configuration is loaded from TOML files with environment variable overrides.

use crate::circuit::LayoutParams;
use crate::generators::{AnimationTiming, BoardStyle};
use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;
use tracing::warn;

pub const DEFAULT_CONFIG_FILE: &str = "config.default.toml";

/// Prefix for environment overrides, e.g. `CIRCUITRY_GENERATOR__NODE_COUNT`.
pub const ENV_PREFIX: &str = "CIRCUITRY";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct CircuitryConfig {
    #[serde(default)]
    pub generator: LayoutParams,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub animation: AnimationTiming,

    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_directory")]
    pub directory: String,

    #[serde(default = "default_width")]
    pub width: u32,

    #[serde(default = "default_height")]
    pub height: u32,

    /// Also write the JSON node/edge contract next to every SVG.
    #[serde(default)]
    pub save_graph: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            width: default_width(),
            height: default_height(),
            save_graph: false,
        }
    }
}

fn default_directory() -> String {
    "output".to_string()
}

fn default_width() -> u32 {
    1280
}

fn default_height() -> u32 {
    800
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RenderConfig {
    #[serde(default)]
    pub style: BoardStyle,

    /// Overrides the palette background.
    #[serde(default)]
    pub background: Option<String>,
}

impl CircuitryConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false))
            .add_source(File::from(path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let circuitry_config = match config.try_deserialize::<CircuitryConfig>() {
            Ok(loaded) => loaded,
            Err(err) => {
                warn!(%err, "invalid configuration, using defaults");
                CircuitryConfig::default()
            }
        };
        Ok(circuitry_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::GridSpacing;
    use std::io::Write;
    use std::sync::{Mutex, MutexGuard};

    /// Environment variables are process-wide, so every test that loads
    /// configuration holds this lock.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_lock() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_match_generator_defaults() {
        let config = CircuitryConfig::default();
        assert_eq!(config.generator, LayoutParams::default());
        assert_eq!(config.animation, AnimationTiming::default());
        assert_eq!(config.output.width, 1280);
        assert_eq!(config.render.style, BoardStyle::Animated);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let _guard = env_lock();
        let config = CircuitryConfig::load(Path::new("does-not-exist.toml")).unwrap();
        assert_eq!(config.output.directory, "output");
        assert_eq!(config.generator.k_nearest, 2);
    }

    #[test]
    fn file_overrides_individual_fields() {
        let _guard = env_lock();
        let file = write_config(
            r#"
[generator]
node_count = 48
spacing = "stretched"
far_edge_probability = 0.4

[output]
width = 640

[animation]
pulse_duration = [1.0, 2.0]

[render]
style = "static"
"#,
        );
        let config = CircuitryConfig::load(file.path()).unwrap();
        assert_eq!(config.generator.node_count, 48);
        assert_eq!(config.generator.spacing, GridSpacing::Stretched);
        assert_eq!(config.generator.far_edge_probability, 0.4);
        assert_eq!(config.generator.k_nearest, 2);
        assert_eq!(config.output.width, 640);
        assert_eq!(config.output.height, 800);
        assert_eq!(config.animation.pulse_duration, (1.0, 2.0));
        assert_eq!(config.render.style, BoardStyle::Static);
    }

    #[test]
    fn malformed_values_fall_back_to_defaults() {
        let _guard = env_lock();
        let file = write_config("[generator]\nnode_count = \"lots\"\n");
        let config = CircuitryConfig::load(file.path()).unwrap();
        assert_eq!(config.generator, LayoutParams::default());
    }

    #[test]
    fn environment_overrides_file_values() {
        let _guard = env_lock();
        let file = write_config("[generator]\nnode_count = 12\n\n[render]\nstyle = \"animated\"\n");
        std::env::set_var("CIRCUITRY_GENERATOR__NODE_COUNT", "40");
        std::env::set_var("CIRCUITRY_RENDER__STYLE", "static");
        let loaded = CircuitryConfig::load(file.path());
        std::env::remove_var("CIRCUITRY_GENERATOR__NODE_COUNT");
        std::env::remove_var("CIRCUITRY_RENDER__STYLE");

        let config = loaded.unwrap();
        assert_eq!(config.generator.node_count, 40);
        assert_eq!(config.render.style, BoardStyle::Static);
        assert_eq!(config.generator.k_nearest, 2);
    }
}
