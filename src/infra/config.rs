use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cli::{AppContext, InitArgs};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config
{
    /// Default zig-zag settings
    pub zigzag: ZigZagConfig,

    /// Default gap-removal settings
    pub glue: GlueConfig,

    /// Marker column names
    pub csv: CsvConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZigZagConfig
{
    pub gap_after_a: f64,
    pub gap_after_b: f64,
    pub track_a: usize,
    pub track_b: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlueConfig
{
    pub gap: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvConfig
{
    pub audio_column: String,
    pub images_column: String,
}

impl Default for ZigZagConfig
{
    fn default() -> Self
    {
        Self { gap_after_a: 0.5, gap_after_b: 0.2, track_a: 1, track_b: 2 }
    }
}

impl Default for GlueConfig
{
    fn default() -> Self
    {
        Self { gap: 0.0 }
    }
}

impl Default for CsvConfig
{
    fn default() -> Self
    {
        Self { audio_column: "audio".to_string(), images_column: "images".to_string() }
    }
}

/// Config file names, first match wins
pub const CONFIG_FILES: [&str; 4] =
    ["clipshift.toml", "clipshift.yaml", "clipshift.json", ".clipshift.toml"];

pub fn load_config() -> Result<Config>
{
    load_config_from(Path::new("."))
}

/// Layered load: first config file found in `dir`, then `CLIPSHIFT__*` env vars
pub fn load_config_from(dir: &Path) -> Result<Config>
{
    let mut builder = config::Config::builder();

    // Load from config files in priority order
    for name in &CONFIG_FILES
    {
        let path = dir.join(name);
        if path.exists()
        {
            builder = builder.add_source(config::File::from(path));
            break;
        }
    }

    // Add environment variables, e.g. CLIPSHIFT__ZIGZAG__GAP_AFTER_A=0.4
    builder = builder.add_source(
        config::Environment::with_prefix("CLIPSHIFT")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    );

    let cfg = builder
        .build()
        .context("Failed to load configuration")?;
    let parsed: Config = cfg
        .try_deserialize()
        .context("Failed to parse configuration")?;

    Ok(parsed)
}

pub fn init(
    args: InitArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let config_path = args
        .path
        .join("clipshift.toml");

    if config_path.exists() && !args.force
    {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let config = Config::default();
    let toml_string =
        toml::to_string_pretty(&config).context("Failed to serialize default config")?;

    std::fs::write(&config_path, toml_string).context("Failed to write config file")?;

    if !ctx.quiet
    {
        println!("Created config file at {}", config_path.display());
    }
    Ok(())
}
