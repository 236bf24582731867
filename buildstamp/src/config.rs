use crate::clock::{Clock, FixedClock, LocalClock};
use crate::header::{self, DEFAULT_HEADER_PATH, DEFAULT_IDENTIFIER, TIMESTAMP_FORMAT};
use chrono::NaiveDateTime;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "buildstamp")]
#[command(about = "Generate a C++ header holding the build timestamp", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, env = "BUILDSTAMP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Project root (the directory holding platformio.ini)
    #[arg(short, long, env = "PROJECT_DIR")]
    pub project_dir: Option<PathBuf>,

    /// Header location relative to the project root
    #[arg(long, env = "BUILDSTAMP_HEADER_PATH")]
    pub header_path: Option<PathBuf>,

    /// Name of the generated constant
    #[arg(long, env = "BUILDSTAMP_IDENTIFIER")]
    pub identifier: Option<String>,

    /// Use this time ("YYYY-MM-DD HH:MM:SS") instead of the clock, for reproducible builds.
    /// Read from BUILDSTAMP_BUILD_TIME; a generic BUILD_TIME in the environment is ignored
    #[arg(long, env = "BUILDSTAMP_BUILD_TIME")]
    pub build_time: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildstampConfig {
    #[serde(default)]
    pub project_dir: Option<PathBuf>,
    #[serde(default)]
    pub header: HeaderConfig,
    /// Pinned build time, overrides the wall clock
    #[serde(default)]
    pub build_time: Option<String>,
}

/// Shape of the generated header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderConfig {
    /// Location relative to the project directory
    pub path: PathBuf,
    /// Name of the string constant
    pub identifier: String,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_HEADER_PATH),
            identifier: DEFAULT_IDENTIFIER.to_string(),
        }
    }
}

impl BuildstampConfig {
    /// Load configuration from multiple sources with priority:
    /// 1. Command line arguments and their environment variables (highest priority)
    /// 2. Config file
    /// 3. Defaults (lowest priority)
    pub fn load(cli: Cli) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::Config::try_from(&BuildstampConfig::default())?);

        if let Some(config_path) = &cli.config {
            tracing::info!("Loading config from file: {}", config_path.display());
            builder = builder.add_source(config::File::from(config_path.as_ref()).required(true));
        } else {
            builder = builder.add_source(config::File::with_name("buildstamp").required(false));
        }

        let mut cfg: BuildstampConfig = builder.build()?.try_deserialize()?;

        if let Some(project_dir) = cli.project_dir {
            cfg.project_dir = Some(project_dir);
        }

        if let Some(header_path) = cli.header_path {
            cfg.header.path = header_path;
        }

        if let Some(identifier) = cli.identifier {
            cfg.header.identifier = identifier;
        }

        if let Some(build_time) = cli.build_time {
            cfg.build_time = Some(build_time);
        }

        Ok(cfg)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.project_dir.is_none() {
            return Err(
                "No project directory provided. Set PROJECT_DIR or pass --project-dir.".to_string(),
            );
        }

        header::validate_identifier(&self.header.identifier).map_err(|e| e.to_string())?;
        header::validate_header_path(&self.header.path).map_err(|e| e.to_string())?;

        if let Some(build_time) = &self.build_time {
            parse_build_time(build_time)?;
        }

        Ok(())
    }

    /// Time source: the pinned build time if one is set, otherwise the local clock.
    pub fn clock(&self) -> Result<Box<dyn Clock>, String> {
        match &self.build_time {
            Some(build_time) => Ok(Box::new(FixedClock(parse_build_time(build_time)?))),
            None => Ok(Box::new(LocalClock)),
        }
    }
}

fn parse_build_time(value: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(value.trim(), TIMESTAMP_FORMAT).map_err(|e| {
        format!(
            "Invalid build time '{}': {} (expected YYYY-MM-DD HH:MM:SS)",
            value, e
        )
    })
}
