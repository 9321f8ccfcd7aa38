//! CLI configuration: thin wrapper around `frontdesk_config`.
//!
//! Loads the shared layered config and applies `GlobalOpts` overrides
//! (--api-url, --timeout, --output, --color) on top.

use std::io::IsTerminal;

use clap::ValueEnum;

use frontdesk_api::ApiClient;

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;

pub use frontdesk_config::{Config, config_path, load_config, save_config};

/// Everything a command handler needs: the resolved config, a client for
/// the configured backend and the presentation flags.
#[derive(Debug)]
pub struct Ctx {
    pub config: Config,
    pub client: ApiClient,
    pub format: OutputFormat,
    pub color: bool,
    pub quiet: bool,
    pub yes: bool,
}

impl Ctx {
    pub fn new(global: &GlobalOpts) -> Result<Self, CliError> {
        let config = resolve(global)?;
        let client = ApiClient::new(&config.api_url, &config.transport())?;
        tracing::debug!(base_url = %client.base_url(), "using backend");

        Ok(Self {
            format: output_format(global, &config)?,
            color: color_enabled(global, &config)?,
            quiet: global.quiet,
            yes: global.yes,
            config,
            client,
        })
    }
}

/// Load config and apply flag overrides. Flags win over env and file.
pub fn resolve(global: &GlobalOpts) -> Result<Config, CliError> {
    let mut config = load_config()?;
    if let Some(ref url) = global.api_url {
        config.api_url.clone_from(url);
    }
    if let Some(timeout) = global.timeout {
        config.timeout = timeout;
    }
    config.validate()?;
    Ok(config)
}

fn output_format(global: &GlobalOpts, config: &Config) -> Result<OutputFormat, CliError> {
    if let Some(format) = global.output {
        return Ok(format);
    }
    OutputFormat::from_str(&config.defaults.output, true).map_err(|_| CliError::Validation {
        field: "defaults.output".into(),
        reason: format!("unknown output format '{}'", config.defaults.output),
    })
}

fn color_enabled(global: &GlobalOpts, config: &Config) -> Result<bool, CliError> {
    let mode = match global.color {
        Some(mode) => mode,
        None => ColorMode::from_str(&config.defaults.color, true).map_err(|_| {
            CliError::Validation {
                field: "defaults.color".into(),
                reason: format!("unknown color mode '{}'", config.defaults.color),
            }
        })?,
    };
    Ok(match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
        }
    })
}
