//! Config subcommand handlers.
//!
//! These never touch the backend, so they run without a `Ctx`.

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::output;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init { force } => {
            let path = config::config_path();
            if path.exists() && !force {
                return Err(CliError::Validation {
                    field: "config".into(),
                    reason: format!("{} already exists (use --force to overwrite)", path.display()),
                });
            }
            config::save_config(&Config::default())?;
            output::notify(
                &format!("Wrote default config to {}", path.display()),
                false,
                global.quiet,
            );
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = config::resolve(global)?;
            output::print_output(toml::to_string_pretty(&cfg)?.trim_end(), global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }
    }
}
