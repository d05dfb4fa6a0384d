//! Configuration command handler.
//!
//! Prints the resolved configuration as pretty JSON, one object per setting
//! holding its value and the layer it came from:
//!
//! ```json
//! {
//!   "buy_in": {
//!     "value": 500,
//!     "source": "default"
//!   },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use crate::ui;
use std::io::Write;

/// Handle the cfg command.
///
/// # Errors
///
/// Returns `CliError::Config` if configuration loading fails.
/// Returns `CliError::Io` if writing to output stream fails.
pub fn handle_cfg_command(out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(CliError::Config(e.to_string()));
        }
    };

    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "buy_in": {
            "value": config.buy_in,
            "source": sources.buy_in,
        },
        "blind": {
            "value": config.blind,
            "source": sources.blind,
        },
        "raise_delay": {
            "value": config.raise_delay,
            "source": sources.raise_delay,
        },
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
