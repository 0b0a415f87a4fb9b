//! `save-editor`: binary entry point.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Initialise structured logging on stderr.
//! 3. Open and decode the save named by `SAVE_PATH`.
//! 4. Write the JSON to `OUTPUT_PATH`, or to stdout.
//! 5. If `SAVE_TARGET` is set, hand the JSON to the save action.
//! 6. If `STEAM_ID` is set, print the player's Steam profile as a JSON line.
//!
//! A failed operation prints an [`ErrorResponse`] line on stdout and exits
//! with status 1.

mod app;
mod config;
mod io;
mod steam;
mod telemetry;

use anyhow::Result;
use common::protocol::ErrorResponse;
use common::SaveError;
use es3::Es3Decoder;
use tracing::{error, info};

use app::App;
use config::Config;
use io::{FileDialog, FileReader, FsReader, PresetDialog};
use steam::{ProfileLookup, SteamClient};

fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(&cfg.log_level)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        wrappers = %cfg.unrecognized_wrappers,
        "save-editor starting"
    );

    // -----------------------------------------------------------------------
    // 3. Wiring
    // -----------------------------------------------------------------------
    let decoder =
        Es3Decoder::new(cfg.es3_password.clone()).with_wrapper_policy(cfg.wrapper_policy()?);
    let app = App::new(
        PresetDialog::new(cfg.save_path.clone()),
        FsReader,
        SteamClient::new(cfg.steam_profile_base_url.clone())?,
        decoder,
    );

    // -----------------------------------------------------------------------
    // 4. Run
    // -----------------------------------------------------------------------
    if let Err(err) = run(&app, &cfg) {
        error!(code = err.code(), error = %err, "operation failed");
        println!("{}", serde_json::to_string(&ErrorResponse::from(&err))?);
        std::process::exit(1);
    }
    Ok(())
}

fn run<D, R, L>(app: &App<D, R, L>, cfg: &Config) -> Result<(), SaveError>
where
    D: FileDialog,
    R: FileReader,
    L: ProfileLookup,
{
    let Some(json) = app.open_save_file()? else {
        return Ok(());
    };

    let rendered = app::render(&json, cfg.pretty)?;
    match &cfg.output_path {
        Some(path) => {
            std::fs::write(path, rendered).map_err(|source| SaveError::Io {
                path: path.display().to_string(),
                source,
            })?;
            info!(path = %path.display(), "decoded save written");
        }
        None => println!("{rendered}"),
    }

    if let Some(target) = &cfg.save_target {
        app.save_file(&json, target)?;
    }

    if let Some(steam_id) = cfg.steam_id.as_deref() {
        let profile = app.steam_player_info(steam_id)?;
        let line =
            serde_json::to_string(&profile).map_err(|e| SaveError::JsonParse(e.to_string()))?;
        println!("{line}");
    }
    Ok(())
}
