//! The operations the UI invokes: open a save, write it back, look up a player.

use std::path::Path;

use common::protocol::SteamProfile;
use common::SaveError;
use es3::Es3Decoder;
use serde_json::Value;
use tracing::{info, warn};

use crate::io::{FileDialog, FileReader};
use crate::steam::ProfileLookup;

/// Binds the decode pipeline to its file-picker, file-reader and profile
/// lookup collaborators.
pub struct App<D, R, L> {
    dialog: D,
    reader: R,
    lookup: L,
    decoder: Es3Decoder,
}

impl<D, R, L> App<D, R, L>
where
    D: FileDialog,
    R: FileReader,
    L: ProfileLookup,
{
    pub fn new(dialog: D, reader: R, lookup: L, decoder: Es3Decoder) -> Self {
        Self {
            dialog,
            reader,
            lookup,
            decoder,
        }
    }

    /// Ask for a save file, read it, and decode it to JSON text.
    ///
    /// Returns `Ok(None)` if the selection was cancelled.
    ///
    /// # Errors
    ///
    /// Whatever the dialog or reader report, plus every decode error of
    /// [`Es3Decoder::decode`].
    pub fn open_save_file(&self) -> Result<Option<String>, SaveError> {
        let Some(path) = self.dialog.pick_save_file()? else {
            info!("save file selection cancelled");
            return Ok(None);
        };

        info!(path = %path.display(), "opening save file");
        let bytes = self.reader.read(&path)?;
        let json = self.decoder.decode(&bytes)?;
        Ok(Some(json))
    }

    /// Re-encrypt `json` into `target`. Not supported yet.
    ///
    /// # Errors
    ///
    /// Always [`SaveError::NotImplemented`].
    pub fn save_file(&self, json: &str, target: &Path) -> Result<(), SaveError> {
        warn!(
            target = %target.display(),
            json_len = json.len(),
            "save requested but not implemented"
        );
        Err(SaveError::NotImplemented("save".into()))
    }

    /// Look up the public Steam profile for `steam_id`.
    pub fn steam_player_info(&self, steam_id: &str) -> Result<SteamProfile, SaveError> {
        self.lookup.player_info(steam_id)
    }
}

/// Format decoded JSON for output, re-indenting it when `pretty` is set.
///
/// # Errors
///
/// [`SaveError::JsonParse`] if `json` is not valid JSON.
pub fn render(json: &str, pretty: bool) -> Result<String, SaveError> {
    if !pretty {
        return Ok(json.to_owned());
    }
    serde_json::from_str::<Value>(json)
        .and_then(|value| serde_json::to_string_pretty(&value))
        .map_err(|e| SaveError::JsonParse(e.to_string()))
}
