//! Steam Community profile lookup.

pub mod client;

pub use client::SteamClient;

use common::protocol::SteamProfile;
use common::SaveError;

/// Resolves a Steam ID to its public profile.
#[cfg_attr(test, mockall::automock)]
pub trait ProfileLookup {
    /// # Errors
    ///
    /// [`SaveError::ProfileNotFound`] if Steam knows no such profile, and
    /// [`SaveError::Lookup`] if the request or the response body fails.
    fn player_info(&self, steam_id: &str) -> Result<SteamProfile, SaveError>;
}
