//! Blocking HTTP client for `https://steamcommunity.com/profiles/{id}/?xml=1`.

use std::time::Duration;

use common::protocol::SteamProfile;
use common::SaveError;
use tracing::{debug, info};

use super::ProfileLookup;

/// Fetches public profiles from the Steam Community XML endpoint.
#[derive(Debug, Clone)]
pub struct SteamClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl SteamClient {
    /// Build a client for profiles under `base_url`.
    ///
    /// Requests carry no timeout.
    ///
    /// # Errors
    ///
    /// Returns [`SaveError::Lookup`] if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, SaveError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(None::<Duration>)
            .build()
            .map_err(|e| SaveError::Lookup(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// URL of the XML profile document for `steam_id`.
    pub fn profile_url(&self, steam_id: &str) -> String {
        format!(
            "{}/{}/?xml=1",
            self.base_url.trim_end_matches('/'),
            steam_id.trim()
        )
    }
}

impl ProfileLookup for SteamClient {
    fn player_info(&self, steam_id: &str) -> Result<SteamProfile, SaveError> {
        if steam_id.trim().is_empty() {
            return Err(SaveError::ProfileNotFound(steam_id.to_owned()));
        }

        let url = self.profile_url(steam_id);
        debug!(url = %url, "fetching Steam profile");
        let body = self
            .http
            .get(&url)
            .send()
            .and_then(|resp| resp.text())
            .map_err(|e| SaveError::Lookup(format!("failed to fetch player data: {e}")))?;

        let profile = parse_profile(&body, steam_id)?;
        info!(steam_id64 = %profile.steam_id64, "Steam profile resolved");
        Ok(profile)
    }
}

/// Decode a profile XML document fetched for `steam_id`.
///
/// # Errors
///
/// [`SaveError::Lookup`] if `xml` is not a profile document, and
/// [`SaveError::ProfileNotFound`] if it names no `steamID64`.
pub fn parse_profile(xml: &str, steam_id: &str) -> Result<SteamProfile, SaveError> {
    let profile: SteamProfile = quick_xml::de::from_str(xml)
        .map_err(|e| SaveError::Lookup(format!("failed to parse player data: {e}")))?;
    if profile.steam_id64.is_empty() {
        return Err(SaveError::ProfileNotFound(steam_id.to_owned()));
    }
    Ok(profile)
}
