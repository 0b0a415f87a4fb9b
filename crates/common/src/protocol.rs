//! Record types handed to the UI layer.
//!
//! [`SteamProfile`] is deserialised from the Steam Community XML profile
//! document and serialised back out as JSON, so the serde names follow the
//! XML element names.

use serde::{Deserialize, Serialize};

use crate::error::SaveError;

// ---------------------------------------------------------------------------
// Steam profile
// ---------------------------------------------------------------------------

/// Public Steam Community profile, as returned by `/profiles/{id}/?xml=1`.
///
/// Every field is optional in the upstream document; missing elements decode
/// to empty strings. An empty [`SteamProfile::steam_id64`] means the profile
/// does not exist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SteamProfile {
    #[serde(rename = "steamID64")]
    pub steam_id64: String,
    /// Display name.
    #[serde(rename = "steamID")]
    pub steam_id: String,
    #[serde(rename = "onlineState")]
    pub online_state: String,
    #[serde(rename = "stateMessage")]
    pub state_message: String,
    #[serde(rename = "avatarIcon")]
    pub avatar_icon: String,
    #[serde(rename = "avatarMedium")]
    pub avatar_medium: String,
    #[serde(rename = "avatarFull")]
    pub avatar_full: String,
    #[serde(rename = "realname")]
    pub real_name: String,
    pub summary: String,
    #[serde(rename = "inGameInfo")]
    pub in_game_info: InGameInfo,
    #[serde(rename = "customURL")]
    pub custom_url: String,
    #[serde(rename = "memberSince")]
    pub member_since: String,
    pub location: String,
}

/// The game the profile owner is currently playing, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InGameInfo {
    #[serde(rename = "gameName")]
    pub game_name: String,
    #[serde(rename = "gameLink")]
    pub game_link: String,
    #[serde(rename = "gameIcon")]
    pub game_icon: String,
    #[serde(rename = "gameLogo")]
    pub game_logo: String,
    #[serde(rename = "gameLogoSmall")]
    pub game_logo_small: String,
}

// ---------------------------------------------------------------------------
// Error response
// ---------------------------------------------------------------------------

/// Error body surfaced to the UI when an operation fails.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short machine-readable error code (e.g. `"crypto_error"`).
    pub code: String,
    /// Human-readable description.
    pub message: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<&SaveError> for ErrorResponse {
    fn from(err: &SaveError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROFILE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<profile>
	<steamID64>76561197960287930</steamID64>
	<steamID><![CDATA[Rabscuttle]]></steamID>
	<onlineState>in-game</onlineState>
	<stateMessage><![CDATA[In-Game<br/>R.E.P.O.]]></stateMessage>
	<privacyState>public</privacyState>
	<vacBanned>0</vacBanned>
	<avatarIcon><![CDATA[https://avatars.example/abc.jpg]]></avatarIcon>
	<avatarMedium><![CDATA[https://avatars.example/abc_medium.jpg]]></avatarMedium>
	<avatarFull><![CDATA[https://avatars.example/abc_full.jpg]]></avatarFull>
	<inGameInfo>
		<gameName><![CDATA[R.E.P.O.]]></gameName>
		<gameLink><![CDATA[https://steamcommunity.com/app/3241660]]></gameLink>
	</inGameInfo>
	<customURL><![CDATA[rabscuttle]]></customURL>
	<memberSince>September 12, 2003</memberSince>
	<location><![CDATA[Washington, United States]]></location>
	<summary><![CDATA[No information given.]]></summary>
</profile>"#;

    #[test]
    fn steam_profile_from_xml() {
        let p: SteamProfile = quick_xml::de::from_str(PROFILE_XML).unwrap();
        assert_eq!(p.steam_id64, "76561197960287930");
        assert_eq!(p.steam_id, "Rabscuttle");
        assert_eq!(p.online_state, "in-game");
        assert_eq!(p.in_game_info.game_name, "R.E.P.O.");
        assert_eq!(p.in_game_info.game_logo, "");
        assert_eq!(p.custom_url, "rabscuttle");
        assert_eq!(p.member_since, "September 12, 2003");
        assert_eq!(p.location, "Washington, United States");
    }

    #[test]
    fn missing_profile_decodes_to_empty_id() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<response><error><![CDATA[The specified profile could not be found.]]></error></response>"#;
        let p: SteamProfile = quick_xml::de::from_str(xml).unwrap();
        assert!(p.steam_id64.is_empty());
    }

    #[test]
    fn steam_profile_json_uses_xml_names() {
        let p = SteamProfile {
            steam_id64: "1".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["steamID64"], "1");
        assert!(json["inGameInfo"].is_object());
    }

    #[test]
    fn error_response_from_save_error() {
        let err = SaveError::JsonParse("expected value at line 1".into());
        let resp = ErrorResponse::from(&err);
        assert_eq!(resp.code, "json_parse_error");
        assert!(resp.message.contains("expected value"));
    }
}
