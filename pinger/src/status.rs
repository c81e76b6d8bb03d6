//! The status document a server returns.
//! [Server List Ping: Status Response](https://wiki.vg/Server_List_Ping#Status_Response)

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{ChatComponent, Error, chat::null_as_default};

/// The server status response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerInfo {
    /// The version of the server.
    pub version: Version,
    /// Information about online players
    pub players: Players,
    /// The description of the server (MOTD).
    #[serde(default)]
    pub description: ChatComponent,
    /// The server icon, a `data:image/png;base64,` URI. Not validated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
    /// Does this server enforce chat signing?
    #[serde(
        rename = "enforcesSecureChat",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub enforces_secure_chat: Option<bool>,
    /// Does this server have chat previews?
    #[serde(
        rename = "previewsChat",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub previews_chat: Option<bool>,
}

/// Information about the server's version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    /// The name of the version the server is running
    ///
    /// In practice this comes in a large variety of different formats.
    pub name: String,
    /// See [Protocol Version Numbers](https://wiki.vg/Protocol_version_numbers)
    pub protocol: i64,
}

/// An online player of the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// The name of the player.
    pub name: String,
    /// The player's UUID
    pub id: String,
}

/// The stats for players on the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Players {
    /// The max amount of players.
    pub max: i64,
    /// The amount of players online.
    pub online: i64,
    /// A preview of which players are online, empty when the server sends none.
    ///
    /// In practice servers often don't send this or use it for more advertising
    #[serde(default, deserialize_with = "null_as_default")]
    pub sample: Vec<Player>,
}

impl FromStr for ServerInfo {
    type Err = Error;

    fn from_str(json: &str) -> Result<Self, Self::Err> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HELLO_WORLD: &str = r#"{"version":{"name":"1.13.2","protocol":404},"players":{"max":100,"online":5,"sample":[{"name":"Raqbit","id":"09bc745b-3679-4152-b96b-3f9c59c42059"}]},"description":"Hello world","favicon":"data:image/png;base64,<data>"}"#;

    #[test]
    fn parses_full_status() {
        let info: ServerInfo = HELLO_WORLD.parse().unwrap();

        assert_eq!(
            info.version,
            Version {
                name: "1.13.2".to_owned(),
                protocol: 404
            }
        );
        assert_eq!(info.players.max, 100);
        assert_eq!(info.players.online, 5);
        assert_eq!(
            info.players.sample,
            [Player {
                name: "Raqbit".to_owned(),
                id: "09bc745b-3679-4152-b96b-3f9c59c42059".to_owned()
            }]
        );
        assert_eq!(info.description.text(), "Hello world");
        assert_eq!(
            info.favicon.as_deref(),
            Some("data:image/png;base64,<data>")
        );
        assert_eq!(info.enforces_secure_chat, None);
    }

    #[test]
    fn description_string_and_object_agree() {
        let object = HELLO_WORLD.replace(
            r#""description":"Hello world""#,
            r#""description":{"text":"Hello world"}"#,
        );
        let from_string: ServerInfo = HELLO_WORLD.parse().unwrap();
        let from_object: ServerInfo = object.parse().unwrap();

        assert_eq!(from_object.description.text(), "Hello world");
        assert_eq!(from_string, from_object);
    }

    #[test]
    fn missing_sample_is_empty() {
        let info: ServerInfo = r#"{"version":{"name":"Paper 1.20.4","protocol":765},"players":{"max":20,"online":0},"description":{"text":"A Minecraft Server"},"enforcesSecureChat":true}"#
            .parse()
            .unwrap();

        assert!(info.players.sample.is_empty());
        assert!(info.favicon.is_none());
        assert_eq!(info.enforces_secure_chat, Some(true));
    }

    #[test]
    fn null_fields_read_as_absent() {
        let info: ServerInfo = r#"{"version":{"name":"1.20.1","protocol":763},"players":{"max":20,"online":0,"sample":null},"description":null,"favicon":null}"#
            .parse()
            .unwrap();

        assert!(info.players.sample.is_empty());
        assert_eq!(info.description, ChatComponent::default());
        assert!(info.favicon.is_none());

        let info: ServerInfo = HELLO_WORLD
            .replace(
                r#""description":"Hello world""#,
                r#""description":{"text":"hi","extra":null}"#,
            )
            .parse()
            .unwrap();
        assert_eq!(info.description, ChatComponent::from("hi"));
    }

    #[test]
    fn malformed_payload_is_json_error() {
        for json in [
            "",
            "{",
            r#"{"players":{"max":1,"online":0},"description":"x"}"#,
            r#"{"version":{"name":"x","protocol":"new"},"players":{"max":1,"online":0}}"#,
        ] {
            assert!(
                matches!(json.parse::<ServerInfo>(), Err(Error::JsonErr(_))),
                "{json:?} parsed"
            );
        }
    }
}
