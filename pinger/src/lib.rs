#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
//! `pinger` is a client for the Minecraft Java Edition
//! [Server List Ping](https://wiki.vg/Server_List_Ping) protocol. It connects
//! to a server, performs the status handshake and decodes the JSON status
//! document into a [`ServerInfo`] (MOTD, player counts, player sample, icon).
//!
//! The crate is layered leaves first: [`encoding`] holds the primitive wire
//! types, [`packet`] the length-prefixed framing built on them, and
//! [`tokio`] the status exchange itself on top of the tokio runtime.
//!
//! The main API surface is [`Pinger`] and [`tokio::get_status`].

pub mod chat;
pub mod encoding;
pub mod packet;
pub mod proxy;
pub mod tokio;

mod pinger;
mod status;

use std::time::Duration;

pub use chat::ChatComponent;
pub use packet::{NextState, Packet, PacketHeader};
pub use pinger::{DEFAULT_PORT, DEFAULT_TIMEOUT, Pinger};
pub use proxy::ProxyVersion;
pub use status::{Player, Players, ServerInfo, Version};

/// Errors that can occur when pinging a server.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("could not connect to Minecraft server: {0}")]
    Connect(#[source] std::io::Error),
    #[error("timed out after {0:?} waiting for the server")]
    TimedOut(Duration),
    #[error("the ping was cancelled")]
    Cancelled,
    #[error("could not send {packet} packet: {source}")]
    Encode {
        packet: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("could not read {packet} packet: {source}")]
    Decode {
        packet: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("could not build PROXY header: {0}")]
    ProxyHeader(String),
    #[error("PROXY protocol version must be 1 or 2, got {0}")]
    InvalidProxyVersion(u8),
    #[error("VarInt too large")]
    VarIntTooLarge,
    #[error("length does not fit in a VarInt")]
    InvalidVarInt(#[from] std::num::TryFromIntError),
    #[error("string length {0} out of bounds")]
    StringLengthOutOfBounds(i32),
    #[error("stream ended before {expected} bytes could be read")]
    ShortRead { expected: usize },
    #[error("received invalid packet, expected #{expected}, got #{actual}")]
    InvalidPacket { expected: i32, actual: i32 },
    #[error("string is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
    #[error("an I/O error occurred: {0}")]
    IoError(#[from] std::io::Error),
    #[error("malformed status payload: {0}")]
    JsonErr(#[from] serde_json::Error),
}
