//! Packets of the handshake and status states, and their framing.
//!
//! A frame on the wire is `VarInt(len(id) + len(body)) | VarInt(id) | body`.
//! The framing layer only knows IDs and opaque bodies; pairing a decoded ID
//! with the expected packet is up to the caller (see [`PacketHeader::expect`]).

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};

use crate::{
    Error,
    encoding::{read_string, read_varint, write_string, write_unsigned_short, write_varint},
};

/// Protocol version sent when the client does not know which version the
/// server speaks. Servers answer status requests regardless.
pub const UNKNOWN_PROTOCOL_VERSION: i32 = -1;

pub const HANDSHAKE_ID: i32 = 0x00;
pub const STATUS_REQUEST_ID: i32 = 0x00;
pub const STATUS_RESPONSE_ID: i32 = 0x00;

/// The state a handshake asks the server to switch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NextState {
    Status,
    Login,
}

impl NextState {
    #[must_use]
    pub const fn id(self) -> i32 {
        match self {
            Self::Status => 1,
            Self::Login => 2,
        }
    }
}

/// The packets a status ping exchanges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Packet {
    Handshake {
        version: i32,
        host: String,
        port: u16,
        next_state: NextState,
    },
    Request,
    Response {
        response: String,
    },
}

impl Packet {
    /// A handshake announcing a status ping to `host:port`.
    #[must_use]
    pub fn status_handshake(host: &str, port: u16) -> Self {
        Self::Handshake {
            version: UNKNOWN_PROTOCOL_VERSION,
            host: host.to_owned(),
            port,
            next_state: NextState::Status,
        }
    }

    #[must_use]
    pub const fn id(&self) -> i32 {
        match self {
            Self::Handshake { .. } => HANDSHAKE_ID,
            Self::Request => STATUS_REQUEST_ID,
            Self::Response { .. } => STATUS_RESPONSE_ID,
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Handshake { .. } => "handshake",
            Self::Request => "status request",
            Self::Response { .. } => "status response",
        }
    }

    /// Serializes the packet body, without ID or length prefix.
    ///
    /// # Errors
    /// [`Error::InvalidVarInt`] if a string is too long to be prefixed.
    pub fn encode_body(&self, out: &mut Vec<u8>) -> Result<(), Error> {
        match self {
            Self::Handshake {
                version,
                host,
                port,
                next_state,
            } => {
                write_varint(out, *version);
                write_string(out, host)?;
                write_unsigned_short(out, *port);
                write_varint(out, next_state.id());
            }
            Self::Request => {}
            Self::Response { response } => write_string(out, response)?,
        }
        Ok(())
    }

    /// Decodes the body of a status response whose header was already read,
    /// returning its JSON document.
    ///
    /// # Errors
    /// Any error of [`read_string`].
    pub async fn decode_response<R: AsyncRead + Unpin>(reader: &mut R) -> Result<String, Error> {
        read_string(reader).await
    }
}

/// Length and ID of a frame, read ahead of its body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacketHeader {
    /// Byte length of the ID and body together.
    pub length: i32,
    pub id: i32,
}

impl PacketHeader {
    /// Reads the length and ID VarInts, leaving the body in the reader.
    ///
    /// # Errors
    /// Any error of [`read_varint`].
    pub async fn read<R: AsyncRead + Unpin>(reader: &mut R) -> Result<Self, Error> {
        let length = read_varint(reader).await?;
        let id = read_varint(reader).await?;
        Ok(Self { length, id })
    }

    /// Checks the frame carries the packet the caller is waiting for.
    ///
    /// # Errors
    /// [`Error::InvalidPacket`] when the IDs differ.
    pub fn expect(self, expected: i32) -> Result<Self, Error> {
        if self.id == expected {
            Ok(self)
        } else {
            Err(Error::InvalidPacket {
                expected,
                actual: self.id,
            })
        }
    }
}

/// Frames `packet` and writes it. Nothing is flushed.
///
/// # Errors
/// [`Error::Encode`] if the writer fails, or any error of
/// [`Packet::encode_body`].
pub async fn write_packet<W: AsyncWrite + Unpin>(
    writer: &mut W,
    packet: &Packet,
) -> Result<(), Error> {
    let mut body = Vec::new();
    packet.encode_body(&mut body)?;

    let mut id = Vec::with_capacity(1);
    write_varint(&mut id, packet.id());

    let mut length = Vec::with_capacity(3);
    write_varint(&mut length, i32::try_from(id.len() + body.len())?);

    let encode = |source| Error::Encode {
        packet: packet.name(),
        source,
    };
    writer.write_all(&length).await.map_err(encode)?;
    writer.write_all(&id).await.map_err(encode)?;
    writer.write_all(&body).await.map_err(encode)?;
    Ok(())
}
