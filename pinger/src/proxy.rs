//! PROXY protocol headers, for servers behind a proxy that expects
//! HAProxy's [PROXY protocol](https://www.haproxy.org/download/2.9/doc/proxy-protocol.txt)
//! (BungeeCord/Velocity `proxy_protocol`).

use std::net::SocketAddr;

use bytes::BytesMut;
use proxy_protocol::{ProxyHeader, version1, version2};

use crate::Error;

/// Version of the PROXY header to send before the handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProxyVersion {
    /// Human readable `PROXY TCP4 ...` line.
    V1,
    /// Binary header.
    V2,
}

impl TryFrom<u8> for ProxyVersion {
    type Error = Error;

    fn try_from(version: u8) -> Result<Self, Self::Error> {
        match version {
            1 => Ok(Self::V1),
            2 => Ok(Self::V2),
            other => Err(Error::InvalidProxyVersion(other)),
        }
    }
}

/// Builds a header announcing `source` (our end of the connection) talking
/// to `destination` (the server).
///
/// Addresses of different families cannot be expressed and are sent as
/// `UNKNOWN` (v1) or `UNSPEC` (v2).
///
/// # Errors
/// [`Error::ProxyHeader`] if the header cannot be encoded.
pub fn encode_header(
    version: ProxyVersion,
    source: SocketAddr,
    destination: SocketAddr,
) -> Result<BytesMut, Error> {
    let header = match version {
        ProxyVersion::V1 => ProxyHeader::Version1 {
            addresses: match (source, destination) {
                (SocketAddr::V4(source), SocketAddr::V4(destination)) => {
                    version1::ProxyAddresses::Ipv4 {
                        source,
                        destination,
                    }
                }
                (SocketAddr::V6(source), SocketAddr::V6(destination)) => {
                    version1::ProxyAddresses::Ipv6 {
                        source,
                        destination,
                    }
                }
                _ => version1::ProxyAddresses::Unknown,
            },
        },
        ProxyVersion::V2 => ProxyHeader::Version2 {
            command: version2::ProxyCommand::Proxy,
            transport_protocol: version2::ProxyTransportProtocol::Stream,
            addresses: match (source, destination) {
                (SocketAddr::V4(source), SocketAddr::V4(destination)) => {
                    version2::ProxyAddresses::Ipv4 {
                        source,
                        destination,
                    }
                }
                (SocketAddr::V6(source), SocketAddr::V6(destination)) => {
                    version2::ProxyAddresses::Ipv6 {
                        source,
                        destination,
                    }
                }
                _ => version2::ProxyAddresses::Unspec,
            },
        },
    };
    proxy_protocol::encode(header).map_err(|e| Error::ProxyHeader(e.to_string()))
}
