use std::{future::Future, time::Duration};

use crate::{Error, ProxyVersion, ServerInfo};

/// The port vanilla servers listen on.
pub const DEFAULT_PORT: u16 = 25565;

/// Deadline for a whole ping unless the caller picks another one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for pinging a Java server.
///
/// # Examples
///
/// ```
/// use pinger::{Pinger, ProxyVersion};
/// use std::time::Duration;
///
/// let pinger = Pinger::timed("mc.hypixel.net", 25565, Duration::from_secs(5))
///     .with_proxy_protocol(ProxyVersion::V2);
/// assert_eq!(pinger.timeout, Some(Duration::from_secs(5)));
/// ```
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Pinger {
    /// Host to connect to, either an IP or a hostname.
    ///
    /// It is also sent as the server address of the handshake.
    pub host: String,
    pub port: u16,
    /// Deadline covering connect through the last byte of the response.
    /// `None` waits for as long as the operating system lets the socket live.
    pub timeout: Option<Duration>,
    /// Send a PROXY header of this version right after connecting.
    pub proxy_protocol: Option<ProxyVersion>,
    /// Look up `_minecraft._tcp.<host>` before connecting.
    pub srv_lookup: bool,
}

impl Pinger {
    /// A pinger with the [`DEFAULT_TIMEOUT`].
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self::timed(host, port, DEFAULT_TIMEOUT)
    }

    #[must_use]
    pub fn timed(host: impl Into<String>, port: u16, timeout: Duration) -> Self {
        Self {
            host: host.into(),
            port,
            timeout: Some(timeout),
            proxy_protocol: None,
            srv_lookup: false,
        }
    }

    #[must_use]
    pub fn with_timeout(self, timeout: Option<Duration>) -> Self {
        Self { timeout, ..self }
    }

    #[must_use]
    pub fn with_proxy_protocol(self, version: ProxyVersion) -> Self {
        Self {
            proxy_protocol: Some(version),
            ..self
        }
    }

    #[must_use]
    pub fn with_srv_lookup(self, srv_lookup: bool) -> Self {
        Self { srv_lookup, ..self }
    }

    /// Connects, asks for the status and decodes it.
    ///
    /// # Errors
    /// The first failure of the exchange; nothing is retried.
    pub async fn ping(&self) -> Result<ServerInfo, Error> {
        crate::tokio::get_status(self).await.map(|(_, info)| info)
    }

    /// Like [`Pinger::ping`], but gives up with [`Error::Cancelled`] as soon
    /// as `cancel` completes.
    ///
    /// # Errors
    /// The first failure of the exchange; nothing is retried.
    pub async fn ping_until<F: Future>(&self, cancel: F) -> Result<ServerInfo, Error> {
        crate::tokio::get_status_until(self, cancel)
            .await
            .map(|(_, info)| info)
    }
}
