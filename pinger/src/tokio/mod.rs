mod ping;

use std::{future::Future, net::IpAddr, sync::OnceLock};

use hickory_resolver::{
    TokioAsyncResolver,
    config::{ResolverConfig, ResolverOpts},
};
use tracing::debug;

use crate::{Error, Pinger, ServerInfo};

/// Retrieve the status of a given Minecraft server.
///
/// Returns `(latency_ms, response)`, the latency being the time between
/// sending the status request and receiving the response header.
///
/// # Examples
///
/// Ping a server with the default 10 second deadline:
///
/// ```no_run
/// # async {
/// let (latency, response) = pinger::tokio::get_status(&pinger::Pinger::new(
///     "mc.hypixel.net",
///     pinger::DEFAULT_PORT,
/// ))
/// .await?;
/// println!("{latency}ms: {}", response.description);
/// # Ok::<(), pinger::Error>(())
/// # };
/// ```
///
/// # Errors
/// If the server status cannot be received, see [`Error`].
pub async fn get_status(pinger: &Pinger) -> Result<(u64, ServerInfo), Error> {
    ping::run(pinger, std::future::pending::<()>()).await
}

/// [`get_status`], abandoned with [`Error::Cancelled`] once `cancel`
/// completes. The connection is closed before this returns.
///
/// # Examples
///
/// Stop on Ctrl-C:
///
/// ```no_run
/// # async {
/// let pinger = pinger::Pinger::new("localhost", pinger::DEFAULT_PORT);
/// let (_, response) = pinger::tokio::get_status_until(&pinger, tokio::signal::ctrl_c()).await?;
/// # Ok::<(), pinger::Error>(())
/// # };
/// ```
///
/// # Errors
/// If the server status cannot be received, see [`Error`].
pub async fn get_status_until<F: Future>(
    pinger: &Pinger,
    cancel: F,
) -> Result<(u64, ServerInfo), Error> {
    ping::run(pinger, cancel).await
}

/// Resolves the `_minecraft._tcp` SRV record of `host`, falling back to
/// `host:port` as given when there is none.
pub(crate) async fn lookup_srv(host: &str, port: u16) -> (String, u16) {
    if host.parse::<IpAddr>().is_ok() {
        return (host.to_owned(), port);
    }
    match resolver().srv_lookup(format!("_minecraft._tcp.{host}")).await {
        Ok(lookup) => lookup.iter().next().map_or_else(
            || (host.to_owned(), port),
            |srv| {
                let target = srv.target().to_utf8();
                debug!(%target, port = srv.port(), "using SRV record");
                (target.trim_end_matches('.').to_owned(), srv.port())
            },
        ),
        Err(error) => {
            debug!(%error, "no SRV record");
            (host.to_owned(), port)
        }
    }
}

fn new_resolver() -> TokioAsyncResolver {
    let config = ResolverConfig::cloudflare();
    let mut opts = ResolverOpts::default();
    opts.cache_size = 64;
    opts.attempts = 3;
    TokioAsyncResolver::tokio(config, opts)
}

pub fn resolver() -> &'static TokioAsyncResolver {
    static RESOLVER: OnceLock<TokioAsyncResolver> = OnceLock::new();
    RESOLVER.get_or_init(new_resolver)
}
