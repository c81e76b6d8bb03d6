//! The status exchange: connect, handshake, request, response.
//!
//! Every step runs inside one future raced against the deadline and the
//! cancellation signal. Whichever side loses is dropped, and the socket
//! with it, so the connection is closed on every exit path.

use std::{
    future::Future,
    time::{Duration, Instant},
};

use tokio::{
    io::{AsyncWriteExt, BufStream},
    net::TcpStream,
};
use tracing::{debug, instrument, trace};

use crate::{
    Error, Packet, PacketHeader, Pinger, ServerInfo,
    packet::{STATUS_RESPONSE_ID, write_packet},
    proxy,
};

pub(super) async fn run<F: Future>(
    pinger: &Pinger,
    cancel: F,
) -> Result<(u64, ServerInfo), Error> {
    let deadline = async {
        match pinger.timeout {
            Some(timeout) => {
                tokio::time::sleep(timeout).await;
                timeout
            }
            None => std::future::pending::<Duration>().await,
        }
    };

    tokio::select! {
        result = exchange(pinger) => result,
        timeout = deadline => {
            debug!(?timeout, "ping timed out");
            Err(Error::TimedOut(timeout))
        }
        _ = cancel => {
            debug!("ping cancelled");
            Err(Error::Cancelled)
        }
    }
}

#[instrument(level = "debug", skip_all, fields(host = %pinger.host, port = pinger.port))]
async fn exchange(pinger: &Pinger) -> Result<(u64, ServerInfo), Error> {
    let (host, port) = if pinger.srv_lookup {
        super::lookup_srv(&pinger.host, pinger.port).await
    } else {
        (pinger.host.clone(), pinger.port)
    };

    let stream = TcpStream::connect((host.as_str(), port))
        .await
        .map_err(Error::Connect)?;
    let local = stream.local_addr().map_err(Error::Connect)?;
    let remote = stream.peer_addr().map_err(Error::Connect)?;
    debug!(%local, %remote, "connected");

    let mut stream = BufStream::new(stream);

    if let Some(version) = pinger.proxy_protocol {
        let header = proxy::encode_header(version, local, remote)?;
        stream
            .write_all(&header)
            .await
            .map_err(|source| Error::Encode {
                packet: "PROXY header",
                source,
            })?;
        trace!(?version, "PROXY header written");
    }

    // The handshake names the server as the caller knows it, even after an
    // SRV lookup redirected the connection.
    write_packet(
        &mut stream,
        &Packet::status_handshake(&pinger.host, pinger.port),
    )
    .await?;
    trace!("handshake sent");

    let request = Packet::Request;
    write_packet(&mut stream, &request).await?;
    stream.flush().await.map_err(|source| Error::Encode {
        packet: request.name(),
        source,
    })?;
    let sent = Instant::now();
    trace!("status requested");

    let response = "status response";
    let header = PacketHeader::read(&mut stream)
        .await
        .map_err(reading(response))?
        .expect(STATUS_RESPONSE_ID)?;
    let latency = u64::try_from(sent.elapsed().as_millis()).unwrap_or(u64::MAX);
    trace!(length = header.length, latency, "status response header received");

    let json = Packet::decode_response(&mut stream)
        .await
        .map_err(reading(response))?;
    let info: ServerInfo = json.parse()?;
    debug!(
        latency,
        online = info.players.online,
        max = info.players.max,
        version = %info.version.name,
        "status received"
    );
    Ok((latency, info))
}

/// Attaches the packet being read to bare I/O failures.
fn reading(packet: &'static str) -> impl FnOnce(Error) -> Error {
    move |error| match error {
        Error::IoError(source) => Error::Decode { packet, source },
        other => other,
    }
}
