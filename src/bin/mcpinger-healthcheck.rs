use std::{net::IpAddr, time::Duration};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let Some(address) = std::env::args().nth(1) else {
        return Err("`mcpinger-healthcheck` requires exactly one argument.".into());
    };
    if std::env::args().len() != 2 {
        return Err("`mcpinger-healthcheck` requires exactly one argument.".into());
    }
    let (host, port) = split_address(&address)?;
    let info = pinger::Pinger::timed(host, port, Duration::from_secs(5))
        .ping()
        .await?;
    println!(
        "Health check succeeded: {}/{} players online",
        info.players.online, info.players.max
    );
    Ok(())
}

/// Splits `host[:port]`; IPv6 addresses need brackets to carry a port.
fn split_address(address: &str) -> Result<(&str, u16), std::num::ParseIntError> {
    let bare = address
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(address);
    if bare.parse::<IpAddr>().is_ok() {
        return Ok((bare, pinger::DEFAULT_PORT));
    }
    match address.rsplit_once(':') {
        Some((host, port)) => Ok((
            host.trim_start_matches('[').trim_end_matches(']'),
            port.parse()?,
        )),
        None => Ok((address, pinger::DEFAULT_PORT)),
    }
}
