use std::{path::Path, time::Duration};

use base64::{prelude::BASE64_STANDARD, Engine};
use pinger::{Pinger, ProxyVersion, ServerInfo};

use crate::{Args, Failure};

const PNG_DATA_URI: &str = "data:image/png;base64,";

pub async fn run(args: &Args) -> Result<(), Failure> {
    let mut target = Pinger::new(args.host.as_str(), args.port)
        .with_timeout((args.timeout > 0).then(|| Duration::from_secs(args.timeout)))
        .with_srv_lookup(args.srv);
    if let Some(version) = args.proxy {
        target = target.with_proxy_protocol(ProxyVersion::try_from(version)?);
    }
    debug!(?target, "pinging");

    let (latency, info) =
        pinger::tokio::get_status_until(&target, vss::shutdown_signal()).await?;

    if let Some(path) = &args.favicon {
        write_favicon(&info, path)?;
    }
    if args.json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        print!("{}", report(latency, &info));
    }
    Ok(())
}

fn report(latency: u64, info: &ServerInfo) -> String {
    let mut out = format!(
        "Description: \"{}\"\nOnline: {}/{}\nVersion: {} (protocol {})\nLatency: {latency}ms\n",
        info.description,
        info.players.online,
        info.players.max,
        info.version.name,
        info.version.protocol,
    );
    if !info.players.sample.is_empty() {
        let names: Vec<&str> = info
            .players
            .sample
            .iter()
            .map(|player| player.name.as_str())
            .collect();
        out.push_str(&format!("Players: {}\n", names.join(", ")));
    }
    out
}

fn decode_favicon(uri: &str) -> Result<Vec<u8>, Failure> {
    let data = uri
        .strip_prefix(PNG_DATA_URI)
        .ok_or(Failure::InvalidFavicon)?;
    // older servers wrap the base64 body
    let data: String = data
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    Ok(BASE64_STANDARD.decode(data)?)
}

fn write_favicon(info: &ServerInfo, path: &Path) -> Result<(), Failure> {
    let uri = info.favicon.as_deref().ok_or(Failure::NoFavicon)?;
    let png = decode_favicon(uri)?;
    std::fs::write(path, &png).map_err(Failure::FaviconWrite)?;
    info!(path = %path.display(), bytes = png.len(), "favicon written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATUS: &str = r#"{"version":{"name":"1.13.2","protocol":404},"players":{"max":100,"online":5,"sample":[{"name":"Raqbit","id":"09bc745b-3679-4152-b96b-3f9c59c42059"},{"name":"Notch","id":"069a79f4-44e9-4726-a5be-fca90e38aaf5"}]},"description":{"text":"Hello ","extra":["world"]},"favicon":"data:image/png;base64,iVBORw0K\nGgo="}"#;

    #[test]
    fn report_lists_status() {
        let info: ServerInfo = STATUS.parse().unwrap();
        assert_eq!(
            report(42, &info),
            "Description: \"Hello world\"\n\
             Online: 5/100\n\
             Version: 1.13.2 (protocol 404)\n\
             Latency: 42ms\n\
             Players: Raqbit, Notch\n"
        );
    }

    #[test]
    fn report_omits_empty_sample() {
        let info: ServerInfo = STATUS
            .replace(r#","sample":["#, r#","unused":["#)
            .parse()
            .unwrap();
        let report = report(7, &info);
        assert!(report.ends_with("Latency: 7ms\n"), "{report}");
        assert!(!report.contains("Players:"));
    }

    #[test]
    fn favicon_decodes_wrapped_base64() {
        let info: ServerInfo = STATUS.parse().unwrap();
        let png = decode_favicon(info.favicon.as_deref().unwrap()).unwrap();
        assert_eq!(png, b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn favicon_must_be_png_data_uri() {
        assert!(matches!(
            decode_favicon("https://example.net/icon.png"),
            Err(Failure::InvalidFavicon)
        ));
        assert!(matches!(
            decode_favicon("data:image/png;base64,%%%"),
            Err(Failure::FaviconDecode(_))
        ));
    }
}
