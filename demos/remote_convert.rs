use std::path::PathBuf;

use anyhow::Context;
use svgdxf_tools::{ConversionRequest, RemoteConverter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
    dotenvy::dotenv().ok();

    // Usage: remote_convert <file.svg> [output_dir] [--shutdown]
    let args: Vec<String> = std::env::args().skip(1).collect();
    let svg_path = PathBuf::from(args.first().context("usage: remote_convert <file.svg> [output_dir]")?);
    let output_dir = args
        .get(1)
        .filter(|arg| !arg.starts_with("--"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    let converter = RemoteConverter::from_env()?;
    log::info!("Using conversion server at {}", converter.base_url());

    let request = ConversionRequest::from_svg_file(&svg_path, output_dir)?;
    let report = converter.convert(&request).await?;
    log::info!("{} ({})", report.message, report.output_path.display());

    if args.iter().any(|arg| arg == "--shutdown") {
        let message = converter.shutdown().await?;
        log::info!("Server: {}", message);
    }
    Ok(())
}
