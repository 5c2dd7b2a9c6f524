use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use svgdxf_tools::{compare_dxf_content, convert_request, ConversionOptions, ConversionRequest, RemoteConverter};

/// Converts one SVG with both backends into separate directories and writes a
/// Markdown diff of the two DXF files.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
    dotenvy::dotenv().ok();

    let svg_path = PathBuf::from(
        std::env::args()
            .nth(1)
            .context("usage: compare_backends <file.svg>")?,
    );
    let local_dir = PathBuf::from("out/local");
    let remote_dir = PathBuf::from("out/remote");
    fs::create_dir_all(&local_dir)?;
    fs::create_dir_all(&remote_dir)?;

    let local_request = ConversionRequest::from_svg_file(&svg_path, &local_dir)?;
    let local = convert_request(&local_request, &ConversionOptions::default())?;
    log::info!("Local: {}", local.output_path.display());

    let remote_request = ConversionRequest::new(
        local_request.svg_content.clone(),
        fs::canonicalize(&remote_dir)?,
        local_request.base_name.clone(),
    );
    let remote = RemoteConverter::from_env()?.convert(&remote_request).await?;
    log::info!("Remote: {}", remote.output_path.display());

    let local_dxf = fs::read_to_string(&local.output_path)?;
    let remote_dxf = fs::read_to_string(&remote.output_path)
        .with_context(|| format!("reading '{}'", remote.output_path.display()))?;
    let report = compare_dxf_content(&local_dxf, &remote_dxf, "local", "remote");

    let report_path = PathBuf::from("out/backend_diff.md");
    fs::write(&report_path, &report.markdown_report)?;
    if report.has_differences {
        log::warn!(
            "Backends differ (+{} / -{} lines), see {}",
            report.lines_added,
            report.lines_removed,
            report_path.display()
        );
    } else {
        log::info!("Backends produced identical DXF");
    }
    Ok(())
}
