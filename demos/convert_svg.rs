use std::path::PathBuf;

use anyhow::{bail, Context};
use svgdxf_tools::{convert_batch, ConversionOptions, ConversionRequest, UnitFallback};

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    // Usage: convert_svg <output_dir> <file.svg>...
    let mut args = std::env::args().skip(1);
    let Some(output_dir) = args.next().map(PathBuf::from) else {
        bail!("usage: convert_svg <output_dir> <file.svg>...");
    };
    let inputs: Vec<PathBuf> = args.map(PathBuf::from).collect();
    if inputs.is_empty() {
        bail!("no SVG files given");
    }

    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("creating '{}'", output_dir.display()))?;

    let requests = inputs
        .iter()
        .map(|path| {
            ConversionRequest::from_svg_file(path, &output_dir)
                .with_context(|| format!("reading '{}'", path.display()))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let fallback = match std::env::var("SVGDXF_UNIT_FALLBACK").as_deref() {
        Ok("mm") => UnitFallback::ViewBoxAsMillimeters,
        Ok("px") => UnitFallback::CssPixels,
        _ => UnitFallback::Unitless,
    };
    let options = ConversionOptions::new().set_unit_fallback(fallback);

    let mut failures = 0;
    for (path, result) in inputs.iter().zip(convert_batch(&requests, &options)) {
        match result {
            Ok(report) => {
                log::info!(
                    "{} -> {} (units: {:?}, scale: {:?}, shapes: {:?})",
                    path.display(),
                    report.output_path.display(),
                    report.units,
                    report.scale,
                    report.shapes_exported
                );
                for warning in &report.warnings {
                    log::warn!("{}: {}", path.display(), warning);
                }
            }
            Err(e) => {
                failures += 1;
                log::error!("{}: {}", path.display(), e);
            }
        }
    }

    if failures > 0 {
        bail!("{} of {} conversion(s) failed", failures, inputs.len());
    }
    Ok(())
}
