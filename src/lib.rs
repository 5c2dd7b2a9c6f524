#[cfg(not(target_arch = "wasm32"))]
pub mod batch;
#[cfg(not(target_arch = "wasm32"))]
pub mod client;

#[cfg(not(target_arch = "wasm32"))]
pub use batch::{convert_batch, convert_batch_with_locks};
#[cfg(not(target_arch = "wasm32"))]
pub use client::RemoteConverter;

pub mod converters;
pub mod errors;
pub mod models;
pub mod storage;

pub use converters::dxf::{convert_document, convert_svg_to_dxf, ConversionOutput, ConversionWarning};
pub use errors::{ConversionError, Result};
pub use models::{ConversionOptions, ConversionReport, ConversionRequest, DocumentUnits, UnitFallback};
pub use storage::{convert_request, OutputLocks};

// features
pub mod diff;
pub use diff::{compare_dxf_content, DxfDiffReport};

use wasm_bindgen::prelude::*;

/// Routes `log` output to the browser console.
#[wasm_bindgen]
pub fn init_logging() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    // A second call finds the logger already installed.
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Converts SVG text to DXF text with default options.
#[wasm_bindgen]
pub fn svg_to_dxf(svg: &str) -> std::result::Result<String, JsValue> {
    convert_svg_to_dxf(svg, &ConversionOptions::default())
        .map(|output| output.dxf)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Converts with options given as JSON (`{"unitFallback":"cssPixels"}`) and
/// returns `{ "dxf", "units", "scale", "warnings" }` as JSON.
#[wasm_bindgen]
pub fn svg_to_dxf_with_options(svg: &str, options_json: &str) -> std::result::Result<String, JsValue> {
    let to_js = |e: ConversionError| JsValue::from_str(&e.to_string());
    let options: ConversionOptions = if options_json.trim().is_empty() {
        ConversionOptions::default()
    } else {
        serde_json::from_str(options_json).map_err(|e| to_js(e.into()))?
    };
    let output = convert_svg_to_dxf(svg, &options).map_err(to_js)?;
    let reply = serde_json::json!({
        "dxf": output.dxf,
        "units": output.units(),
        "scale": output.scale(),
        "warnings": output.warnings,
    });
    Ok(reply.to_string())
}
