use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::units::DocumentUnits;
use crate::converters::dxf::ConversionWarning;
use crate::errors::{ConversionError, Result};

/// A request to convert one SVG document into `<output_dir>/<base_name>.dxf`.
///
/// The JSON shape (`svgContent`, `outputDir`, `baseName`) is the one the remote
/// conversion server accepts, so the same value drives both backends.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionRequest {
    pub svg_content: String,
    pub output_dir: PathBuf,
    pub base_name: String,
}

impl ConversionRequest {
    pub fn new(
        svg_content: impl Into<String>,
        output_dir: impl Into<PathBuf>,
        base_name: impl Into<String>,
    ) -> Self {
        Self {
            svg_content: svg_content.into(),
            output_dir: output_dir.into(),
            base_name: base_name.into(),
        }
    }

    /// Reads `svg_path` and names the output after its file stem.
    pub fn from_svg_file(svg_path: &Path, output_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_name = svg_path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .ok_or_else(|| {
                ConversionError::InvalidRequest(format!(
                    "Cannot derive an output name from '{}'",
                    svg_path.display()
                ))
            })?
            .to_string();
        let svg_content = std::fs::read_to_string(svg_path)?;
        Ok(Self::new(svg_content, output_dir, base_name))
    }

    /// Rejects requests with missing fields before any conversion work starts.
    pub fn validate(&self) -> Result<()> {
        if self.svg_content.trim().is_empty() {
            return Err(ConversionError::InvalidRequest(
                "SVG content is missing.".to_string(),
            ));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(ConversionError::InvalidRequest(
                "Output directory is missing.".to_string(),
            ));
        }
        let name = self.base_name.trim();
        if name.is_empty() {
            return Err(ConversionError::InvalidRequest(
                "Base name is missing.".to_string(),
            ));
        }
        if name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(ConversionError::InvalidRequest(format!(
                "Base name '{}' must be a plain file name",
                self.base_name
            )));
        }
        Ok(())
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.dxf", self.base_name.trim()))
    }
}

/// Outcome of a successful conversion, from either backend.
///
/// The remote server only reports `message` and `outputPath`; the local
/// pipeline fills in the resolved units, scale and warnings as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionReport {
    pub message: String,
    pub output_path: PathBuf,
    #[serde(default)]
    pub units: Option<DocumentUnits>,
    #[serde(default)]
    pub scale: Option<f64>,
    #[serde(default)]
    pub shapes_exported: Option<usize>,
    #[serde(default)]
    pub warnings: Vec<ConversionWarning>,
}
