use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::converters::svg::PathDataError;

/// Soft problems met during a conversion. They are collected next to a
/// successful result instead of aborting it.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ConversionWarning {
    /// A transform string could not be parsed and was treated as identity.
    #[error("Ignored unparseable transform '{transform}' on shape '{shape_id}'")]
    #[serde(rename_all = "camelCase")]
    TransformIgnored { shape_id: String, transform: String },

    /// A shape could not be imported and is missing from the output.
    #[error("Skipped shape '{shape_id}': {reason}")]
    #[serde(rename_all = "camelCase")]
    ShapeSkipped { shape_id: String, reason: String },

    /// No reliable physical size; the drawing is exported without units.
    #[error("Drawing units unresolved: {reason}")]
    UnitUnresolved { reason: String },
}

/// Why a single shape could not be turned into geometry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ImportError {
    #[error(transparent)]
    PathData(#[from] PathDataError),

    #[error("invalid points list: {0}")]
    Points(String),

    #[error("missing geometry attribute '{0}'")]
    MissingAttribute(&'static str),

    #[error("invalid value '{value}' for attribute '{attribute}'")]
    InvalidAttribute { attribute: &'static str, value: String },

    #[error("shape has no drawable segments")]
    Empty,
}
