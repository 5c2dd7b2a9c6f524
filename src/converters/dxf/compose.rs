//! Transform composer: folds a shape's ancestor chain and own transform into
//! one effective matrix.

use crate::converters::svg::parse_transform;
use crate::models::AffineTransform;
use log::warn;

/// Effective transform plus the strings that had to be ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedTransform {
    pub transform: AffineTransform,
    pub ignored: Vec<String>,
}

/// Composes `A1 · A2 · … · An · Own`, where `ancestors` runs outermost first.
///
/// Any entry that fails to parse contributes identity. Use
/// [`compose_chain_detailed`] to learn which entries were dropped.
///
/// # Arguments
///
/// * `ancestors` - Transform strings of the enclosing elements, outermost first.
/// * `own` - The shape's own `transform` attribute, if any.
///
/// # Returns
///
/// The single matrix mapping shape coordinates to document coordinates.
pub fn compose_chain<S: AsRef<str>>(ancestors: &[S], own: Option<&str>) -> AffineTransform {
    compose_chain_detailed(ancestors, own).transform
}

pub fn compose_chain_detailed<S: AsRef<str>>(ancestors: &[S], own: Option<&str>) -> ComposedTransform {
    let mut transform = AffineTransform::identity();
    let mut ignored = Vec::new();

    for raw in ancestors.iter().map(|s| s.as_ref()).chain(own) {
        if raw.trim().is_empty() {
            continue;
        }
        match parse_transform(raw) {
            Some(m) => transform = transform.multiply(&m),
            None => {
                warn!("[compose_chain] Treating unparseable transform '{}' as identity", raw);
                ignored.push(raw.to_string());
            }
        }
    }

    ComposedTransform { transform, ignored }
}
