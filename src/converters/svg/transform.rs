//! Parses SVG `transform` attribute values into an `AffineTransform`.
//!
//! Supported functions: `matrix`, `translate`, `scale`, `rotate`. A list of
//! functions composes left to right (the leftmost is outermost), so
//! `"translate(10) scale(2)"` scales first and translates second.

use super::utils::parse_lenient_numbers;
use crate::models::AffineTransform;
use log::debug;

/// Parses a transform list.
///
/// Returns `None` when the string is empty, syntactically broken, or names a
/// function outside the supported four; callers treat that as identity.
/// Numeric tokens that fail to parse degrade to the neutral value of their slot
/// (0 for translations, angles and rotation centres, 1 for scale factors and the
/// matrix diagonal) instead of rejecting the whole list.
///
/// # Arguments
///
/// * `input` - The raw value of a `transform` attribute.
///
/// # Returns
///
/// The composed matrix, or `None` if the list cannot be used at all.
pub fn parse_transform(input: &str) -> Option<AffineTransform> {
    let mut rest = input.trim();
    if rest.is_empty() {
        return None;
    }

    let mut out = AffineTransform::identity();
    while !rest.is_empty() {
        let open = rest.find('(')?;
        let name = rest[..open].trim();
        let close = open + 1 + rest[open + 1..].find(')')?;
        let args = parse_lenient_numbers(&rest[open + 1..close]);

        let m = parse_function(name, &args)?;
        out = out.multiply(&m);

        rest = rest[close + 1..].trim_start_matches(|c: char| c.is_whitespace() || c == ',');
    }
    Some(out)
}

fn parse_function(name: &str, args: &[Option<f64>]) -> Option<AffineTransform> {
    let arg = |i: usize, neutral: f64| args.get(i).copied().flatten().unwrap_or(neutral);

    let m = match (name, args.len()) {
        ("matrix", 6) => AffineTransform::new(
            arg(0, 1.0),
            arg(1, 0.0),
            arg(2, 0.0),
            arg(3, 1.0),
            arg(4, 0.0),
            arg(5, 0.0),
        ),
        ("translate", 1 | 2) => AffineTransform::translate(arg(0, 0.0), arg(1, 0.0)),
        ("scale", 1 | 2) => {
            let sx = arg(0, 1.0);
            let sy = if args.len() == 2 { arg(1, 1.0) } else { sx };
            AffineTransform::scale(sx, sy)
        }
        ("rotate", 1) => AffineTransform::rotate(arg(0, 0.0)),
        ("rotate", 3) => AffineTransform::rotate_about(arg(0, 0.0), arg(1, 0.0), arg(2, 0.0)),
        _ => {
            debug!(
                "[parse_transform] Unsupported transform function '{}' with {} argument(s)",
                name,
                args.len()
            );
            return None;
        }
    };

    if args.iter().any(Option::is_none) {
        debug!(
            "[parse_transform] Malformed numeric argument in '{}', using neutral value",
            name
        );
    }
    Some(m)
}
