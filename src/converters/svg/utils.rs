//! Attribute-level number helpers on top of `svgtypes`.

use std::str::FromStr;

use svgtypes::NumberListParser;

use crate::models::{Point, ViewBox};

/// Splits a transform argument list into one slot per `comma-wsp` separated token.
///
/// A token that is not entirely numeric becomes a single `None` slot, so callers
/// can substitute a neutral value without shifting the remaining arguments.
/// Packed tokens such as `"10-5"` still yield both numbers.
///
/// # Arguments
///
/// * `input` - The text between the parentheses of a transform function.
///
/// # Returns
///
/// One entry per argument, `None` where the token could not be read.
pub(crate) fn parse_lenient_numbers(input: &str) -> Vec<Option<f64>> {
    let mut values = Vec::new();
    for piece in input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|piece| !piece.is_empty())
    {
        match NumberListParser::from(piece).collect::<Result<Vec<f64>, _>>() {
            Ok(numbers) if !numbers.is_empty() && numbers.iter().all(|n| n.is_finite()) => {
                values.extend(numbers.into_iter().map(Some));
            }
            _ => values.push(None),
        }
    }
    values
}

/// Parses a `points` attribute into pairs.
///
/// A trailing unpaired coordinate is dropped, as SVG renderers do; any
/// non-numeric content is an error.
pub(crate) fn parse_points(input: &str) -> Result<Vec<Point>, svgtypes::Error> {
    let coords = NumberListParser::from(input).collect::<Result<Vec<f64>, _>>()?;
    if coords.len() % 2 == 1 {
        log::debug!("Dropping unpaired trailing coordinate in points list");
    }
    Ok(coords
        .chunks_exact(2)
        .map(|pair| Point::new(pair[0], pair[1]))
        .collect())
}

pub(crate) fn parse_view_box(view_box: Option<&str>) -> Option<ViewBox> {
    let vb = svgtypes::ViewBox::from_str(view_box?.trim()).ok()?;
    (vb.w > 0.0 && vb.h > 0.0).then(|| ViewBox::new(vb.x, vb.y, vb.w, vb.h))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lenient_numbers_mark_bad_tokens() {
        assert_eq!(
            parse_lenient_numbers("12, abc 3"),
            vec![Some(12.0), None, Some(3.0)]
        );
        assert_eq!(parse_lenient_numbers("10-5.5"), vec![Some(10.0), Some(-5.5)]);
        assert_eq!(parse_lenient_numbers("  "), Vec::<Option<f64>>::new());
    }

    #[test]
    fn suffixed_token_takes_exactly_one_slot() {
        assert_eq!(parse_lenient_numbers("2px"), vec![None]);
        assert_eq!(parse_lenient_numbers("45deg 1 2"), vec![None, Some(1.0), Some(2.0)]);
        assert_eq!(
            parse_lenient_numbers("1 0 0 1 5px 0"),
            vec![Some(1.0), Some(0.0), Some(0.0), Some(1.0), None, Some(0.0)]
        );
    }

    #[test]
    fn points_parse_pairs_and_reject_garbage() {
        let points = parse_points("0,0 10,0 10,10 5").expect("valid points");
        assert_eq!(
            points,
            vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0)]
        );
        assert!(parse_points("0,0 x,1").is_err());
    }

    #[test]
    fn view_box_requires_positive_size() {
        assert_eq!(
            parse_view_box(Some("0 0 100 50")),
            Some(ViewBox::new(0.0, 0.0, 100.0, 50.0))
        );
        assert_eq!(parse_view_box(Some("0,0,10,-1")), None);
        assert_eq!(parse_view_box(Some("0 0 10")), None);
        assert_eq!(parse_view_box(None), None);
    }
}
