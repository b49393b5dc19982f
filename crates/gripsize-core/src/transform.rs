//! Parsing and formatting of CSS 2-D transform values.
//!
//! The host reports an element's transform as its computed `transform`
//! property, which is either `none` or `matrix(a, b, c, d, e, f)`. The six
//! coefficients map directly onto [`kurbo::Affine`].

use crate::error::{ResizeError, ResizeResult};
use kurbo::Affine;

/// Parse a computed `transform` value.
///
/// `none` and the empty string yield the identity. Anything other than a
/// 2-D `matrix(...)` with six finite numbers is rejected, since the anchor
/// math reads the translation components directly.
pub fn parse_transform(value: &str) -> ResizeResult<Affine> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed == "none" {
        return Ok(Affine::IDENTITY);
    }

    let malformed = || ResizeError::MalformedTransform(value.to_string());

    let inner = trimmed
        .strip_prefix("matrix(")
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(malformed)?;

    let mut coeffs = [0.0; 6];
    let mut count = 0;
    for part in inner.split(',') {
        if count == coeffs.len() {
            return Err(malformed());
        }
        let n: f64 = part.trim().parse().map_err(|_| malformed())?;
        if !n.is_finite() {
            return Err(malformed());
        }
        coeffs[count] = n;
        count += 1;
    }
    if count != coeffs.len() {
        return Err(malformed());
    }

    Ok(Affine::new(coeffs))
}

/// Format an affine as a CSS `matrix(...)` value.
pub fn format_transform(transform: Affine) -> String {
    let [a, b, c, d, e, f] = transform.as_coeffs();
    format!("matrix({a}, {b}, {c}, {d}, {e}, {f})")
}

/// Return `base` with its translation shifted by `(dx, dy)`.
///
/// Only the translation coefficients change; any scale or skew already on
/// the element is kept as is.
pub fn offset_translation(base: Affine, dx: f64, dy: f64) -> Affine {
    let mut coeffs = base.as_coeffs();
    coeffs[4] += dx;
    coeffs[5] += dy;
    Affine::new(coeffs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_is_identity() {
        assert_eq!(parse_transform("none").unwrap(), Affine::IDENTITY);
        assert_eq!(parse_transform("").unwrap(), Affine::IDENTITY);
    }

    #[test]
    fn test_parse_matrix() {
        let t = parse_transform("matrix(1, 0, 0, 1, 12.5, -4)").unwrap();
        assert_eq!(t.as_coeffs(), [1.0, 0.0, 0.0, 1.0, 12.5, -4.0]);

        let compact = parse_transform("matrix(2,0,0,2,3,4)").unwrap();
        assert_eq!(compact.as_coeffs(), [2.0, 0.0, 0.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_malformed() {
        for bad in [
            "translate(10px, 5px)",
            "matrix3d(1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1)",
            "matrix(1, 0, 0, 1, 0)",
            "matrix(1, 0, 0, 1, 0, 0, 0)",
            "matrix(1, 0, 0, 1, x, 0)",
            "matrix(1, 0, 0, 1, 0, 0",
            "matrix(1, 0, 0, 1, inf, 0)",
        ] {
            assert!(
                matches!(parse_transform(bad), Err(ResizeError::MalformedTransform(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_format_then_parse() {
        let t = Affine::new([1.0, 0.0, 0.0, 1.0, -30.0, 7.25]);
        let s = format_transform(t);
        assert_eq!(s, "matrix(1, 0, 0, 1, -30, 7.25)");
        assert_eq!(parse_transform(&s).unwrap(), t);
    }

    #[test]
    fn test_offset_translation_keeps_scale() {
        let base = Affine::new([2.0, 0.0, 0.0, 3.0, 10.0, 20.0]);
        let moved = offset_translation(base, -5.0, 1.0);
        assert_eq!(moved.as_coeffs(), [2.0, 0.0, 0.0, 3.0, 5.0, 21.0]);
    }
}
