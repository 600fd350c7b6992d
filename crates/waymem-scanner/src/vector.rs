//! Game vector parsing: three space-separated numbers.

use waymem_core::errors::ScanError;
use waymem_core::models::Position;

/// A decimal number as the game prints it: optional sign, no exponent.
pub(crate) const NUMBER: &str = r"[-+]?(?:\d+(?:\.\d*)?|\.\d+)";

/// Parse `"x y z"`. Anything other than exactly three finite numbers is a
/// malformed record.
pub fn parse_vector(raw: &str) -> Result<Position, ScanError> {
    let malformed = |reason: String| ScanError::MalformedRecord {
        raw: raw.to_string(),
        reason,
    };

    let tokens: Vec<&str> = raw.split_whitespace().collect();
    if tokens.len() != 3 {
        return Err(malformed(format!(
            "expected 3 components, found {}",
            tokens.len()
        )));
    }

    let mut coords = [0.0f64; 3];
    for (slot, token) in coords.iter_mut().zip(&tokens) {
        let value: f64 = token
            .parse()
            .map_err(|_| malformed(format!("`{token}` is not a number")))?;
        if !value.is_finite() {
            return Err(malformed(format!("`{token}` is not finite")));
        }
        *slot = value;
    }

    Ok(Position::from(coords))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_three_numbers_with_any_spacing() {
        assert_eq!(parse_vector(" -320   96.5  -16 ").unwrap(), Position::new(-320.0, 96.5, -16.0));
    }

    #[test]
    fn wrong_arity_is_malformed() {
        assert!(matches!(parse_vector("12 34"), Err(ScanError::MalformedRecord { .. })));
        assert!(parse_vector("1 2 3 4").is_err());
        assert!(parse_vector("").is_err());
    }

    #[test]
    fn non_numeric_and_non_finite_are_malformed() {
        assert!(parse_vector("1 two 3").is_err());
        assert!(parse_vector("1 inf 3").is_err());
        assert!(parse_vector("NaN 0 0").is_err());
    }
}
