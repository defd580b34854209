//! Document number generation.
//!
//! Each document kind numbers its own series: `INV-0001`, `INV-0002`, ...
//! for invoices and `Q-0001`, `Q-0002`, ... for quotations. Widths are fixed
//! at four digits per series and grow naturally past 9999. Uniqueness is
//! enforced by a unique index at the storage layer; callers retry once on a
//! duplicate-number conflict before surfacing it.

use crm_core::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Series {
    Invoice,
    Quotation,
}

impl Series {
    pub fn prefix(&self) -> &'static str {
        match self {
            Series::Invoice => "INV",
            Series::Quotation => "Q",
        }
    }

    pub fn seed(&self) -> String {
        format!("{}-0001", self.prefix())
    }
}

/// Next number in the series given the most-recently-issued one.
///
/// Parses the numeric suffix after the last `-`. A malformed suffix is a
/// hard error: creation must be rejected rather than emit a garbage number.
pub fn next(series: Series, last: Option<&str>) -> Result<String, AppError> {
    let Some(last) = last else {
        return Ok(series.seed());
    };

    let suffix = last
        .rsplit_once('-')
        .map(|(_, s)| s)
        .ok_or_else(|| malformed(last))?;
    let n: u64 = suffix.parse().map_err(|_| malformed(last))?;

    Ok(format!("{}-{:04}", series.prefix(), n + 1))
}

fn malformed(number: &str) -> AppError {
    AppError::InternalError(anyhow::anyhow!(
        "malformed document number in series: {}",
        number
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_series_returns_seed() {
        assert_eq!(next(Series::Invoice, None).unwrap(), "INV-0001");
        assert_eq!(next(Series::Quotation, None).unwrap(), "Q-0001");
    }

    #[test]
    fn increments_numeric_suffix() {
        assert_eq!(next(Series::Invoice, Some("INV-0042")).unwrap(), "INV-0043");
        assert_eq!(next(Series::Quotation, Some("Q-0009")).unwrap(), "Q-0010");
    }

    #[test]
    fn width_grows_past_padding() {
        assert_eq!(
            next(Series::Invoice, Some("INV-9999")).unwrap(),
            "INV-10000"
        );
    }

    #[test]
    fn parses_suffix_after_last_dash() {
        // Prefixes containing a dash must not confuse the parser.
        assert_eq!(
            next(Series::Invoice, Some("INV-2024-0007")).unwrap(),
            "INV-0008"
        );
    }

    #[test]
    fn non_numeric_suffix_fails_fast() {
        assert!(next(Series::Invoice, Some("INV-XYZ")).is_err());
        assert!(next(Series::Invoice, Some("garbage")).is_err());
    }
}
