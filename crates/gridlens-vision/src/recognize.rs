//! The recognition seam and the reading acceptance rule.

use gridlens_core::Digit;
use image::GrayImage;

/// Confidence below which a reading is discarded, exclusive.
pub const MIN_CONFIDENCE: f32 = 20.0;

/// A raw reading produced by a recognition backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    /// The recognized text, possibly with surrounding whitespace.
    pub text: String,
    /// The backend's confidence in the reading, 0 to 100.
    pub confidence: f32,
}

/// A backend failure while reading one cell.
///
/// The pipeline treats this as a degraded cell, not a scan failure.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("digit recognition failed: {message}")]
pub struct RecognizeError {
    /// Backend-specific description of the failure.
    pub message: String,
}

/// Reads the digit out of one prepared cell image.
///
/// Implementations receive a binarized, downscaled cell and return
/// whatever their engine saw; the pipeline applies the acceptance rule
/// afterwards, so a backend is free to report empty text or junk for a
/// blank cell. Cells are recognized concurrently, hence the `Send +
/// Sync` bound.
pub trait DigitRecognizer: Send + Sync {
    /// Produces a raw reading for a cell image.
    ///
    /// # Errors
    ///
    /// Returns a [`RecognizeError`] when the backend cannot produce a
    /// reading at all.
    fn recognize(&self, cell: &GrayImage) -> Result<Reading, RecognizeError>;
}

/// Applies the acceptance rule to a raw reading.
///
/// A reading is accepted when its trimmed text parses as a digit 1
/// through 9 and its confidence exceeds [`MIN_CONFIDENCE`]. Everything
/// else, including multi-character text and the digit 0, yields an
/// empty cell.
#[must_use]
pub fn accept(reading: &Reading) -> Option<Digit> {
    if reading.confidence <= MIN_CONFIDENCE {
        return None;
    }
    let value: u8 = reading.text.trim().parse().ok()?;
    Digit::try_from_value(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(text: &str, confidence: f32) -> Reading {
        Reading {
            text: text.to_owned(),
            confidence,
        }
    }

    #[test]
    fn test_accept_confident_digit() {
        assert_eq!(accept(&reading("7", 88.0)), Some(Digit::D7));
        assert_eq!(accept(&reading(" 3\n", 20.1)), Some(Digit::D3));
    }

    #[test]
    fn test_reject_low_confidence() {
        assert_eq!(accept(&reading("7", 20.0)), None);
        assert_eq!(accept(&reading("7", 5.0)), None);
    }

    #[test]
    fn test_reject_non_digit_text() {
        assert_eq!(accept(&reading("", 90.0)), None);
        assert_eq!(accept(&reading("0", 90.0)), None);
        assert_eq!(accept(&reading("12", 90.0)), None);
        assert_eq!(accept(&reading("g", 90.0)), None);
    }
}
