//! Recognition doubles for pipeline and session tests.
//!
//! Cells are recognized concurrently in no particular order, so these
//! doubles are stateless: they answer from the call alone rather than
//! from a scripted call sequence.

use image::GrayImage;

use crate::recognize::{DigitRecognizer, Reading, RecognizeError};

/// A backend that returns the same reading for every cell.
#[derive(Debug, Clone)]
pub struct FixedRecognizer {
    reading: Reading,
}

impl FixedRecognizer {
    /// Creates a backend answering `text` at `confidence` for every
    /// cell.
    #[must_use]
    pub fn reading(text: &str, confidence: f32) -> Self {
        Self {
            reading: Reading {
                text: text.to_owned(),
                confidence,
            },
        }
    }
}

impl DigitRecognizer for FixedRecognizer {
    fn recognize(&self, _cell: &GrayImage) -> Result<Reading, RecognizeError> {
        Ok(self.reading.clone())
    }
}

/// A backend that fails on every cell.
#[derive(Debug, Clone, Copy)]
pub struct FailingRecognizer;

impl DigitRecognizer for FailingRecognizer {
    fn recognize(&self, _cell: &GrayImage) -> Result<Reading, RecognizeError> {
        Err(RecognizeError {
            message: "engine unavailable".to_owned(),
        })
    }
}
