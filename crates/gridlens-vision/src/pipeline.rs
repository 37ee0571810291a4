//! The scan pipeline from uploaded bytes to a board.

use std::sync::Arc;

use gridlens_core::{Board, Digit};
use image::{GrayImage, RgbaImage};
use rayon::prelude::*;

use crate::{
    ScanError, assemble,
    preprocess::{self, BoundingBox},
    recognize::{self, DigitRecognizer},
};

/// Smallest croppable grid side, in pixels.
///
/// Below this every cell would be empty after segmentation, so the
/// content cannot be a readable grid.
const MIN_GRID_SIDE: u32 = 9;

/// The full scan pipeline.
///
/// Owns a recognition backend and runs the fixed stage sequence
/// documented at the [crate root](crate). Cheap to clone; clones share
/// the backend.
#[derive(Clone)]
pub struct ScanPipeline {
    recognizer: Arc<dyn DigitRecognizer>,
}

impl std::fmt::Debug for ScanPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanPipeline").finish_non_exhaustive()
    }
}

impl ScanPipeline {
    /// Creates a pipeline around a recognition backend.
    #[must_use]
    pub fn new(recognizer: Arc<dyn DigitRecognizer>) -> Self {
        Self { recognizer }
    }

    /// Scans an uploaded image from its encoded bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Decode`] for undecodable bytes, otherwise
    /// whatever [`scan_image`](Self::scan_image) returns.
    pub fn scan_bytes(&self, bytes: &[u8]) -> Result<Board, ScanError> {
        let decoded = image::load_from_memory(bytes)
            .map_err(ScanError::Decode)?
            .to_rgba8();
        self.scan_image(&decoded)
    }

    /// Scans a decoded image.
    ///
    /// Cells whose reading fails or is rejected by the acceptance rule
    /// degrade to empty cells; the scan itself fails only when no grid
    /// content is found.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::GridNotFound`] when the binarized image has
    /// no inked content, or inked content smaller than 9 pixels a side.
    pub fn scan_image(&self, image: &RgbaImage) -> Result<Board, ScanError> {
        let working = preprocess::shrink_to_fit(image);
        let gray = preprocess::to_grayscale(&working);
        let threshold = preprocess::otsu_threshold(&gray);
        let binary = preprocess::binarize(&gray, threshold);
        log::debug!(
            "scanning {}x{} working image, otsu threshold {threshold}",
            working.width(),
            working.height()
        );

        let bounds = preprocess::content_bounds(&binary).ok_or(ScanError::GridNotFound)?;
        if bounds.width < MIN_GRID_SIDE || bounds.height < MIN_GRID_SIDE {
            log::debug!("inked content {bounds:?} is too small to be a grid");
            return Err(ScanError::GridNotFound);
        }
        let grid = preprocess::crop(&binary, bounds);
        let cells = preprocess::segment_cells(&grid);

        let digits: Vec<Option<Digit>> = cells
            .par_iter()
            .enumerate()
            .map(|(index, cell)| self.read_cell(index, cell))
            .collect();
        let recognized = digits.iter().flatten().count();
        log::info!("scan recognized {recognized} of 81 cells inside {bounds:?}");
        assemble::assemble_board(&digits)
    }

    fn read_cell(&self, index: usize, cell: &GrayImage) -> Option<Digit> {
        let downscaled = preprocess::downscale_half(cell);
        match self.recognizer.recognize(&downscaled) {
            Ok(reading) => recognize::accept(&reading),
            Err(err) => {
                log::warn!("cell {index} degraded to empty: {err}");
                None
            }
        }
    }
}

/// Reports the preprocessing outcome without running recognition.
///
/// Runs the stages up to segmentation and returns the working
/// dimensions, the Otsu threshold, and the content bounds. Used by
/// diagnostics tooling.
///
/// # Errors
///
/// Fails like [`ScanPipeline::scan_image`] does for gridless images.
pub fn preprocess_stats(image: &RgbaImage) -> Result<(u32, u32, u8, BoundingBox), ScanError> {
    let working = preprocess::shrink_to_fit(image);
    let gray = preprocess::to_grayscale(&working);
    let threshold = preprocess::otsu_threshold(&gray);
    let binary = preprocess::binarize(&gray, threshold);
    let bounds = preprocess::content_bounds(&binary).ok_or(ScanError::GridNotFound)?;
    if bounds.width < MIN_GRID_SIDE || bounds.height < MIN_GRID_SIDE {
        return Err(ScanError::GridNotFound);
    }
    Ok((working.width(), working.height(), threshold, bounds))
}
