//! Photographic Sudoku reconstruction.
//!
//! This crate turns a photograph or screenshot of a Sudoku grid into a
//! [`Board`](gridlens_core::Board). The pipeline is a fixed sequence of
//! image stages followed by per-cell digit recognition:
//!
//! 1. decode and shrink the upload to a bounded working size,
//! 2. convert to grayscale and binarize with an Otsu-derived threshold,
//! 3. crop to the inked content and cut it into an evenly spaced 9x9
//!    grid of cell images,
//! 4. recognize each cell independently (fanned out across a thread
//!    pool) and keep only confident single-digit readings,
//! 5. assemble the accepted digits into a board.
//!
//! Recognition itself is behind the [`DigitRecognizer`] trait; the
//! pipeline supplies prepared cell images and applies the acceptance
//! rule, while the backend decides what the ink says. Cells the backend
//! cannot read degrade to empty instead of failing the scan.
//!
//! [`work`] offloads a whole scan to a shared background thread so a
//! caller can keep polling without blocking on image work.

pub mod assemble;
mod error;
pub mod pipeline;
pub mod preprocess;
pub mod recognize;
pub mod testing;
pub mod work;

pub use self::{
    error::ScanError,
    pipeline::ScanPipeline,
    preprocess::BoundingBox,
    recognize::{DigitRecognizer, Reading, RecognizeError},
    work::{ScanHandle, WorkError},
};
