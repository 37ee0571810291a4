//! Scan failure modes.

/// An error that aborts an image scan.
///
/// Unreadable individual cells are not errors; they degrade to empty
/// cells inside the pipeline. `ScanError` covers the cases where no
/// board can be produced at all.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ScanError {
    /// The uploaded bytes are not a decodable image.
    #[display("failed to decode the uploaded image: {_0}")]
    Decode(image::ImageError),
    /// No inked content was found, or the content is too small to hold
    /// a grid.
    #[display("no sudoku grid found in the image")]
    GridNotFound,
    /// The recognized cells do not form a 9x9 grid.
    #[display("recognized cells do not form a 9x9 grid")]
    UnrecognizableGrid,
}
