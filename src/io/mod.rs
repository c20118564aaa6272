//! Mesh file formats

pub mod stl;

pub use stl::StlFormat;

/// Generic I/O and format‑conversion errors.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("std::io::Error: {0}")]
    StdIo(#[from] std::io::Error),

    #[error("Input is malformed: {0}")]
    MalformedInput(String),

    #[error("The path is malformed: {0}")]
    MalformedPath(String),
}
