//! JSON reading and writing of shape lists.
//!
//! A shape list is a JSON array of [`ShapeDescriptor`] records, the same
//! form the host stores in its layout.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use super::model::ShapeDescriptor;
use crate::error::ShapeDrawError;

/// Reads a shape list from a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn read_shapes_json(path: &Path) -> Result<Vec<ShapeDescriptor>, ShapeDrawError> {
    let file = File::open(path).map_err(ShapeDrawError::Io)?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|source| ShapeDrawError::ShapesJsonParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes a shape list to a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_shapes_json(path: &Path, shapes: &[ShapeDescriptor]) -> Result<(), ShapeDrawError> {
    let file = File::create(path).map_err(ShapeDrawError::Io)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, shapes).map_err(|source| {
        ShapeDrawError::ShapesJsonWrite {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Reads a shape list from a JSON string.
pub fn from_json_str(json: &str) -> Result<Vec<ShapeDescriptor>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Writes a shape list to a pretty-printed JSON string.
pub fn to_json_string(shapes: &[ShapeDescriptor]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(shapes)
}
