//! Read/write scheme JSON files.
//!
//! Scheme JSON is the portable representation of a quadrature rule in
//! compact orbit form:
//! - domain + claimed degree + test tolerance
//! - bibliographic source metadata and free-text comments
//! - the orbit list (weights + free parameters), written last
//!
//! The schema is defined by `domain::Scheme`. Serde writes fields in
//! declaration order and serde_json prints floats with shortest-roundtrip
//! precision, so a written file re-parses to bit-identical numbers and the
//! bulk numeric payload ends the file.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::domain::Scheme;
use crate::error::AppError;

/// Read and structurally validate a scheme JSON file.
pub fn read_scheme_json(path: &Path) -> Result<Scheme, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::io(format!("Failed to open scheme '{}': {e}", path.display())))?;
    let scheme: Scheme = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        AppError::malformed(format!("Invalid scheme JSON '{}': {e}", path.display()))
    })?;
    scheme.validate()?;
    Ok(scheme)
}

/// Write a scheme JSON file.
pub fn write_scheme_json(path: &Path, scheme: &Scheme) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create scheme '{}': {e}", path.display())))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, scheme)
        .map_err(|e| AppError::io(format!("Failed to write scheme JSON: {e}")))?;
    Ok(())
}
