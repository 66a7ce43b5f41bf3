//! Input resolution: turns a test case's declared input into stdin bytes.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::ResourceError;
use crate::manifest::ScalarValue;

/// Resolves a declared input to the raw bytes fed to the program.
///
/// Values ending in `.txt` are read from `input_dir`; anything else is used
/// as literal text.
pub fn resolve_input(input: &ScalarValue, input_dir: &Path) -> Result<Vec<u8>, ResourceError> {
    if input.is_file_reference() {
        let path = input_dir.join(input.to_text());
        if !path.is_file() {
            return Err(ResourceError::InputNotFound(path));
        }
        let bytes = fs::read(&path).map_err(|source| ResourceError::Io {
            path: path.clone(),
            source,
        })?;
        debug!("Read {} input bytes from {}", bytes.len(), path.display());
        return Ok(bytes);
    }

    Ok(input.to_text().into_bytes())
}
