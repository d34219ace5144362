// src/reader.rs
use crate::error::{HeaderError, Result};
use crate::parser::parse_header;
use crate::record::Header;
use std::fs;
use std::path::{Path, PathBuf};

/// Read and parse the header file for `record_name`.
///
/// Locates `<record_name>.hea` (the name may carry a directory prefix), reads
/// it fully, and parses it into a record of the appropriate mode. The file
/// handle is closed on every exit path.
pub fn read_header(record_name: impl AsRef<Path>) -> Result<Header> {
    let path = header_path(record_name.as_ref());
    let text = fs::read_to_string(&path).map_err(|source| HeaderError::Io {
        path: path.clone(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "read header file");
    parse_header(&text)
}

/// Append `.hea` rather than replacing an extension; record names may
/// themselves contain dots.
fn header_path(record_name: &Path) -> PathBuf {
    let mut os = record_name.as_os_str().to_os_string();
    os.push(".hea");
    PathBuf::from(os)
}
