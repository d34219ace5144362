// src/lib.rs
//! # wfdb-rs
//!
//! A Rust library for reading and writing WFDB header files (`.hea`), the
//! text-based metadata format used by PhysioNet waveform databases to
//! describe how raw signal samples are laid out on disk.
//!
//! ## Features
//!
//! - ✅ **Spec-driven codec**: a declarative field table drives dependency
//!   resolution, default inference, validation and serialization
//! - 🔁 **Symmetric**: parsing a serialized record reproduces it field for field
//! - 🧾 **Complete diagnostics**: validation accumulates every violation
//!   instead of stopping at the first
//! - 📐 **Two header shapes**: single-segment (signal lines) and
//!   multi-segment (segment lines) records over a shared base
//!
//! ## Quick Start
//!
//! ### Writing a header
//!
//! ```rust,no_run
//! use wfdb_rs::*;
//!
//! fn main() -> Result<()> {
//!     let mut record = Record::new("100");
//!     record.base.n_sig = Some(2);
//!     record.base.fs = Some(360.0);
//!     record.base.sig_len = Some(650000);
//!     record.signals.push(SignalSpec::new("100.dat", "212"));
//!     record.signals.push(SignalSpec::new("100.dat", "212"));
//!
//!     // Resolves required fields, fills defaults, validates, then writes
//!     // 100.hea into the current directory.
//!     write_header(&record, ".")?;
//!     Ok(())
//! }
//! ```
//!
//! ### Reading a header
//!
//! ```rust,no_run
//! use wfdb_rs::*;
//!
//! fn main() -> Result<()> {
//!     match read_header("100")? {
//!         Header::Single(record) => {
//!             for signal in &record.signals {
//!                 println!("{:?}: {:?}", signal.sig_name, signal.units);
//!             }
//!         }
//!         Header::Multi(record) => {
//!             println!("{} segments", record.segments.len());
//!         }
//!     }
//!     Ok(())
//! }
//! ```

// Modules
pub mod error;
pub mod parser;
pub mod reader;
pub mod record;
pub mod spec;
pub mod types;
pub mod validator;
pub mod writer;

// Re-export commonly used types at the crate root for convenience
pub use error::{HeaderError, Result};

// Type exports
pub use types::{FieldKind, FieldValue, RecordMode};

// Field specification exports
pub use spec::{FieldSpec, FieldSet};

// Record model exports
pub use record::{Header, MultiRecord, Record, RecordHeader, SegmentSpec, SignalSpec};

// Codec exports
pub use parser::parse_header;
pub use reader::read_header;
pub use validator::validate;
pub use writer::{serialize, write_header, write_multi_header};

// Prelude module for glob imports
pub mod prelude {
    //! Convenient imports for common use cases.
    //!
    //! ```rust
    //! use wfdb_rs::prelude::*;
    //! ```

    pub use crate::error::{HeaderError, Result};
    pub use crate::reader::read_header;
    pub use crate::record::{Header, MultiRecord, Record, SegmentSpec, SignalSpec};
    pub use crate::types::{FieldValue, RecordMode};
    pub use crate::writer::{write_header, write_multi_header};
}

/// The library version
pub const LIBRARY_VERSION: &str = env!("CARGO_PKG_VERSION");
