#![warn(clippy::pedantic)]

//! Structured error annotation for the TTLV codec.
//!
//! Codec failures are rooted in a [`CodecError`] sentinel (or a lower-level
//! error passed through), then wrapped as they unwind through nested
//! structures. Each wrap can add a field tag, the type of the value being
//! processed, a path breadcrumb, a protocol [`ResultReason`], and a
//! captured trace. Nothing is formatted until [`details`] or one of the
//! getters is called.
//!
//! ```text
//!   codec detects failure
//!        │
//!        ▼
//!   CodecError::InvalidLen ──► tag_error(err, Tag::KEY_VALUE, &value)
//!        │                          (trace + context + "KeyValue: " prefix)
//!        ▼
//!   push_path("KeyBlock") ──► push_path("SymmetricKey") ──► caller
//!        │
//!        ▼
//!   details(Some(&err)) / err.is(&[CodecError::InvalidLen])
//! ```

pub mod config;
pub mod context;
pub mod details;
pub mod error;
pub mod reason;
pub mod sentinel;
pub mod tagging;

mod trace;

pub use config::{ConfigError, TraceConfig};
pub use context::{Describe, ErrorContext, Kind, TypeDescriptor, get_error_context, with_error_context};
pub use details::details;
pub use error::{AttributeKey, Error, is};
pub use reason::{get_result_reason, with_result_reason};
pub use sentinel::CodecError;
pub use tagging::{ResultExt, tag_error, tag_error_skipping};

pub use ttlv_types::{ResultReason, Tag};

/// Convenience alias for codec results.
pub type Result<T, E = Error> = std::result::Result<T, E>;
