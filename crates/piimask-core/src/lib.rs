//! PII classification and redaction for tabular records.
//!
//! Each record is checked for standalone identifiers (phone, aadhar,
//! passport, UPI handle) and for identifying combinations of
//! quasi-identifiers (name, email, address, IP, device id). Matching fields
//! are replaced by masks that keep some shape for auditing.

pub mod batch;
pub mod detector;
pub mod error;
pub mod mask;
pub mod payload;
pub mod pipeline;
pub mod policy;
pub mod redactor;
pub mod types;

pub use batch::{process_csv, process_file};
pub use detector::{evaluate, is_combinatorial_pii, is_standalone_pii};
pub use error::{Error, Result};
pub use pipeline::{BatchSummary, Outcome, Pipeline};
pub use policy::{AadharMask, PolicyBuilder, RedactionPolicy, ShortValueMask};
pub use redactor::Redactor;
pub use types::{FieldValue, PiiKind, RedactedRecord, Record, Verdict};
