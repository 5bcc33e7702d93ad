//! CSV batch boundary.
//!
//! Input: a header row, then `record_id,data_json` rows.
//! Output: `record_id,redacted_data_json,is_pii`, one row per input row.

use crate::{
    error::Result,
    pipeline::{BatchSummary, Outcome, Pipeline},
};
use std::{
    fs::File,
    io::{self, BufReader, BufWriter},
    path::Path,
};
use tracing::{info, warn};

pub const OUTPUT_HEADER: [&str; 3] = ["record_id", "redacted_data_json", "is_pii"];

/// Verdict column, written the way the legacy tool wrote it
fn verdict_label(is_pii: bool) -> &'static str {
    if is_pii {
        "True"
    } else {
        "False"
    }
}

/// Stream `input` through the pipeline into `output`.
///
/// Malformed or non UTF-8 payloads become sentinel rows; only I/O failures
/// abort the run.
pub fn process_csv<R, W>(pipeline: &Pipeline, input: R, output: W) -> Result<BatchSummary>
where
    R: io::Read,
    W: io::Write,
{
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);
    let mut writer = csv::Writer::from_writer(output);
    writer.write_record(OUTPUT_HEADER)?;

    let mut summary = BatchSummary::default();
    for row in reader.byte_records() {
        let row = row?;
        let record_id = String::from_utf8_lossy(row.get(0).unwrap_or_default());
        let outcome = match row.get(1).map(std::str::from_utf8) {
            Some(Ok(raw)) => pipeline.process(&record_id, raw),
            Some(Err(e)) => {
                warn!(record_id = %record_id, error = %e, "Skipping record with non UTF-8 payload");
                Outcome::sentinel(&record_id)
            }
            None => {
                warn!(record_id = %record_id, "Row has no payload column");
                Outcome::sentinel(&record_id)
            }
        };

        writer.write_record([
            outcome.record_id.as_str(),
            outcome.redacted_payload.as_str(),
            verdict_label(outcome.is_pii),
        ])?;
        summary.record(&outcome);
    }
    writer.flush()?;

    info!(
        total = summary.total,
        pii = summary.pii,
        decode_failures = summary.decode_failures,
        "Batch complete"
    );
    Ok(summary)
}

/// File-to-file wrapper around [`process_csv`]
pub fn process_file(pipeline: &Pipeline, input: &Path, output: &Path) -> Result<BatchSummary> {
    let reader = BufReader::new(File::open(input)?);
    let writer = BufWriter::new(File::create(output)?);
    process_csv(pipeline, reader, writer)
}
