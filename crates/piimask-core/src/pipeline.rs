use crate::{
    detector, payload,
    policy::RedactionPolicy,
    redactor::Redactor,
    types::{RedactedRecord, Record, Verdict},
};
use tracing::{debug, warn};

/// Result row for one input record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub record_id: String,
    pub redacted_payload: String,
    pub is_pii: bool,
    /// False when the payload could not be decoded and the sentinel was emitted
    pub decoded: bool,
}

impl Outcome {
    pub fn sentinel(record_id: &str) -> Self {
        Self {
            record_id: record_id.to_string(),
            redacted_payload: payload::SENTINEL_PAYLOAD.to_string(),
            is_pii: false,
            decoded: false,
        }
    }
}

/// Running totals over a batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub pii: usize,
    pub decode_failures: usize,
}

impl BatchSummary {
    pub fn record(&mut self, outcome: &Outcome) {
        self.total += 1;
        if outcome.is_pii {
            self.pii += 1;
        }
        if !outcome.decoded {
            self.decode_failures += 1;
        }
    }
}

/// Per-record classify-and-redact cycle. Holds no state across records.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    redactor: Redactor,
}

impl Pipeline {
    pub fn new(policy: RedactionPolicy) -> Self {
        Self {
            redactor: Redactor::new(policy),
        }
    }

    /// Evaluate once, then redact with that same verdict
    pub fn classify(&self, record: &Record) -> (Verdict, RedactedRecord) {
        let verdict = detector::evaluate(record);
        (verdict, self.redactor.redact(record, verdict))
    }

    /// Decode, classify and redact one raw payload. Never fails: a payload
    /// that cannot be decoded yields the sentinel outcome.
    pub fn process(&self, record_id: &str, raw: &str) -> Outcome {
        let record = match payload::decode(record_id, raw) {
            Ok(record) => record,
            Err(e) => {
                warn!(record_id = %record_id, error = %e, "Skipping record with malformed payload");
                debug!(record_id = %record_id, payload = %raw, "Problematic payload");
                return Outcome::sentinel(record_id);
            }
        };

        let (verdict, redacted) = self.classify(&record);
        debug!(
            record_id = %record_id,
            standalone = verdict.standalone,
            combinatorial = verdict.combinatorial,
            "Classified record"
        );

        match payload::encode(&redacted) {
            Ok(redacted_payload) => Outcome {
                record_id: record_id.to_string(),
                redacted_payload,
                is_pii: verdict.is_pii(),
                decoded: true,
            },
            Err(e) => {
                warn!(record_id = %record_id, error = %e, "Failed to encode redacted record");
                Outcome::sentinel(record_id)
            }
        }
    }

    /// One outcome per input row, in input order
    pub fn process_batch<'a, I>(&self, rows: I) -> (Vec<Outcome>, BatchSummary)
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut summary = BatchSummary::default();
        let outcomes: Vec<Outcome> = rows
            .into_iter()
            .map(|(id, raw)| {
                let outcome = self.process(id, raw);
                summary.record(&outcome);
                outcome
            })
            .collect();
        (outcomes, summary)
    }
}
