use crate::{
    mask::is_full_name,
    policy::{standalone_rule, QUASI_IDENTIFIERS},
    types::{PiiKind, Record, Verdict},
};

/// True as soon as any textual field satisfies its standalone rule.
///
/// Does not say which field matched; the redactor re-tests fields itself.
pub fn is_standalone_pii(record: &Record) -> bool {
    record.fields.iter().any(|(key, value)| {
        match (standalone_rule(key), value.as_text()) {
            (Some(rule), Some(text)) => rule.matches(text),
            _ => false,
        }
    })
}

/// `name` with an interior space, or both halves of the name pair
pub fn has_full_name(record: &Record) -> bool {
    record.text("name").is_some_and(is_full_name)
        || (record.has_text("first_name") && record.has_text("last_name"))
}

/// True when two or more quasi-identifiers co-occur in one of the
/// identifying combinations.
pub fn is_combinatorial_pii(record: &Record) -> bool {
    let present = QUASI_IDENTIFIERS
        .iter()
        .filter(|kind| record.has_text(kind.field_key()))
        .count();
    // A lone quasi-identifier is never PII
    if present < 2 {
        return false;
    }

    let has = |kind: PiiKind| record.has_text(kind.field_key());
    let email = has(PiiKind::Email);
    let address = has(PiiKind::Address);
    let ip = has(PiiKind::IpAddress);
    let device = has(PiiKind::DeviceId);

    (has_full_name(record) && (email || address || ip || device))
        || (email && (address || ip || device))
        || (address && (ip || device))
        || (ip && device)
}

/// Computes both verdicts once, for reuse by the redactor
pub fn evaluate(record: &Record) -> Verdict {
    Verdict {
        standalone: is_standalone_pii(record),
        combinatorial: is_combinatorial_pii(record),
    }
}
