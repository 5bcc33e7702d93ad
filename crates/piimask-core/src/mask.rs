//! Field-specific masking transforms.
//!
//! Standalone masks receive a value that already passed its rule, so they can
//! rely on the rule's shape (ASCII digits, fixed length). Quasi-identifier
//! masks take arbitrary text and must not panic on short or odd input.

use crate::policy::{AadharMask, RedactionPolicy, ShortValueMask};
use crate::types::PiiKind;

const MASK: char = 'X';

/// `9876543210` -> `98XXXXXX10`
pub fn phone(value: &str, _policy: &RedactionPolicy) -> String {
    format!("{}XXXXXX{}", &value[..2], &value[value.len() - 2..])
}

/// `123456789012` -> `1234 XXXX XXXX`
pub fn aadhar(digits: &str, policy: &RedactionPolicy) -> String {
    let (kept, rest) = digits.split_at(4);
    match policy.aadhar_mask() {
        AadharMask::FixedWidth => format!("{kept} XXXX XXXX"),
        AadharMask::Proportional => {
            let mut out = String::from(kept);
            for (i, _) in rest.chars().enumerate() {
                if i % 4 == 0 {
                    out.push(' ');
                }
                out.push(MASK);
            }
            out
        }
    }
}

/// `P1234567` -> `PXXXXXXX`
pub fn passport(value: &str, _policy: &RedactionPolicy) -> String {
    format!("{}XXXXXXX", &value[..1])
}

pub fn upi_id(_value: &str, _policy: &RedactionPolicy) -> String {
    literal(PiiKind::UpiId)
}

fn literal(kind: PiiKind) -> String {
    kind.placeholder().unwrap_or("[REDACTED]").to_string()
}

/// First character followed by one `X` per remaining character
pub fn word(value: &str, policy: &RedactionPolicy) -> String {
    let mut chars = value.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let rest = chars.count();
    if rest == 0 {
        return match policy.short_value() {
            ShortValueMask::MaskAll => MASK.to_string(),
            ShortValueMask::KeepFirst => first.to_string(),
        };
    }
    let mut out = String::with_capacity(1 + rest);
    out.push(first);
    out.extend(std::iter::repeat(MASK).take(rest));
    out
}

/// Each space-separated part masked with [`word`]; spacing is preserved
pub fn full_name(value: &str, policy: &RedactionPolicy) -> String {
    value
        .split(' ')
        .map(|part| word(part, policy))
        .collect::<Vec<_>>()
        .join(" ")
}

/// `jane@x.com` -> `jXXXX@x.com`
pub fn email(value: &str, _policy: &RedactionPolicy) -> String {
    match value.split_once('@') {
        Some((local, domain)) => {
            let first: String = local.chars().take(1).collect();
            format!("{first}XXXX@{domain}")
        }
        None => {
            let first: String = value.chars().take(1).collect();
            format!("{first}XXXX")
        }
    }
}

/// Mask for a field in the combinatorial branch, `None` if the kind keeps its value.
///
/// `name` is only masked when it looks like a full name; a single token is
/// left as is.
pub fn quasi_identifier(kind: PiiKind, value: &str, policy: &RedactionPolicy) -> Option<String> {
    match kind {
        PiiKind::Name if is_full_name(value) => Some(full_name(value, policy)),
        PiiKind::Name => None,
        PiiKind::FirstName | PiiKind::LastName => Some(word(value, policy)),
        PiiKind::Email => Some(email(value, policy)),
        PiiKind::Address | PiiKind::IpAddress | PiiKind::DeviceId => Some(literal(kind)),
        PiiKind::Phone | PiiKind::Aadhar | PiiKind::Passport | PiiKind::UpiId => None,
    }
}

/// A space with a non-space on each side somewhere, i.e. "first last"
pub fn is_full_name(value: &str) -> bool {
    value.trim().contains(' ')
}
