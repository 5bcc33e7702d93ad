use crate::{
    mask,
    policy::{standalone_rule, RedactionPolicy, COMBINATORIAL_MASKED},
    types::{FieldValue, RedactedRecord, Record, Verdict},
};

/// Redaction engine – applies type-specific masks to a record given its verdict
#[derive(Debug, Clone, Default)]
pub struct Redactor {
    policy: RedactionPolicy,
}

impl Redactor {
    pub fn new(policy: RedactionPolicy) -> Self {
        Self { policy }
    }

    /// Build a redacted copy of `record`. The input is never modified.
    ///
    /// The verdict decides which branches run; within the standalone branch
    /// every field is re-tested against its own rule, so a failing
    /// standalone-shaped field stays as is even when another field matched.
    pub fn redact(&self, record: &Record, verdict: Verdict) -> RedactedRecord {
        let mut fields = record.fields.clone();

        if verdict.standalone {
            for (key, value) in fields.iter_mut() {
                let masked = standalone_rule(key)
                    .zip(value.as_text())
                    .and_then(|(rule, text)| rule.mask(text, &self.policy));
                if let Some(masked) = masked {
                    *value = FieldValue::Text(masked);
                }
            }
        }

        if verdict.combinatorial {
            for kind in COMBINATORIAL_MASKED {
                let Some(value) = fields.get_mut(kind.field_key()) else {
                    continue;
                };
                let masked = value
                    .as_text()
                    .and_then(|text| mask::quasi_identifier(kind, text, &self.policy));
                if let Some(masked) = masked {
                    *value = FieldValue::Text(masked);
                }
            }
        }

        RedactedRecord {
            id: record.id.clone(),
            fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::evaluate;
    use crate::policy::ShortValueMask;
    use serde_json::json;

    fn run(record: &Record) -> RedactedRecord {
        Redactor::default().redact(record, evaluate(record))
    }

    fn to_record(redacted: RedactedRecord) -> Record {
        Record {
            id: redacted.id.clone(),
            fields: redacted.fields.clone(),
        }
    }

    #[test]
    fn test_phone_scenario() {
        let record = Record::new("1").with("phone", "9876543210");
        let redacted = run(&record);
        assert_eq!(redacted.text("phone"), Some("98XXXXXX10"));
        // Input untouched
        assert_eq!(record.text("phone"), Some("9876543210"));
    }

    #[test]
    fn test_redacted_phone_shape_holds_for_any_ten_digits() {
        let shape = regex::Regex::new(r"^\d{2}X{6}\d{2}$").unwrap();
        for phone in ["0000000000", "1234567890", "9999999999", "5551230987"] {
            let redacted = run(&Record::new("p").with("phone", phone));
            let masked = redacted.text("phone").unwrap();
            assert!(shape.is_match(masked), "{masked}");
            assert_eq!(&masked[..2], &phone[..2]);
            assert_eq!(&masked[8..], &phone[8..]);
        }
    }

    #[test]
    fn test_all_standalone_masks() {
        let record = Record::new("1")
            .with("aadhar", "1234 5678 9012")
            .with("passport", "P1234567")
            .with("upi_id", "9876543210@ybl");
        let redacted = run(&record);
        assert_eq!(redacted.text("aadhar"), Some("1234 XXXX XXXX"));
        assert_eq!(redacted.text("passport"), Some("PXXXXXXX"));
        assert_eq!(redacted.text("upi_id"), Some("[REDACTED_UPI_ID]"));
    }

    #[test]
    fn test_aadhar_keeps_first_four_digits_not_first_four_characters() {
        let redacted = run(&Record::new("1").with("aadhar", "12 3456789012"));
        assert_eq!(redacted.text("aadhar"), Some("1234 XXXX XXXX"));
    }

    #[test]
    fn test_non_matching_standalone_field_stays_when_another_matches() {
        let record = Record::new("1")
            .with("phone", "9876543210")
            .with("passport", "not-a-passport")
            .with("upi_id", "nobody");
        let redacted = run(&record);
        assert_eq!(redacted.text("phone"), Some("98XXXXXX10"));
        assert_eq!(redacted.text("passport"), Some("not-a-passport"));
        assert_eq!(redacted.text("upi_id"), Some("nobody"));
    }

    #[test]
    fn test_name_and_email_scenario() {
        let record = Record::new("2")
            .with("name", "Jane Doe")
            .with("email", "jane@x.com");
        let redacted = run(&record);
        assert_eq!(redacted.text("name"), Some("JXXX DXX"));
        assert_eq!(redacted.text("email"), Some("jXXXX@x.com"));
    }

    #[test]
    fn test_combinatorial_masks_every_present_field() {
        let record = Record::new("3")
            .with("first_name", "Jane")
            .with("last_name", "Doe")
            .with("ip_address", "10.0.0.1")
            .with("device_id", "dev-42")
            .with("address", "123 Main St")
            .with("order_id", "A-1");
        let redacted = run(&record);
        assert_eq!(redacted.text("first_name"), Some("JXXX"));
        assert_eq!(redacted.text("last_name"), Some("DXX"));
        assert_eq!(redacted.text("ip_address"), Some("[REDACTED_ID]"));
        assert_eq!(redacted.text("device_id"), Some("[REDACTED_ID]"));
        assert_eq!(redacted.text("address"), Some("[REDACTED_ADDRESS]"));
        assert_eq!(redacted.text("order_id"), Some("A-1"));
    }

    #[test]
    fn test_single_token_name_is_left_alone() {
        let record = Record::new("4")
            .with("name", "Jane")
            .with("email", "jane@x.com")
            .with("address", "1 Main St");
        let redacted = run(&record);
        assert_eq!(redacted.text("name"), Some("Jane"));
        assert_eq!(redacted.text("email"), Some("jXXXX@x.com"));
    }

    #[test]
    fn test_lone_address_passes_through() {
        let record = Record::new("5").with("address", "123 Main St");
        let redacted = run(&record);
        assert_eq!(redacted.fields, record.fields);
    }

    #[test]
    fn test_non_string_fields_are_carried_through() {
        let record = Record::new("6")
            .with("phone", "9876543210")
            .with("aadhar", json!(123456789012u64))
            .with("ip_address", json!(["10.0.0.1"]));
        let redacted = run(&record);
        assert_eq!(redacted.text("phone"), Some("98XXXXXX10"));
        assert_eq!(redacted.fields["aadhar"], FieldValue::Other(json!(123456789012u64)));
        assert_eq!(redacted.fields["ip_address"], FieldValue::Other(json!(["10.0.0.1"])));
    }

    #[test]
    fn test_verdict_gates_each_branch() {
        let record = Record::new("7")
            .with("phone", "9876543210")
            .with("email", "jane@x.com")
            .with("address", "1 Main St");
        let only_combinatorial = Verdict {
            standalone: false,
            combinatorial: true,
        };
        let redacted = Redactor::default().redact(&record, only_combinatorial);
        assert_eq!(redacted.text("phone"), Some("9876543210"));
        assert_eq!(redacted.text("email"), Some("jXXXX@x.com"));

        let redacted = Redactor::default().redact(&record, Verdict::default());
        assert_eq!(redacted.fields, record.fields);
    }

    #[test]
    fn test_redaction_is_stable_when_rerun() {
        let record = Record::new("8")
            .with("phone", "9876543210")
            .with("name", "Jane Doe")
            .with("email", "jane@x.com")
            .with("address", "123 Main St")
            .with("ip_address", "10.0.0.1")
            .with("device_id", "dev-42")
            .with("upi_id", "jane@okbank.in");
        let once = run(&record);
        let twice = run(&to_record(once.clone()));

        for key in ["address", "ip_address", "device_id", "upi_id", "name", "email", "phone"] {
            assert_eq!(twice.text(key), once.text(key), "{key}");
        }
        // Masked values still recompute a combinatorial verdict
        assert!(evaluate(&to_record(once)).combinatorial);
    }

    #[test]
    fn test_short_name_parts_follow_policy() {
        let record = Record::new("9")
            .with("first_name", "J")
            .with("last_name", "Doe")
            .with("ip_address", "10.0.0.1")
            .with("device_id", "d");
        let verdict = evaluate(&record);

        let redacted = Redactor::default().redact(&record, verdict);
        assert_eq!(redacted.text("first_name"), Some("X"));

        let keep = RedactionPolicy::builder()
            .short_value(ShortValueMask::KeepFirst)
            .build();
        let redacted = Redactor::new(keep).redact(&record, verdict);
        assert_eq!(redacted.text("first_name"), Some("J"));
    }
}
