use indexmap::IndexMap;
use serde::Serialize;
use zeroize::Zeroize;

/// Field kinds recognized by the rule set.
///
/// Design principles:
/// - Closed set: a key outside this enum is never inspected
/// - Field keys are exact and case-sensitive (`"phone"`, not `"Phone"`)
/// - All variants are `Copy` so rule tables can hold them in statics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PiiKind {
    Phone,
    Aadhar,   // 12-digit national ID
    Passport,
    UpiId,    // payment handle
    Name,
    FirstName,
    LastName,
    Email,
    Address,
    IpAddress,
    DeviceId,
}

impl PiiKind {
    pub const ALL: [PiiKind; 11] = [
        Self::Phone,
        Self::Aadhar,
        Self::Passport,
        Self::UpiId,
        Self::Name,
        Self::FirstName,
        Self::LastName,
        Self::Email,
        Self::Address,
        Self::IpAddress,
        Self::DeviceId,
    ];

    /// Record key this kind is read from
    pub fn field_key(&self) -> &'static str {
        match self {
            Self::Phone => "phone",
            Self::Aadhar => "aadhar",
            Self::Passport => "passport",
            Self::UpiId => "upi_id",
            Self::Name => "name",
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Email => "email",
            Self::Address => "address",
            Self::IpAddress => "ip_address",
            Self::DeviceId => "device_id",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.field_key() == key)
    }

    /// Literal replacement for kinds masked wholesale.
    /// `None` means the kind keeps partial structure instead.
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            Self::UpiId => Some("[REDACTED_UPI_ID]"),
            Self::Address => Some("[REDACTED_ADDRESS]"),
            Self::IpAddress | Self::DeviceId => Some("[REDACTED_ID]"),
            _ => None,
        }
    }
}

/// A decoded field value.
///
/// Only `Text` is eligible for any rule; numbers, booleans, nulls and nested
/// values are carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Other(serde_json::Value),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Other(_) => None,
        }
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(text) => Self::Text(text),
            other => Self::Other(other),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl Zeroize for FieldValue {
    fn zeroize(&mut self) {
        if let Self::Text(text) = self {
            text.zeroize();
        }
    }
}

// Raw values may hold PII; wipe them once the record is done with.
impl Drop for FieldValue {
    fn drop(&mut self) {
        self.zeroize();
    }
}

/// One input record: an opaque id plus its decoded payload.
/// Field order follows the payload so re-encoding keeps the original layout.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    pub id: String,
    pub fields: IndexMap<String, FieldValue>,
}

impl Record {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: IndexMap::new(),
        }
    }

    /// Builder-style insert, mostly for tests and callers assembling records by hand
    pub fn with(mut self, key: &str, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Value of `key` if present and textual
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(FieldValue::as_text)
    }

    pub fn has_text(&self, key: &str) -> bool {
        self.text(key).is_some()
    }
}

/// Output of the redactor. Unmatched fields are copies of the input values.
#[derive(Debug, Clone, PartialEq)]
pub struct RedactedRecord {
    pub id: String,
    pub fields: IndexMap<String, FieldValue>,
}

impl RedactedRecord {
    pub fn text(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(FieldValue::as_text)
    }
}

/// Independent standalone / combinatorial verdicts for one record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Verdict {
    pub standalone: bool,
    pub combinatorial: bool,
}

impl Verdict {
    pub fn is_pii(&self) -> bool {
        self.standalone || self.combinatorial
    }
}
