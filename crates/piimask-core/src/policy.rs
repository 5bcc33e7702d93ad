use crate::{mask, types::PiiKind};
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

/// Keys that are weak alone but identifying together.
/// `first_name`/`last_name` are deliberately absent: the pair only counts
/// through the full-name check in the combinatorial detector.
pub const QUASI_IDENTIFIERS: [PiiKind; 5] = [
    PiiKind::Name,
    PiiKind::Email,
    PiiKind::Address,
    PiiKind::IpAddress,
    PiiKind::DeviceId,
];

/// Every key the combinatorial branch masks
pub const COMBINATORIAL_MASKED: [PiiKind; 7] = [
    PiiKind::Name,
    PiiKind::FirstName,
    PiiKind::LastName,
    PiiKind::Email,
    PiiKind::Address,
    PiiKind::IpAddress,
    PiiKind::DeviceId,
];

/// Pre-match normalization applied to a candidate value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalize {
    None,
    StripSpaces,
}

impl Normalize {
    pub fn apply<'a>(&self, value: &'a str) -> Cow<'a, str> {
        match self {
            Self::None => Cow::Borrowed(value),
            Self::StripSpaces if value.contains(' ') => Cow::Owned(value.replace(' ', "")),
            Self::StripSpaces => Cow::Borrowed(value),
        }
    }
}

/// Masking function for a standalone field; receives the normalized value
pub type MaskFn = fn(&str, &RedactionPolicy) -> String;

/// One standalone rule: field key, normalization, full-match pattern, mask.
/// Detection and redaction both go through [`StandaloneRule::matches`], so the
/// two can never disagree on what counts as a match.
pub struct StandaloneRule {
    pub kind: PiiKind,
    pub normalize: Normalize,
    pattern: Regex,
    mask: MaskFn,
}

impl StandaloneRule {
    fn new(kind: PiiKind, normalize: Normalize, pattern: &str, mask: MaskFn) -> Self {
        Self {
            kind,
            normalize,
            // Patterns are literals below; a failure here is a programming error caught by tests
            pattern: Regex::new(pattern).unwrap_or_else(|e| panic!("invalid {kind:?} pattern: {e}")),
            mask,
        }
    }

    /// Normalized value if `value` satisfies this rule
    pub fn normalized_match<'a>(&self, value: &'a str) -> Option<Cow<'a, str>> {
        let normalized = self.normalize.apply(value);
        self.pattern.is_match(&normalized).then_some(normalized)
    }

    pub fn matches(&self, value: &str) -> bool {
        self.normalized_match(value).is_some()
    }

    /// Masked form of `value`, or `None` if the value fails the rule
    pub fn mask(&self, value: &str, policy: &RedactionPolicy) -> Option<String> {
        self.normalized_match(value)
            .map(|normalized| (self.mask)(&normalized, policy))
    }
}

impl std::fmt::Debug for StandaloneRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StandaloneRule")
            .field("kind", &self.kind)
            .field("normalize", &self.normalize)
            .field("pattern", &self.pattern.as_str())
            .finish()
    }
}

/// The standalone rule table, compiled once
pub static STANDALONE_RULES: Lazy<[StandaloneRule; 4]> = Lazy::new(|| {
    [
        StandaloneRule::new(PiiKind::Phone, Normalize::None, r"^[0-9]{10}$", mask::phone),
        StandaloneRule::new(
            PiiKind::Aadhar,
            Normalize::StripSpaces,
            r"^[0-9]{12}$",
            mask::aadhar,
        ),
        StandaloneRule::new(
            PiiKind::Passport,
            Normalize::None,
            r"^[A-Z][0-9]{7}$",
            mask::passport,
        ),
        StandaloneRule::new(
            PiiKind::UpiId,
            Normalize::None,
            r"^(?:[a-zA-Z0-9._-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,4}|[0-9]{10}@\w+)$",
            mask::upi_id,
        ),
    ]
});

/// Rule for a field key, if the key is a standalone identifier
pub fn standalone_rule(key: &str) -> Option<&'static StandaloneRule> {
    let kind = PiiKind::from_key(key)?;
    STANDALONE_RULES.iter().find(|rule| rule.kind == kind)
}

/// Handling of single-character name parts, where "first char + X..." would
/// reveal the whole value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShortValueMask {
    /// Replace with a single `X`
    #[default]
    MaskAll,
    /// Leave the character as is
    KeepFirst,
}

/// Aadhar mask layout after the four kept digits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AadharMask {
    /// Always ` XXXX XXXX`
    #[default]
    FixedWidth,
    /// One `X` per remaining digit, in groups of four
    Proportional,
}

/// Redaction policy – the knobs left open by the masking scheme
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedactionPolicy {
    short_value: ShortValueMask,
    aadhar_mask: AadharMask,
}

impl RedactionPolicy {
    pub fn builder() -> PolicyBuilder {
        PolicyBuilder::default()
    }

    pub fn short_value(&self) -> ShortValueMask {
        self.short_value
    }

    pub fn aadhar_mask(&self) -> AadharMask {
        self.aadhar_mask
    }
}

#[derive(Default)]
pub struct PolicyBuilder {
    policy: RedactionPolicy,
}

impl PolicyBuilder {
    pub fn short_value(mut self, mode: ShortValueMask) -> Self {
        self.policy.short_value = mode;
        self
    }

    pub fn aadhar_mask(mut self, mode: AadharMask) -> Self {
        self.policy.aadhar_mask = mode;
        self
    }

    pub fn build(self) -> RedactionPolicy {
        self.policy
    }
}
