use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Customer Value Objects
// ============================================================================

/// Customer identity, a random 128-bit value assigned once at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(Uuid);

impl CustomerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for CustomerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<CustomerId> for Uuid {
    fn from(value: CustomerId) -> Self {
        value.0
    }
}

// Eight digits, dashes allowed anywhere
static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:-*\d-*){8}$").expect("phone pattern is a valid regex")
});

/// Customer phone number
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub const DIGIT_COUNT: usize = 8;
    /// Width of the stored column, separators included
    pub const MAX_LENGTH: usize = 20;

    /// Validate and build a phone number. Returns `None` for malformed input.
    pub fn create(value: &str) -> Option<Self> {
        let value = value.trim();

        if value.is_empty() || value.len() > Self::MAX_LENGTH || !PHONE_PATTERN.is_match(value) {
            return None;
        }

        let digits = value.chars().filter(char::is_ascii_digit).count();
        if digits != Self::DIGIT_COUNT {
            return None;
        }

        Some(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Customer postal address
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Address {
    country: String,
    line1: String,
    line2: String,
    city: String,
    state: String,
    zip_code: String,
}

impl Address {
    /// Validate and build an address. Returns `None` when a required field
    /// is missing or blank. `line2` defaults to an empty string.
    pub fn create(
        country: &str,
        line1: &str,
        line2: Option<&str>,
        city: &str,
        state: &str,
        zip_code: &str,
    ) -> Option<Self> {
        let required = [country, line1, city, state, zip_code].map(str::trim);
        if required.iter().any(|field| field.is_empty()) {
            return None;
        }
        let [country, line1, city, state, zip_code] = required;

        Some(Self {
            country: country.to_string(),
            line1: line1.to_string(),
            line2: line2.map(str::trim).unwrap_or_default().to_string(),
            city: city.to_string(),
            state: state.to_string(),
            zip_code: zip_code.to_string(),
        })
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn line1(&self) -> &str {
        &self.line1
    }

    pub fn line2(&self) -> &str {
        &self.line2
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn zip_code(&self) -> &str {
        &self.zip_code
    }

    /// Single-line form: `line1, [line2, ]city, state, zip[, country]`
    pub fn full_address(&self) -> String {
        let mut parts = vec![self.line1.as_str()];
        if !self.line2.is_empty() {
            parts.push(self.line2.as_str());
        }
        parts.extend([self.city.as_str(), self.state.as_str(), self.zip_code.as_str()]);
        if !self.country.is_empty() {
            parts.push(self.country.as_str());
        }
        parts.join(", ")
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
