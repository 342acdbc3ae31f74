//! Person domain model.
//!
//! # Responsibility
//! - Define the contact record stored by `PersonStore`.
//! - Separate identity (normalized name) from full attribute equality.
//!
//! # Invariants
//! - Two persons are the same person iff their names share an identity key
//!   (case-insensitive, whitespace-normalized).
//! - Contact fields never take part in identity comparison.

use crate::model::validation::{collapse_whitespace, ValidationError};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

static NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\p{Alphabetic}\p{N}][\p{Alphabetic}\p{N} '.\-]*$").expect("valid name regex")
});
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{3,}$").expect("valid phone regex"));
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9+_.\-]+@[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?)*$")
        .expect("valid email regex")
});
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z0-9]+$").expect("valid tag regex"));

/// Validated, whitespace-normalized person name.
///
/// The lowercase identity key is computed once at parse time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Name {
    text: String,
    key: String,
}

impl Name {
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let normalized = collapse_whitespace(value);
        if normalized.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if !NAME_RE.is_match(&normalized) {
            return Err(ValidationError::InvalidName(value.to_string()));
        }
        let key = normalized.to_lowercase();
        Ok(Self {
            text: normalized,
            key,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Case-folded key used for identity comparison.
    pub fn identity_key(&self) -> &str {
        &self.key
    }

    pub fn is_same_name(&self, other: &Name) -> bool {
        self.key == other.key
    }
}

impl TryFrom<String> for Name {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Name> for String {
    fn from(value: Name) -> Self {
        value.text
    }
}

impl Display for Name {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Phone number made of digits only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Phone(String);

impl Phone {
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let trimmed = value.trim();
        if !PHONE_RE.is_match(trimmed) {
            return Err(ValidationError::InvalidPhone(value.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Phone {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Phone> for String {
    fn from(value: Phone) -> Self {
        value.0
    }
}

/// Email address in `local@domain` shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let trimmed = value.trim();
        if !EMAIL_RE.is_match(trimmed) {
            return Err(ValidationError::InvalidEmail(value.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Email {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

/// Lowercase alphanumeric label attached to a person.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Tag(String);

impl Tag {
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let normalized = value.trim().to_lowercase();
        if !TAG_RE.is_match(&normalized) {
            return Err(ValidationError::InvalidTag(value.to_string()));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Tag {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Tag> for String {
    fn from(value: Tag) -> Self {
        value.0
    }
}

/// Contact record.
///
/// `PartialEq` is full structural equality; use [`Person::is_same_person`]
/// for identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub name: Name,
    #[serde(default)]
    pub phone: Option<Phone>,
    #[serde(default)]
    pub email: Option<Email>,
    #[serde(default, deserialize_with = "deserialize_address")]
    pub address: Option<String>,
    #[serde(default)]
    pub tags: BTreeSet<Tag>,
}

impl Person {
    /// Creates a person with only a name; contact fields start empty.
    pub fn new(name: Name) -> Self {
        Self {
            name,
            phone: None,
            email: None,
            address: None,
            tags: BTreeSet::new(),
        }
    }

    pub fn with_phone(mut self, phone: Phone) -> Self {
        self.phone = Some(phone);
        self
    }

    pub fn with_email(mut self, email: Email) -> Self {
        self.email = Some(email);
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = normalize_address(&address.into());
        self
    }

    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tags.insert(tag);
        self
    }

    pub fn identity_key(&self) -> &str {
        self.name.identity_key()
    }

    pub fn is_same_person(&self, other: &Person) -> bool {
        self.name.is_same_name(&other.name)
    }
}

/// Collapses whitespace; a blank address is no address.
fn normalize_address(value: &str) -> Option<String> {
    let address = collapse_whitespace(value);
    (!address.is_empty()).then_some(address)
}

fn deserialize_address<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(normalize_address))
}
