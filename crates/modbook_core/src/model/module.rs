//! Module domain model.
//!
//! # Responsibility
//! - Define the academic module record kept per semester.
//! - Hold instructor assignments as non-owning person references.
//!
//! # Invariants
//! - Module identity is its normalized `ModuleCode`.
//! - Instructor references compare by person identity key, so one person is
//!   never assigned twice to the same module.
//! - Records are values: assignment helpers return a new `Module`.

use crate::model::person::{Name, Person};
use crate::model::validation::{collapse_whitespace, ValidationError};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

static MODULE_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{2,4}\d{3,4}[A-Z]{0,2}$").expect("valid module code regex"));

/// Upper bound for modular credits on a single module.
pub const MAX_MODULE_CREDITS: u8 = 40;

/// Format-validated module code, stored uppercase.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ModuleCode(String);

impl ModuleCode {
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let normalized = value.trim().to_uppercase();
        if !MODULE_CODE_RE.is_match(&normalized) {
            return Err(ValidationError::InvalidModuleCode(value.to_string()));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ModuleCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ModuleCode> for String {
    fn from(value: ModuleCode) -> Self {
        value.0
    }
}

impl Display for ModuleCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Modular credits, bounded by [`MAX_MODULE_CREDITS`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Credits(u8);

impl Credits {
    pub fn new(value: u8) -> Result<Self, ValidationError> {
        if value > MAX_MODULE_CREDITS {
            return Err(ValidationError::CreditsOutOfRange {
                credits: value,
                max: MAX_MODULE_CREDITS,
            });
        }
        Ok(Self(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Credits {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Credits> for u8 {
    fn from(value: Credits) -> Self {
        value.0
    }
}

/// Non-owning reference from a module to a person.
///
/// Only the person's name is kept. Equality and ordering use the name's
/// identity key, matching `Person::is_same_person`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstructorRef(Name);

impl InstructorRef {
    pub fn name(&self) -> &Name {
        &self.0
    }

    pub fn refers_to(&self, person: &Person) -> bool {
        self.0.is_same_name(&person.name)
    }
}

impl From<&Person> for InstructorRef {
    fn from(person: &Person) -> Self {
        Self(person.name.clone())
    }
}

impl PartialEq for InstructorRef {
    fn eq(&self, other: &Self) -> bool {
        self.0.is_same_name(&other.0)
    }
}

impl Eq for InstructorRef {}

impl PartialOrd for InstructorRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for InstructorRef {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.identity_key().cmp(other.0.identity_key())
    }
}

/// Academic module record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub code: ModuleCode,
    #[serde(default, deserialize_with = "deserialize_title")]
    pub title: String,
    #[serde(default)]
    pub credits: Credits,
    #[serde(default)]
    pub instructors: BTreeSet<InstructorRef>,
}

impl Module {
    /// Creates a module without credits or instructors.
    pub fn new(code: ModuleCode, title: impl Into<String>) -> Self {
        Self {
            code,
            title: collapse_whitespace(&title.into()),
            credits: Credits::default(),
            instructors: BTreeSet::new(),
        }
    }

    pub fn with_credits(mut self, credits: Credits) -> Self {
        self.credits = credits;
        self
    }

    pub fn is_same_module(&self, other: &Module) -> bool {
        self.code == other.code
    }

    pub fn has_instructor(&self, person: &Person) -> bool {
        self.instructors.iter().any(|entry| entry.refers_to(person))
    }

    /// Returns a copy with `person` assigned. Assigning twice is a no-op.
    pub fn with_instructor(&self, person: &Person) -> Self {
        let mut next = self.clone();
        next.instructors.insert(InstructorRef::from(person));
        next
    }

    /// Returns a copy with `person` unassigned. Missing entries are ignored.
    pub fn without_instructor(&self, person: &Person) -> Self {
        let mut next = self.clone();
        next.instructors.remove(&InstructorRef::from(person));
        next
    }

    pub fn without_instructors(&self) -> Self {
        let mut next = self.clone();
        next.instructors.clear();
        next
    }
}

fn deserialize_title<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(collapse_whitespace(&raw))
}

/// Semester slot a module list belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum Semester {
    #[default]
    First,
    Second,
}

impl Semester {
    pub const ALL: [Semester; 2] = [Semester::First, Semester::Second];

    /// Zero-based slot index (0 or 1).
    pub fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
        }
    }

    pub fn other(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }
}

impl TryFrom<usize> for Semester {
    type Error = ValidationError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::First),
            1 => Ok(Self::Second),
            other => Err(ValidationError::InvalidSemester(other)),
        }
    }
}

impl From<Semester> for usize {
    fn from(value: Semester) -> Self {
        value.index()
    }
}

impl Display for Semester {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "semester {}", self.index() + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::{Credits, Module, ModuleCode, Semester};
    use crate::model::person::{Name, Person};
    use crate::model::validation::ValidationError;

    fn person(name: &str) -> Person {
        Person::new(Name::parse(name).unwrap())
    }

    #[test]
    fn module_code_is_uppercased_and_validated() {
        assert_eq!(ModuleCode::parse(" cs2103t ").unwrap().as_str(), "CS2103T");
        assert_eq!(ModuleCode::parse("MA1521").unwrap().as_str(), "MA1521");
        assert!(ModuleCode::parse("C1010").is_err());
        assert!(ModuleCode::parse("CS10").is_err());
        assert!(ModuleCode::parse("CS101").is_ok());
        assert!(ModuleCode::parse("CS1010ABC").is_err());
    }

    #[test]
    fn credits_reject_values_over_maximum() {
        assert!(Credits::new(4).is_ok());
        assert_eq!(
            Credits::new(41).unwrap_err(),
            ValidationError::CreditsOutOfRange {
                credits: 41,
                max: 40
            }
        );
    }

    #[test]
    fn instructor_assignment_is_idempotent_and_case_insensitive() {
        let module = Module::new(ModuleCode::parse("CS1010").unwrap(), "Programming Methodology");
        let alex = person("Alex Yeoh");

        let assigned = module.with_instructor(&alex).with_instructor(&person("alex yeoh"));
        assert_eq!(assigned.instructors.len(), 1);
        assert!(assigned.has_instructor(&alex));

        let removed = assigned.without_instructor(&alex);
        assert!(removed.instructors.is_empty());
        assert_eq!(removed.without_instructor(&alex), removed);
    }

    #[test]
    fn loaded_title_is_collapsed_like_the_constructor() {
        let loaded: Module = serde_json::from_value(serde_json::json!({
            "code": "cs2103t",
            "title": "  Software   Engineering "
        }))
        .unwrap();
        assert_eq!(
            loaded,
            Module::new(ModuleCode::parse("CS2103T").unwrap(), "Software Engineering")
        );
    }

    #[test]
    fn semester_index_round_trips_and_toggles() {
        assert_eq!(Semester::try_from(0).unwrap(), Semester::First);
        assert_eq!(Semester::try_from(1).unwrap(), Semester::Second);
        assert_eq!(
            Semester::try_from(2).unwrap_err(),
            ValidationError::InvalidSemester(2)
        );
        assert_eq!(Semester::First.other(), Semester::Second);
        assert_eq!(Semester::Second.to_string(), "semester 2");
    }
}
