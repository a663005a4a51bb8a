//! Student record domain model.
//!
//! # Responsibility
//! - Define the canonical student record served by the store and consumed by
//!   the dashboard.
//! - Own field-level normalization and validation applied before persistence.
//! - Provide the string form of each filterable column.
//!
//! # Invariants
//! - `id` is assigned by the store and never reused for another record.
//! - `name` and `grade` are persisted trimmed and non-empty.
//! - A missing `gender` is always read as `Gender::PreferNotToSay`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned record identifier (SQLite rowid).
pub type RecordId = i64;

/// Gender choices accepted by the store.
///
/// Serialized with the human-readable labels used by the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
    #[default]
    #[serde(rename = "Prefer not to say")]
    PreferNotToSay,
}

impl Gender {
    pub const ALL: [Gender; 4] = [
        Gender::Male,
        Gender::Female,
        Gender::Other,
        Gender::PreferNotToSay,
    ];

    /// Returns the wire/display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
            Self::PreferNotToSay => "Prefer not to say",
        }
    }

    /// Parses an exact wire label.
    pub fn from_label(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|gender| gender.label() == value)
    }
}

impl Display for Gender {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Subjects a mark can be recorded against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Subject {
    Tamil,
    English,
    Mathematics,
    Science,
    Social,
}

impl Subject {
    pub const ALL: [Subject; 5] = [
        Subject::Tamil,
        Subject::English,
        Subject::Mathematics,
        Subject::Science,
        Subject::Social,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Tamil => "Tamil",
            Self::English => "English",
            Self::Mathematics => "Mathematics",
            Self::Science => "Science",
            Self::Social => "Social",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|subject| subject.label() == value)
    }
}

impl Display for Subject {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One of the six user-visible record fields.
///
/// Declaration order is the table column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Name,
    Grade,
    Age,
    Gender,
    Subject,
    Marks,
}

impl Column {
    pub const ALL: [Column; 6] = [
        Column::Name,
        Column::Grade,
        Column::Age,
        Column::Gender,
        Column::Subject,
        Column::Marks,
    ];

    /// Lowercase key used by filter input (`name`, `marks`, ...).
    pub fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Grade => "grade",
            Self::Age => "age",
            Self::Gender => "gender",
            Self::Subject => "subject",
            Self::Marks => "marks",
        }
    }

    /// Table header label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Grade => "Grade",
            Self::Age => "Age",
            Self::Gender => "Gender",
            Self::Subject => "Subject",
            Self::Marks => "Marks",
        }
    }

    /// Parses a column key, ignoring surrounding whitespace and ASCII case.
    ///
    /// Returns `None` for blank or unknown input.
    pub fn from_key(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|column| column.key().eq_ignore_ascii_case(trimmed))
    }
}

impl Display for Column {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Validation failure for record writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValidationError {
    EmptyName,
    EmptyGrade,
}

impl Display for RecordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => f.write_str("name is required"),
            Self::EmptyGrade => f.write_str("grade is required"),
        }
    }
}

impl Error for RecordValidationError {}

/// Persisted student record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(alias = "_id")]
    pub id: RecordId,
    pub name: String,
    pub grade: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: Gender,
    pub subject: Subject,
    #[serde(default)]
    pub marks: i64,
}

impl Record {
    /// Attaches a store-assigned id to a validated new record.
    pub fn from_new(id: RecordId, record: NewRecord) -> Self {
        Self {
            id,
            name: record.name,
            grade: record.grade,
            age: record.age,
            gender: record.gender,
            subject: record.subject,
            marks: record.marks,
        }
    }

    /// Returns the string form of `column`, or `None` when the field is absent.
    ///
    /// Integers use their decimal form; enums use their display label.
    pub fn field_text(&self, column: Column) -> Option<String> {
        match column {
            Column::Name => Some(self.name.clone()),
            Column::Grade => Some(self.grade.clone()),
            Column::Age => self.age.map(|age| age.to_string()),
            Column::Gender => Some(self.gender.label().to_string()),
            Column::Subject => Some(self.subject.label().to_string()),
            Column::Marks => Some(self.marks.to_string()),
        }
    }
}

/// Record input that has not been assigned an id yet.
///
/// Unknown JSON keys (including `id`/`_id`) are ignored on deserialization,
/// so exported record arrays can be re-imported as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecord {
    pub name: String,
    pub grade: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: Gender,
    pub subject: Subject,
    #[serde(default)]
    pub marks: i64,
}

impl NewRecord {
    /// Creates a record input with default age, gender and marks.
    pub fn new(name: impl Into<String>, grade: impl Into<String>, subject: Subject) -> Self {
        Self {
            name: name.into(),
            grade: grade.into(),
            age: None,
            gender: Gender::default(),
            subject,
            marks: 0,
        }
    }

    /// Returns a copy with `name` and `grade` trimmed.
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            grade: self.grade.trim().to_string(),
            ..self.clone()
        }
    }

    /// Checks write-time invariants.
    ///
    /// # Errors
    /// - `EmptyName` when `name` is blank after trimming.
    /// - `EmptyGrade` when `grade` is blank after trimming.
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        if self.name.trim().is_empty() {
            return Err(RecordValidationError::EmptyName);
        }
        if self.grade.trim().is_empty() {
            return Err(RecordValidationError::EmptyGrade);
        }
        Ok(())
    }
}
