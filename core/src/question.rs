//! Question-set model.
//!
//! A question set is a homogeneous group of generated questions sharing a type,
//! per-question marks and a count. Marks and count are restricted newtypes so
//! an out-of-range value cannot reach the builder.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Marks a single question may carry.
pub const ALLOWED_MARKS: [u32; 10] = [1, 2, 3, 4, 5, 6, 7, 8, 10, 15];

/// Largest number of questions in one set.
pub const MAX_QUESTION_COUNT: u32 = 20;

// =============================================================================
// Question type
// =============================================================================

/// Kind of question. Serialized with the backend's short codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionType {
    #[serde(rename = "mcq")]
    MultipleChoice,
    #[serde(rename = "short")]
    ShortAnswer,
    #[serde(rename = "medium")]
    MediumAnswer,
    #[serde(rename = "long")]
    LongAnswer,
    #[serde(rename = "numerical")]
    Numerical,
    #[serde(rename = "case_study")]
    CaseStudy,
}

impl QuestionType {
    pub const ALL: [QuestionType; 6] = [
        QuestionType::MultipleChoice,
        QuestionType::ShortAnswer,
        QuestionType::MediumAnswer,
        QuestionType::LongAnswer,
        QuestionType::Numerical,
        QuestionType::CaseStudy,
    ];

    /// Wire code sent in `question_config`.
    pub fn code(&self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "mcq",
            QuestionType::ShortAnswer => "short",
            QuestionType::MediumAnswer => "medium",
            QuestionType::LongAnswer => "long",
            QuestionType::Numerical => "numerical",
            QuestionType::CaseStudy => "case_study",
        }
    }

    /// Label for select boxes.
    pub fn label(&self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "Multiple Choice",
            QuestionType::ShortAnswer => "Short Answer",
            QuestionType::MediumAnswer => "Medium Answer",
            QuestionType::LongAnswer => "Long Answer",
            QuestionType::Numerical => "Numerical",
            QuestionType::CaseStudy => "Case Study",
        }
    }
}

impl Default for QuestionType {
    fn default() -> Self {
        QuestionType::ShortAnswer
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for QuestionType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QuestionType::ALL
            .into_iter()
            .find(|t| t.code() == s.trim())
            .ok_or_else(|| ConfigError::UnknownQuestionType(s.to_string()))
    }
}

// =============================================================================
// Marks and count
// =============================================================================

/// Marks per question, always one of [`ALLOWED_MARKS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Marks(u32);

impl Marks {
    pub fn new(value: u32) -> ConfigResult<Self> {
        if ALLOWED_MARKS.contains(&value) {
            Ok(Self(value))
        } else {
            Err(ConfigError::InvalidMarks(value))
        }
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl Default for Marks {
    fn default() -> Self {
        Self(5)
    }
}

impl TryFrom<u32> for Marks {
    type Error = ConfigError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Marks::new(value)
    }
}

impl From<Marks> for u32 {
    fn from(marks: Marks) -> u32 {
        marks.0
    }
}

/// Number of questions in a set, `1..=20`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct QuestionCount(u32);

impl QuestionCount {
    pub fn new(value: u32) -> ConfigResult<Self> {
        if (1..=MAX_QUESTION_COUNT).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ConfigError::InvalidCount(value))
        }
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl Default for QuestionCount {
    fn default() -> Self {
        Self(1)
    }
}

impl TryFrom<u32> for QuestionCount {
    type Error = ConfigError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        QuestionCount::new(value)
    }
}

impl From<QuestionCount> for u32 {
    fn from(count: QuestionCount) -> u32 {
        count.0
    }
}

// =============================================================================
// Question set
// =============================================================================

/// One entry of the configuration. `id` is local and never transmitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSet {
    pub id: u32,
    pub question_type: QuestionType,
    pub marks: Marks,
    pub count: QuestionCount,
}

impl QuestionSet {
    /// Short answer, 5 marks, 1 question.
    pub fn with_defaults(id: u32) -> Self {
        Self {
            id,
            question_type: QuestionType::default(),
            marks: Marks::default(),
            count: QuestionCount::default(),
        }
    }

    pub fn subtotal(&self) -> u32 {
        self.marks.get() * self.count.get()
    }

    pub fn spec(&self) -> QuestionSetSpec {
        QuestionSetSpec {
            question_type: self.question_type,
            marks: self.marks,
            count: self.count,
        }
    }

    pub fn apply(&mut self, update: QuestionSetUpdate) {
        match update {
            QuestionSetUpdate::Type(t) => self.question_type = t,
            QuestionSetUpdate::Marks(m) => self.marks = m,
            QuestionSetUpdate::Count(c) => self.count = c,
        }
    }
}

/// Wire form of a question set: `{"type": "short", "marks": 5, "count": 4}`.
///
/// Also the shape of the server's suggested patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSetSpec {
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub marks: Marks,
    pub count: QuestionCount,
}

/// Document embedded in the `question_config` form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionConfig {
    pub question_sets: Vec<QuestionSetSpec>,
}

/// A single-field change to a question set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionSetUpdate {
    Type(QuestionType),
    Marks(Marks),
    Count(QuestionCount),
}

impl QuestionSetUpdate {
    /// Build an update from a form control's field name and raw value.
    ///
    /// Field names: `type`, `marks`, `count`.
    pub fn parse(field: &str, value: &str) -> ConfigResult<Self> {
        let number = || {
            value.trim().parse::<u32>().map_err(|_| ConfigError::InvalidValue {
                field: field.to_string(),
                value: value.to_string(),
            })
        };

        match field {
            "type" => Ok(QuestionSetUpdate::Type(value.parse()?)),
            "marks" => Ok(QuestionSetUpdate::Marks(Marks::new(number()?)?)),
            "count" => Ok(QuestionSetUpdate::Count(QuestionCount::new(number()?)?)),
            other => Err(ConfigError::UnknownField(other.to_string())),
        }
    }
}
