use crate::dates::DateValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Reads an explicit `null` as the field's default, like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from(s: &str) -> Option<Self> {
        match s {
            "Easy" => Some(Difficulty::Easy),
            "Medium" => Some(Difficulty::Medium),
            "Hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    pub fn as_str(&self) -> &str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Critical => "Critical",
        }
    }

    pub fn from(s: &str) -> Option<Self> {
        match s {
            "Low" => Some(Priority::Low),
            "Medium" => Some(Priority::Medium),
            "High" => Some(Priority::High),
            "Critical" => Some(Priority::Critical),
            _ => None,
        }
    }
}

/// One logged revision in the object form `{date, timeSpent?, rating?}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevisionEvent {
    #[serde(default)]
    pub date: Option<DateValue>,
    #[serde(default)]
    pub time_spent: Option<i64>,
    #[serde(default)]
    pub rating: Option<i64>,
}

/// An entry of a problem's revision log.
///
/// Older exports store bare timestamps instead of event objects; both shapes
/// are accepted, and anything unreadable simply carries no date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SolvedDate {
    Event(RevisionEvent),
    Bare(DateValue),
}

impl SolvedDate {
    pub fn event(date: DateTime<Utc>, time_spent: Option<i64>, rating: Option<i64>) -> Self {
        SolvedDate::Event(RevisionEvent {
            date: Some(DateValue::from(date)),
            time_spent,
            rating,
        })
    }

    /// The event's date, falling back to the raw entry when it is not an object
    pub fn date_value(&self) -> Option<&DateValue> {
        match self {
            SolvedDate::Event(event) => event.date.as_ref(),
            SolvedDate::Bare(value) => Some(value),
        }
    }

    pub fn when(&self) -> Option<DateTime<Utc>> {
        self.date_value().and_then(DateValue::resolve)
    }

    pub fn time_spent(&self) -> Option<i64> {
        match self {
            SolvedDate::Event(event) => event.time_spent,
            SolvedDate::Bare(_) => None,
        }
    }

    pub fn rating(&self) -> Option<i64> {
        match self {
            SolvedDate::Event(event) => event.rating,
            SolvedDate::Bare(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Approach {
    #[serde(default, deserialize_with = "null_as_default")]
    pub notes: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
}

/// A solved practice problem together with its revision history
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Problem {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub pattern: String,
    #[serde(deserialize_with = "null_as_default")]
    pub difficulty: String,
    #[serde(deserialize_with = "null_as_default")]
    pub platform: String,
    #[serde(deserialize_with = "null_as_default")]
    pub link: String,
    #[serde(deserialize_with = "null_as_default")]
    pub notes: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    pub priority: Option<String>,
    pub revision_interval: Option<i64>,
    pub created_at: Option<DateValue>,
    pub last_revised: Option<DateValue>,
    #[serde(deserialize_with = "null_as_default")]
    pub revision_count: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub total_time_spent: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub average_rating: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub solved_dates: Vec<SolvedDate>,
    #[serde(deserialize_with = "null_as_default")]
    pub approaches: Vec<Approach>,
}

impl Problem {
    pub fn difficulty_level(&self) -> Option<Difficulty> {
        Difficulty::from(&self.difficulty)
    }

    pub fn priority_level(&self) -> Option<Priority> {
        self.priority.as_deref().and_then(Priority::from)
    }

    pub fn created(&self) -> Option<DateTime<Utc>> {
        self.created_at.as_ref().and_then(DateValue::resolve)
    }

    pub fn last_revised_at(&self) -> Option<DateTime<Utc>> {
        self.last_revised.as_ref().and_then(DateValue::resolve)
    }

    /// Every readable revision date, in log order
    pub fn revision_dates(&self) -> impl Iterator<Item = DateTime<Utc>> + '_ {
        self.solved_dates.iter().filter_map(SolvedDate::when)
    }
}

/// Descriptive fields supplied when creating or editing a problem
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewProblem {
    pub title: String,
    pub pattern: String,
    pub difficulty: String,
    pub platform: String,
    pub link: String,
    pub notes: String,
    pub tags: Vec<String>,
    pub priority: Option<String>,
    pub revision_interval: Option<i64>,
    pub approaches: Vec<Approach>,
}

/// A revision to log against an existing problem
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RevisionInput {
    /// Defaults to the store's current time
    pub date: Option<DateTime<Utc>>,
    pub time_spent: Option<i64>,
    pub rating: Option<i64>,
}
