use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The three board columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "A FAZER")]
    Todo,
    #[serde(rename = "EM ANDAMENTO")]
    InProgress,
    #[serde(rename = "CONCLUÍDO")]
    Done,
}

impl Status {
    /// Columns in display order.
    pub const ALL: [Self; 3] = [Self::Todo, Self::InProgress, Self::Done];

    /// The literal token stored in the board file.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "A FAZER",
            Self::InProgress => "EM ANDAMENTO",
            Self::Done => "CONCLUÍDO",
        }
    }
}

/// Task priority as chosen on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    #[serde(rename = "Alta")]
    High,
    #[serde(rename = "Média")]
    Medium,
    #[serde(rename = "Baixa")]
    Low,
}

impl Priority {
    /// The literal token stored in the board file.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "Alta",
            Self::Medium => "Média",
            Self::Low => "Baixa",
        }
    }
}

/// Which writer last set a task's status.
///
/// Kept in memory only; tasks read from disk start out as `Derived`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusSource {
    #[default]
    Derived,
    Overridden,
}

/// A checkable item on a task card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    pub label: String,
    pub done: bool,
}

impl Subtask {
    #[must_use]
    pub fn new(label: impl Into<String>, done: bool) -> Self {
        Self {
            label: label.into(),
            done,
        }
    }

    #[must_use]
    pub fn unchecked(label: impl Into<String>) -> Self {
        Self::new(label, false)
    }
}

/// One card on the board. `name` is the board-wide key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub name: String,
    pub status: Status,
    pub category: String,
    pub priority: Priority,
    pub subtasks: Vec<Subtask>,
    #[serde(default)]
    pub status_source: StatusSource,
}

impl Task {
    /// A fresh card: `Todo`, every subtask unchecked.
    #[must_use]
    pub fn new<I, L>(
        name: impl Into<String>,
        category: impl Into<String>,
        priority: Priority,
        labels: I,
    ) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        Self {
            name: name.into(),
            status: Status::Todo,
            category: category.into(),
            priority,
            subtasks: labels.into_iter().map(Subtask::unchecked).collect(),
            status_source: StatusSource::Derived,
        }
    }

    /// `(checked, total)` over the subtask list.
    #[must_use]
    pub fn progress(&self) -> (usize, usize) {
        let checked = self.subtasks.iter().filter(|s| s.done).count();
        (checked, self.subtasks.len())
    }
}

// `status_source` is bookkeeping, not board state.
impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.status == other.status
            && self.category == other.category
            && self.priority == other.priority
            && self.subtasks == other.subtasks
    }
}

impl Eq for Task {}

/// Error returned when parsing an enum value from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    pub expected: &'static str,
    pub got: String,
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: '{}'", self.expected, self.got)
    }
}

impl std::error::Error for ParseEnumError {}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn normalize(input: &str) -> String {
    input.trim().to_lowercase()
}

impl FromStr for Status {
    type Err = ParseEnumError;

    /// Accepts the stored tokens plus the English names used on the command line.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize(s);
        match normalized.as_str() {
            "a fazer" | "todo" | "to-do" | "to_do" => Ok(Self::Todo),
            "em andamento" | "doing" | "in-progress" | "in_progress" | "inprogress" => {
                Ok(Self::InProgress)
            }
            "concluído" | "concluido" | "done" => Ok(Self::Done),
            _ => Err(ParseEnumError {
                expected: "status",
                got: s.to_string(),
            }),
        }
    }
}

impl FromStr for Priority {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize(s);
        match normalized.as_str() {
            "alta" | "high" => Ok(Self::High),
            "média" | "media" | "medium" => Ok(Self::Medium),
            "baixa" | "low" => Ok(Self::Low),
            _ => Err(ParseEnumError {
                expected: "priority",
                got: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Priority, Status, StatusSource, Subtask, Task};
    use std::str::FromStr;

    #[test]
    fn wire_tokens_are_exact() {
        assert_eq!(Status::Todo.to_string(), "A FAZER");
        assert_eq!(Status::InProgress.to_string(), "EM ANDAMENTO");
        assert_eq!(Status::Done.to_string(), "CONCLUÍDO");
        assert_eq!(Priority::High.to_string(), "Alta");
        assert_eq!(Priority::Medium.to_string(), "Média");
        assert_eq!(Priority::Low.to_string(), "Baixa");
    }

    #[test]
    fn enum_json_uses_wire_tokens() {
        assert_eq!(
            serde_json::to_string(&Status::Done).unwrap(),
            "\"CONCLUÍDO\""
        );
        assert_eq!(serde_json::to_string(&Priority::Medium).unwrap(), "\"Média\"");
        assert_eq!(
            serde_json::from_str::<Status>("\"EM ANDAMENTO\"").unwrap(),
            Status::InProgress
        );
    }

    #[test]
    fn display_parse_roundtrips() {
        for value in Status::ALL {
            assert_eq!(Status::from_str(&value.to_string()).unwrap(), value);
        }
        for value in [Priority::High, Priority::Medium, Priority::Low] {
            assert_eq!(Priority::from_str(&value.to_string()).unwrap(), value);
        }
    }

    #[test]
    fn english_aliases_parse() {
        assert_eq!(Status::from_str("todo").unwrap(), Status::Todo);
        assert_eq!(Status::from_str(" Doing ").unwrap(), Status::InProgress);
        assert_eq!(Status::from_str("in-progress").unwrap(), Status::InProgress);
        assert_eq!(Status::from_str("DONE").unwrap(), Status::Done);
        assert_eq!(Priority::from_str("HIGH").unwrap(), Priority::High);
        assert_eq!(Priority::from_str("media").unwrap(), Priority::Medium);
        assert_eq!(Priority::from_str("low").unwrap(), Priority::Low);
    }

    #[test]
    fn parse_rejects_unknown_values() {
        let err = Status::from_str("blocked").unwrap_err();
        assert_eq!(err.to_string(), "invalid status: 'blocked'");
        assert!(Priority::from_str("urgent").is_err());
        assert!(Priority::from_str("").is_err());
    }

    #[test]
    fn new_task_starts_unchecked_in_todo() {
        let task = Task::new("Design doc", "Work", Priority::High, ["Draft", "Review"]);
        assert_eq!(task.status, Status::Todo);
        assert_eq!(task.status_source, StatusSource::Derived);
        assert_eq!(
            task.subtasks,
            vec![Subtask::unchecked("Draft"), Subtask::unchecked("Review")]
        );
        assert_eq!(task.progress(), (0, 2));
    }

    #[test]
    fn equality_ignores_status_source() {
        let a = Task::new("t", "c", Priority::Low, ["x"]);
        let mut b = a.clone();
        b.status_source = StatusSource::Overridden;
        assert_eq!(a, b);
    }
}
