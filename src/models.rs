use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Terminal outcome of a workflow run.
///
/// Only `success` and `failure` drive the metrics. Every other value
/// (cancelled, skipped, a run still in progress) is carried through for
/// display and otherwise ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum Conclusion {
    Success,
    Failure,
    Other(String),
    Missing,
}

impl Conclusion {
    pub fn label(&self) -> &str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
            Self::Other(value) => value,
            Self::Missing => "none",
        }
    }
}

impl From<Option<String>> for Conclusion {
    fn from(value: Option<String>) -> Self {
        match value.as_deref() {
            Some("success") => Self::Success,
            Some("failure") => Self::Failure,
            Some(other) => Self::Other(other.to_string()),
            None => Self::Missing,
        }
    }
}

impl From<Conclusion> for Option<String> {
    fn from(value: Conclusion) -> Self {
        match value {
            Conclusion::Missing => None,
            other => Some(other.label().to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub id: u64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub conclusion: Conclusion,
    pub status: String,
    pub actor: String,
    pub branch: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PullRequestRecord {
    pub number: u64,
    pub created_at: DateTime<Utc>,
    pub merged_at: Option<DateTime<Utc>>,
    pub base_branch: String,
}

/// Raw history as returned by a provider, before any window is applied.
#[derive(Debug, Clone, Default)]
pub struct History {
    pub runs: Vec<RunRecord>,
    pub pull_requests: Vec<PullRequestRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conclusion_from_api_values() {
        assert_eq!(Conclusion::from(Some("success".to_string())), Conclusion::Success);
        assert_eq!(Conclusion::from(Some("failure".to_string())), Conclusion::Failure);
        assert_eq!(
            Conclusion::from(Some("cancelled".to_string())),
            Conclusion::Other("cancelled".to_string())
        );
        assert_eq!(Conclusion::from(None), Conclusion::Missing);
    }

    #[test]
    fn test_conclusion_serializes_as_plain_string() {
        let json = serde_json::to_string(&Conclusion::Failure).unwrap();
        assert_eq!(json, "\"failure\"");

        let json = serde_json::to_string(&Conclusion::Missing).unwrap();
        assert_eq!(json, "null");

        let parsed: Conclusion = serde_json::from_str("\"skipped\"").unwrap();
        assert_eq!(parsed.label(), "skipped");
    }
}
