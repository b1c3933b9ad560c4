//! Question data structures.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Stable question identifier.
///
/// The API may hand out numeric or string ids; the original form is kept so
/// the cached snapshot serializes back exactly as received.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuestionId {
    Number(u64),
    Text(String),
}

impl QuestionId {
    /// An id is usable when it is numeric or a non-blank string.
    pub fn is_blank(&self) -> bool {
        match self {
            QuestionId::Number(_) => false,
            QuestionId::Text(s) => s.trim().is_empty(),
        }
    }
}

impl QuestionId {
    /// Whether two ids address the same question.
    ///
    /// The number `1` and the string `"1"` are the same id.
    pub fn same_as(&self, other: &QuestionId) -> bool {
        match (self, other) {
            (QuestionId::Number(a), QuestionId::Number(b)) => a == b,
            _ => self.to_string() == other.to_string(),
        }
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionId::Number(n) => write!(f, "{n}"),
            QuestionId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for QuestionId {
    fn from(id: u64) -> Self {
        QuestionId::Number(id)
    }
}

impl From<&str> for QuestionId {
    fn from(id: &str) -> Self {
        // CLI input: "42" should address the same question as the JSON number 42
        match id.parse::<u64>() {
            Ok(n) => QuestionId::Number(n),
            Err(_) => QuestionId::Text(id.to_string()),
        }
    }
}

/// Recognised difficulty levels.
///
/// Questions keep their difficulty as a raw string; this enum is the
/// lowercase vocabulary stats are bucketed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Case-sensitive match against the lowercase literal.
    pub fn matches(&self, raw: &str) -> bool {
        raw == self.as_str()
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tracked interview question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: QuestionId,

    pub title: String,

    pub company: String,

    /// Expected to be `easy`, `medium` or `hard`; not validated
    pub difficulty: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub link: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub solved: bool,

    #[serde(default, deserialize_with = "null_as_default")]
    pub attempts: u32,

    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub last_attempt: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub notes: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub time_complexity: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub space_complexity: String,
}

impl Question {
    /// Whether the question is tagged with the given difficulty (case-sensitive).
    pub fn is(&self, difficulty: Difficulty) -> bool {
        difficulty.matches(&self.difficulty)
    }

    /// Merge a progress update into this question.
    pub fn apply(&mut self, update: &ProgressUpdate) {
        if let Some(solved) = update.solved {
            self.solved = solved;
        }
        if let Some(attempts) = update.attempts {
            self.attempts = attempts;
        }
        if let Some(last_attempt) = update.last_attempt {
            self.last_attempt = Some(last_attempt);
        }
        if let Some(notes) = &update.notes {
            self.notes = notes.clone();
        }
        if let Some(time) = &update.time_complexity {
            self.time_complexity = time.clone();
        }
        if let Some(space) = &update.space_complexity {
            self.space_complexity = space.clone();
        }
    }
}

/// `null` decodes like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts RFC 3339, naive ISO timestamps (read as UTC) and epoch
/// milliseconds. Anything else decodes as `None`.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let parsed = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(raw)) => parse_timestamp(&raw),
        Some(Value::Number(n)) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    };
    Ok(parsed)
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(t) = DateTime::parse_from_rfc3339(raw) {
        return Some(t.with_timezone(&Utc));
    }
    let naive = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok());
    if naive.is_none() && !raw.is_empty() {
        log::debug!("Ignoring unparseable lastAttempt: {:?}", raw);
    }
    naive.map(|t| t.and_utc())
}

/// Partial progress fields sent to the API and merged into the cache.
///
/// Only the fields that are set are serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solved: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attempts: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_attempt: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_complexity: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space_complexity: Option<String>,
}

impl ProgressUpdate {
    pub fn solved(solved: bool) -> Self {
        Self {
            solved: Some(solved),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn sample() -> Question {
        serde_json::from_value(json!({
            "id": 7,
            "title": "Two Sum",
            "company": "Google",
            "difficulty": "easy",
            "link": "https://leetcode.com/problems/two-sum/",
            "tags": ["Array", "Hash Table"],
            "solved": false,
            "attempts": 0,
            "lastAttempt": null
        }))
        .unwrap()
    }

    #[test]
    fn test_deserialize_with_missing_text_fields() {
        let q = sample();
        assert_eq!(q.id, QuestionId::Number(7));
        assert_eq!(q.notes, "");
        assert_eq!(q.description, "");
        assert!(q.last_attempt.is_none());
    }

    #[test]
    fn test_serialize_uses_camel_case() {
        let value = serde_json::to_value(sample()).unwrap();
        assert!(value.get("lastAttempt").is_some());
        assert!(value.get("timeComplexity").is_some());
        assert!(value.get("last_attempt").is_none());
    }

    #[test]
    fn test_string_ids_round_trip_as_strings() {
        let id: QuestionId = serde_json::from_value(json!("abc-1")).unwrap();
        assert_eq!(id, QuestionId::Text("abc-1".into()));
        assert_eq!(serde_json::to_value(&id).unwrap(), json!("abc-1"));
    }

    #[test]
    fn test_id_from_cli_input() {
        assert_eq!(QuestionId::from("42"), QuestionId::Number(42));
        assert_eq!(QuestionId::from("two-sum"), QuestionId::Text("two-sum".into()));
        assert!(QuestionId::from("  ").is_blank());
        assert!(!QuestionId::from(0u64).is_blank());
    }

    #[test]
    fn test_apply_only_touches_set_fields() {
        let mut q = sample();
        q.notes = "keep me".into();
        let update = ProgressUpdate {
            solved: Some(true),
            attempts: Some(2),
            ..ProgressUpdate::default()
        };
        q.apply(&update);
        assert!(q.solved);
        assert_eq!(q.attempts, 2);
        assert_eq!(q.notes, "keep me");
    }

    #[test]
    fn test_progress_update_skips_unset_fields() {
        let value = serde_json::to_value(ProgressUpdate::solved(true)).unwrap();
        assert_eq!(value, json!({ "solved": true }));
        assert!(ProgressUpdate::default().is_empty());
    }

    #[test]
    fn test_null_text_fields_decode_as_empty() {
        let q: Question = serde_json::from_value(json!({
            "id": 9, "title": "Jump Game", "company": "Meta", "difficulty": "medium",
            "link": null, "tags": null, "solved": null, "attempts": null,
            "notes": null, "description": null,
            "timeComplexity": null, "spaceComplexity": null
        }))
        .unwrap();
        assert!(q.tags.is_empty());
        assert!(!q.solved);
        assert_eq!(q.attempts, 0);
        assert_eq!(q.description, "");
        assert_eq!(q.notes, "");
    }

    #[test]
    fn test_last_attempt_is_parsed_leniently() {
        let at = |raw: Value| {
            let mut value = json!({ "id": 1, "title": "t", "company": "c", "difficulty": "easy" });
            value["lastAttempt"] = raw;
            serde_json::from_value::<Question>(value).unwrap().last_attempt
        };
        let expected = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).single();

        assert_eq!(at(json!("2024-01-15T10:30:00Z")), expected);
        assert_eq!(at(json!("2024-01-15T12:30:00+02:00")), expected);
        assert_eq!(at(json!("2024-01-15T10:30:00")), expected);
        assert_eq!(at(json!("2024-01-15 10:30:00.000")), expected);
        assert_eq!(at(json!(1_705_314_600_000i64)), expected);
        assert_eq!(at(json!("yesterday")), None);
        assert_eq!(at(json!(true)), None);
    }

    #[test]
    fn test_same_as_ignores_id_wire_form() {
        assert!(QuestionId::Number(1).same_as(&QuestionId::Text("1".into())));
        assert!(QuestionId::Text("1".into()).same_as(&QuestionId::from("1")));
        assert!(!QuestionId::Number(1).same_as(&QuestionId::Number(2)));
        assert!(!QuestionId::Text("01".into()).same_as(&QuestionId::Number(1)));
    }

    #[test]
    fn test_difficulty_is_case_sensitive() {
        let mut q = sample();
        assert!(q.is(Difficulty::Easy));
        q.difficulty = "Easy".into();
        assert!(!q.is(Difficulty::Easy));
    }
}
