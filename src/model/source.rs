// File: ./src/model/source.rs
// Records as they appear in a TickTick backup export.
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Status marker TickTick writes for completed tasks.
pub const STATUS_COMPLETED: &str = "1";
/// Status marker TickTick writes for open tasks.
pub const STATUS_NORMAL: &str = "0";

fn default_status() -> String {
    STATUS_NORMAL.to_string()
}

/// Reminder offset relative to the due date, as written in the export.
///
/// The source text (`PT24H`, `P1D`, `-PT15M`) is kept as-is and written back
/// unchanged. `seconds()` gives the signed value; negative means before due.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReminderOffset {
    raw: String,
    seconds: i64,
}

impl ReminderOffset {
    /// Builds an offset from a signed second count, formatted as the
    /// shortest whole-unit ISO-8601 duration.
    pub fn from_seconds(seconds: i64) -> Self {
        Self {
            raw: Self::format_iso_duration(seconds),
            seconds,
        }
    }

    pub fn from_minutes(minutes: i64) -> Self {
        Self::from_seconds(minutes * 60)
    }

    pub fn seconds(&self) -> i64 {
        self.seconds
    }

    pub fn as_duration(&self) -> Duration {
        Duration::seconds(self.seconds)
    }

    /// The duration text exactly as it was read.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Parses `[+-]P[nW][nD][T[nH][nM][nS]]`, keeping the trimmed input text.
    pub fn from_iso_duration(val: &str) -> Option<Self> {
        let raw = val.trim();
        let upper = raw.to_uppercase();
        let (sign, body) = match upper.strip_prefix('-') {
            Some(rest) => (-1, rest),
            None => (1, upper.strip_prefix('+').unwrap_or(&upper)),
        };
        let body = body.strip_prefix('P')?;
        if body.is_empty() {
            return None;
        }

        let mut total_secs: i64 = 0;
        let mut in_time = false;
        let mut digits = String::new();
        let mut saw_component = false;

        for c in body.chars() {
            if c.is_ascii_digit() {
                digits.push(c);
                continue;
            }
            if c == 'T' {
                if in_time || !digits.is_empty() {
                    return None;
                }
                in_time = true;
                continue;
            }
            let n: i64 = digits.parse().ok()?;
            digits.clear();
            let unit_secs = match (in_time, c) {
                (false, 'W') => 7 * 24 * 3600,
                (false, 'D') => 24 * 3600,
                (true, 'H') => 3600,
                (true, 'M') => 60,
                (true, 'S') => 1,
                _ => return None,
            };
            total_secs = total_secs.checked_add(n.checked_mul(unit_secs)?)?;
            saw_component = true;
        }

        if !digits.is_empty() || !saw_component {
            return None;
        }
        Some(Self {
            raw: raw.to_string(),
            seconds: sign * total_secs,
        })
    }

    fn format_iso_duration(seconds: i64) -> String {
        let sign = if seconds < 0 { "-" } else { "" };
        let secs = seconds.unsigned_abs();
        if secs == 0 {
            "PT0S".to_string()
        } else if secs.is_multiple_of(24 * 3600) {
            format!("{}P{}D", sign, secs / (24 * 3600))
        } else if secs.is_multiple_of(3600) {
            format!("{}PT{}H", sign, secs / 3600)
        } else if secs.is_multiple_of(60) {
            format!("{}PT{}M", sign, secs / 60)
        } else {
            format!("{}PT{}S", sign, secs)
        }
    }
}

impl TryFrom<String> for ReminderOffset {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_iso_duration(&value).ok_or_else(|| format!("Invalid reminder duration: {}", value))
    }
}

impl From<ReminderOffset> for String {
    fn from(value: ReminderOffset) -> Self {
        value.raw
    }
}

/// One flat task record from the export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickTickTask {
    pub task_id: i64,
    /// `0` means the task has no parent.
    #[serde(default)]
    pub parent_id: i64,
    pub list_name: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "de_ticktick_datetime")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "de_ticktick_datetime")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "de_reminder")]
    pub reminder: Option<ReminderOffset>,
    #[serde(default, deserialize_with = "de_optional_text")]
    pub repeat: Option<String>,
    #[serde(default = "default_status", deserialize_with = "de_status")]
    pub status: String,
    #[serde(default, deserialize_with = "de_ticktick_datetime")]
    pub completed_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub order: i64,
}

impl TickTickTask {
    pub fn new(task_id: i64, list_name: &str, title: &str) -> Self {
        Self {
            task_id,
            parent_id: 0,
            list_name: list_name.to_string(),
            title: title.to_string(),
            content: String::new(),
            tags: Vec::new(),
            start_date: None,
            due_date: None,
            reminder: None,
            repeat: None,
            status: default_status(),
            completed_time: None,
            order: 0,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == STATUS_COMPLETED
    }

    pub fn has_parent(&self) -> bool {
        self.parent_id != 0
    }
}

/// Parses the timestamp shapes found in exports: RFC 3339, or TickTick's own
/// `2022-11-18T03:00:00+0000` with a colon-less offset.
pub fn parse_ticktick_datetime(val: &str) -> Option<DateTime<Utc>> {
    let val = val.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(val) {
        return Some(dt.with_timezone(&Utc));
    }
    DateTime::parse_from_str(val, "%Y-%m-%dT%H:%M:%S%.f%z")
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn de_ticktick_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse_ticktick_datetime(s)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("Invalid date: {}", s))),
    }
}

fn de_reminder<'de, D>(deserializer: D) -> Result<Option<ReminderOffset>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => ReminderOffset::from_iso_duration(s)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("Invalid reminder duration: {}", s))),
    }
}

fn de_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.trim().is_empty()))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StatusRepr {
    Text(String),
    Number(i64),
}

// Some exports write the status as a bare number.
fn de_status<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match StatusRepr::deserialize(deserializer)? {
        StatusRepr::Text(s) => s.trim().to_string(),
        StatusRepr::Number(n) => n.to_string(),
    })
}
