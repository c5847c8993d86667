use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Map, Value};

/// A single project's persisted data.
///
/// Records are created by the new-project wizard and never edited or deleted
/// afterwards. Fields other than `id`, `name` and `created` are free-form and
/// optional; missing fields fall back to their defaults on read. The
/// `discovery`, `strategy` and `roadmap` structures belong to other pages and
/// are copied through untouched, as is any field this type does not know.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    /// Opaque unique identifier. Older data stored numeric ids.
    #[serde(default, deserialize_with = "deserialize_text")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub industry: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub model_type: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub phase: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub region: String,
    /// Objective codes picked in the second wizard step (see [`super::OBJECTIVES`]).
    #[serde(default, deserialize_with = "deserialize_objectives")]
    pub objectives: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub main_concerns: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub main_opportunities: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub duration: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub deliverable: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub budget: String,
    /// Raw status label. See [`ProjectStatus`] for the recognized values.
    #[serde(
        default,
        deserialize_with = "deserialize_status",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<String>,
    /// Completion percentage. Stored values are rounded and clamped to `0..=100` on read.
    #[serde(default, deserialize_with = "deserialize_progress")]
    pub progress: u8,
    #[serde(
        default,
        alias = "createdAt",
        deserialize_with = "deserialize_created",
        skip_serializing_if = "Option::is_none"
    )]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub discovery: Value,
    #[serde(default)]
    pub strategy: Value,
    #[serde(default)]
    pub roadmap: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProjectRecord {
    /// The recognized status of this record, if any.
    pub fn project_status(&self) -> Option<ProjectStatus> {
        self.status.as_deref().and_then(ProjectStatus::from_str)
    }
}

/// The workflow stage a project is in.
///
/// - `Discovery`: research and intake in progress (every new project starts here)
/// - `Strategy`: value proposition and narrative work
/// - `Exploration`: early, exploratory engagement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectStatus {
    Discovery,
    Strategy,
    Exploration,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Discovery => "En Discovery",
            Self::Strategy => "En Estrategia",
            Self::Exploration => "Exploración",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "En Discovery" => Some(Self::Discovery),
            "En Estrategia" => Some(Self::Strategy),
            "Exploración" => Some(Self::Exploration),
            _ => None,
        }
    }
}

/// Input for creating a new project, as collected by the wizard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateProjectInput {
    pub name: String,
    pub industry: String,
    pub model_type: String,
    pub phase: String,
    pub region: String,
    pub objectives: Vec<String>,
    pub main_concerns: String,
    pub main_opportunities: String,
    pub duration: String,
    pub deliverable: String,
    pub budget: String,
}

/// Initial shape of the discovery modules for a fresh project.
pub fn default_discovery() -> Value {
    json!({
        "intake": { "completed": false, "data": {} },
        "jtbd": { "completed": false, "data": [] },
        "tensiones": { "completed": false, "data": {} },
        "audiencias": { "completed": false, "data": [] }
    })
}

/// Initial shape of the strategy modules for a fresh project.
pub fn default_strategy() -> Value {
    json!({
        "valor": { "completed": false, "data": {} },
        "narrativa": { "completed": false, "data": {} }
    })
}

pub fn default_roadmap() -> Value {
    json!({ "initiatives": [] })
}

// Saved records come from older page versions and hand edits. A field with an
// unexpected type falls back to its default rather than failing the whole list.

fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

fn deserialize_objectives<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

fn deserialize_status<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn deserialize_progress<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let percent = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    Ok(percent
        .filter(|p| p.is_finite())
        .map(|p| p.round().clamp(0.0, 100.0) as u8)
        .unwrap_or(0))
}

fn deserialize_created<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => DateTime::parse_from_rfc3339(&s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Number(n) => n.as_i64().and_then(DateTime::<Utc>::from_timestamp_millis),
        _ => None,
    })
}
