use serde::{Deserialize, Deserializer};

/// One complete reading from the stats server. Replaced wholesale on every
/// successful fetch; never merged with the previous one.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SystemSnapshot {
    #[serde(deserialize_with = "null_as_default")]
    pub cpu_usage: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub memory_usage: f64,
    pub memory_used: Option<u64>,
    pub memory_total: Option<u64>,
    #[serde(deserialize_with = "lenient_process_list")]
    pub processes: Vec<ProcessSnapshot>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProcessSnapshot {
    #[serde(deserialize_with = "null_as_default")]
    pub pid: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "username_or_system")]
    pub username: String,
    #[serde(deserialize_with = "null_as_default")]
    pub cpu_percent: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub memory_percent: f64,
    #[serde(deserialize_with = "status_from_wire")]
    pub status: ProcessStatus,
    pub create_time: Option<f64>,
}

impl Default for ProcessSnapshot {
    fn default() -> Self {
        ProcessSnapshot {
            pid: 0,
            name: String::new(),
            username: default_username(),
            cpu_percent: 0.0,
            memory_percent: 0.0,
            status: ProcessStatus::default(),
            create_time: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessStatus {
    Running,
    Sleeping,
    Stopped,
    /// Anything the server sends that is not one of the three known states.
    /// The raw wire text is kept for display.
    Other(String),
}

impl Default for ProcessStatus {
    fn default() -> Self {
        ProcessStatus::Other(String::new())
    }
}

impl ProcessStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.to_lowercase().as_str() {
            "running" => ProcessStatus::Running,
            "sleeping" => ProcessStatus::Sleeping,
            "stopped" => ProcessStatus::Stopped,
            _ => ProcessStatus::Other(raw.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ProcessStatus::Running => "running",
            ProcessStatus::Sleeping => "sleeping",
            ProcessStatus::Stopped => "stopped",
            ProcessStatus::Other(raw) => raw,
        }
    }
}

fn default_username() -> String {
    "system".to_string()
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn username_or_system<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(match raw {
        Some(name) if !name.is_empty() => name,
        _ => default_username(),
    })
}

fn status_from_wire<'de, D>(deserializer: D) -> Result<ProcessStatus, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(ProcessStatus::parse(raw.as_deref().unwrap_or("")))
}

/// Accepts a missing field, `null`, or a non-array value as an empty process
/// list, and drops individual elements that fail to deserialize instead of
/// rejecting the whole snapshot.
fn lenient_process_list<'de, D>(deserializer: D) -> Result<Vec<ProcessSnapshot>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    let items = match raw {
        Some(serde_json::Value::Array(items)) => items,
        _ => return Ok(Vec::new()),
    };
    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}
