//! Log Sources
//!
//! Reads Suricata EVE output. Both a JSON array of events and the native
//! one-event-per-line format are accepted.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

use super::types::LogRecord;
use crate::error::LoadError;

/// Anything that can hand over a finite batch of IDS events
pub trait LogSource {
    /// Human readable locator for logs
    fn describe(&self) -> String;

    fn load(&self) -> Result<Vec<LogRecord>, LoadError>;
}

// ============================================================================
// FILE SOURCE
// ============================================================================

/// EVE JSON file on disk
#[derive(Debug, Clone)]
pub struct FileLogSource {
    path: PathBuf,
}

impl FileLogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogSource for FileLogSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<Vec<LogRecord>, LoadError> {
        if !self.path.exists() {
            return Err(LoadError::NotFound(self.path.clone()));
        }

        let content = fs::read_to_string(&self.path).map_err(|source| LoadError::Io {
            path: self.path.clone(),
            source,
        })?;

        parse_events(&content)
    }
}

// ============================================================================
// MEMORY SOURCE
// ============================================================================

/// Pre-built records, for embedding and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryLogSource {
    records: Vec<LogRecord>,
}

impl MemoryLogSource {
    pub fn new(records: Vec<LogRecord>) -> Self {
        Self { records }
    }
}

impl LogSource for MemoryLogSource {
    fn describe(&self) -> String {
        format!("memory ({} records)", self.records.len())
    }

    fn load(&self) -> Result<Vec<LogRecord>, LoadError> {
        Ok(self.records.clone())
    }
}

// ============================================================================
// PARSING
// ============================================================================

/// Raw EVE event. Everything except the three fields we need is ignored.
#[derive(Debug, Deserialize)]
struct RawEvent {
    src_ip: Option<String>,
    event_type: Option<String>,
    #[serde(default)]
    flow_id: Option<Value>,
}

/// Parse EVE content (JSON array or JSON lines)
pub fn parse_events(content: &str) -> Result<Vec<LogRecord>, LoadError> {
    let trimmed = content.trim_start();

    let raw: Vec<RawEvent> = if trimmed.starts_with('[') {
        serde_json::from_str(trimmed).map_err(|source| LoadError::Parse {
            line: source.line(),
            source,
        })?
    } else {
        let mut events = Vec::new();
        for (i, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let event = serde_json::from_str(line)
                .map_err(|source| LoadError::Parse { line: i + 1, source })?;
            events.push(event);
        }
        events
    };

    raw.into_iter()
        .enumerate()
        .map(|(index, event)| into_record(index, event))
        .collect()
}

fn into_record(index: usize, event: RawEvent) -> Result<LogRecord, LoadError> {
    let source_ip = event
        .src_ip
        .filter(|ip| !ip.is_empty())
        .ok_or(LoadError::MissingField { index, field: "src_ip" })?;

    let event_type = event
        .event_type
        .filter(|t| !t.is_empty())
        .ok_or(LoadError::MissingField { index, field: "event_type" })?;

    // Suricata writes flow_id as a number; other shippers stringify it
    let flow_id = match event.flow_id {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    };

    Ok(LogRecord {
        source_ip,
        event_type: event_type.as_str().into(),
        flow_id,
    })
}

// ============================================================================
// DEDUP
// ============================================================================

/// Keep the first record of every flow
pub fn dedup_by_flow(records: Vec<LogRecord>) -> Vec<LogRecord> {
    let mut seen: HashSet<String> = HashSet::new();

    records
        .into_iter()
        .filter(|record| match &record.flow_id {
            Some(flow) => seen.insert(flow.clone()),
            None => true,
        })
        .collect()
}
