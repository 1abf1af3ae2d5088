use std::{collections::HashMap, fs, path::Path};

use anyhow::Context;
use serde::Deserialize;
use serde_json::Value;
use taskboard_types::{Task, TaskKind, TaskPriority};

use crate::fields;

/// One row of a host-provided dataset.
pub trait DatasetRecord {
    /// Raw typed value of a column.
    fn value(&self, field: &str) -> Option<&Value>;
    /// Display form of a column, as rendered by the host.
    fn formatted_value(&self, field: &str) -> Option<&str>;
}

/// A collection of rows that the host already filtered and authorized.
pub trait Dataset {
    type Record: DatasetRecord;

    fn sorted_record_ids(&self) -> &[String];
    fn record(&self, id: &str) -> Option<&Self::Record>;
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonDataset {
    #[serde(default)]
    sorted_record_ids: Vec<String>,
    #[serde(default)]
    records: HashMap<String, JsonRecord>,
}

#[derive(Debug, Default, Deserialize)]
pub struct JsonRecord {
    #[serde(default)]
    values: HashMap<String, Value>,
    /// Hosts export the display form of an empty lookup as null.
    #[serde(default)]
    formatted: HashMap<String, Option<String>>,
}

impl JsonDataset {
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read dataset {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse dataset {}", path.display()))
    }
}

impl Dataset for JsonDataset {
    type Record = JsonRecord;

    fn sorted_record_ids(&self) -> &[String] {
        &self.sorted_record_ids
    }

    fn record(&self, id: &str) -> Option<&JsonRecord> {
        self.records.get(id)
    }
}

impl DatasetRecord for JsonRecord {
    fn value(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    fn formatted_value(&self, field: &str) -> Option<&str> {
        self.formatted.get(field).and_then(Option::as_deref)
    }
}

fn formatted<R: DatasetRecord>(record: &R, field: &str) -> Option<String> {
    record
        .formatted_value(field)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Turns every row of an inspection dataset into a task.
///
/// Never fails: missing columns fall back to defaults, rows whose id has no
/// record are skipped.
pub fn parse_inspections<D: Dataset + ?Sized>(dataset: &D) -> Vec<Task> {
    let ids = dataset.sorted_record_ids();
    if ids.is_empty() {
        tracing::debug!("No inspection records in dataset");
        return Vec::new();
    }

    let mut inspections = Vec::with_capacity(ids.len());
    for id in ids {
        let Some(record) = dataset.record(id) else {
            tracing::warn!("Dataset lists record {id} but does not contain it");
            continue;
        };
        inspections.push(parse_inspection(id, record));
    }

    tracing::debug!("Parsed {} inspections from dataset", inspections.len());
    inspections
}

fn parse_inspection<R: DatasetRecord>(id: &str, record: &R) -> Task {
    let code = formatted(record, "apex_code").unwrap_or_else(|| fields::short_code("INS-", id));

    // A zero ordinal is treated like a missing one.
    let priority = fields::integer(record.value("apex_prioritylevel"))
        .filter(|value| *value != 0)
        .unwrap_or(TaskPriority::LOW);

    let status = formatted(record, "statuscode").unwrap_or_else(|| "Unknown".into());

    Task {
        id: id.to_string(),
        task_id: code.clone(),
        name: code,
        kind: TaskKind::Inspection,
        priority: TaskPriority::new(priority),
        start_date: fields::date(record.value("apex_startdate")),
        end_date: fields::date(record.value("apex_enddate")),
        expected_end_date: fields::date(record.value("apex_expectedenddate")),
        status: status.clone(),
        status_code: fields::integer(record.value("statuscode")).unwrap_or(0),
        status_code_formatted: status,
        state_code: fields::integer(record.value("statecode")).unwrap_or(0),
        assigned_to: formatted(record, "apex_assignedinspector")
            .unwrap_or_else(|| "Unassigned".into()),
        assigned_to_id: fields::lookup_id(record.value("apex_assignedinspector"))
            .unwrap_or_default(),
        description: None,
        actual_cost: None,
        estimated_cost: fields::decimal(record.value("apex_estimatedrepaircost")),
        case_id: fields::lookup_id(record.value("apex_case")),
        related_case_name: formatted(record, "apex_case"),
    }
}
