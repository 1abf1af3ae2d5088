use std::sync::Mutex;

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::{json, Value};
use taskboard_client::{
    fetch_all_tasks, fetchxml::FetchQuery, fields::Entity, view_record, JsonDataset, Navigator,
    RecordStore,
};
use taskboard_types::{PriorityTier, TaskKind, TaskPriority};

const USER: &str = "{8D5A1C2E-0B3F-4C6D-9E7A-1B2C3D4E5F60}";

struct FakeStore {
    entities: Option<Vec<Entity>>,
    queries: Mutex<Vec<(String, String)>>,
}

impl FakeStore {
    fn returning(entities: Vec<Value>) -> Self {
        Self {
            entities: Some(
                entities
                    .into_iter()
                    .map(|value| value.as_object().unwrap().clone())
                    .collect(),
            ),
            queries: Mutex::new(Vec::new()),
        }
    }

    fn failing() -> Self {
        Self {
            entities: None,
            queries: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl RecordStore for FakeStore {
    async fn retrieve_multiple(
        &self,
        entity: &str,
        query: &FetchQuery,
    ) -> anyhow::Result<Vec<Entity>> {
        self.queries
            .lock()
            .unwrap()
            .push((entity.to_string(), query.to_string()));

        self.entities
            .clone()
            .ok_or_else(|| anyhow!("503 Service Unavailable"))
    }
}

fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_utc()
}

fn inspections(records: Value) -> JsonDataset {
    let records = records.as_object().unwrap();
    serde_json::from_value(json!({
        "sortedRecordIds": records.keys().collect::<Vec<_>>(),
        "records": records,
    }))
    .unwrap()
}

fn activity(id: &str, priority: i64, start: Option<&str>) -> Value {
    json!({
        "apex_maintenanceactivityid": id,
        "apex_name": id,
        "apex_prioritylevel": priority,
        "apex_startdate": start,
        "statecode": 0,
        "statuscode": 1,
    })
}

#[tokio::test]
async fn both_sources_empty() {
    let store = FakeStore::returning(vec![]);
    let tasks = fetch_all_tasks(&store, USER, &JsonDataset::default())
        .await
        .unwrap();
    assert!(tasks.is_empty());
}

#[tokio::test]
async fn sends_one_query_for_the_normalized_user() {
    let store = FakeStore::returning(vec![]);
    fetch_all_tasks(&store, USER, &JsonDataset::default())
        .await
        .unwrap();

    let queries = store.queries.lock().unwrap();
    assert_eq!(queries.len(), 1);
    let (entity, xml) = &queries[0];
    assert_eq!(entity, "apex_maintenanceactivity");
    assert!(xml.contains(
        "<condition attribute=\"apex_assignedtechnician\" operator=\"eq\" value=\"8d5a1c2e-0b3f-4c6d-9e7a-1b2c3d4e5f60\" />"
    ));
    assert!(xml.contains("<condition attribute=\"statecode\" operator=\"eq\" value=\"0\" />"));
    assert!(xml.contains("alias=\"technician\""));
}

#[tokio::test]
async fn merges_and_counts_both_kinds() {
    let dataset = inspections(json!({
        "i1": { "values": { "apex_prioritylevel": 455220002 } },
        "i2": { "values": { "apex_prioritylevel": 455220000 } },
        "i3": {},
    }));
    let store = FakeStore::returning(vec![
        activity("m1", 455220001, None),
        activity("m2", 455220000, Some("2025-04-01T00:00:00Z")),
    ]);

    let tasks = fetch_all_tasks(&store, USER, &dataset).await.unwrap();
    assert_eq!(tasks.len(), 5);
    assert_eq!(
        tasks.iter().filter(|t| t.kind == TaskKind::Inspection).count(),
        3
    );
    assert_eq!(
        tasks.iter().filter(|t| t.kind == TaskKind::Maintenance).count(),
        2
    );

    let order: Vec<_> = tasks.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(order, ["m2", "i2", "m1", "i1", "i3"]);
}

#[tokio::test]
async fn high_priority_inspection_keeps_its_start_date() {
    let dataset = inspections(json!({
        "a1b2c3d4-0000-0000-0000-000000000000": {
            "values": { "apex_prioritylevel": 455220000, "apex_startdate": "2025-01-01" }
        }
    }));
    let store = FakeStore::returning(vec![]);

    let tasks = fetch_all_tasks(&store, USER, &dataset).await.unwrap();
    assert_eq!(tasks[0].priority.tier(), PriorityTier::High);
    assert_eq!(tasks[0].effective_date(), Some(date(2025, 1, 1)));
    assert_eq!(tasks[0].task_id, "INS-a1b2c3d4");
}

#[tokio::test]
async fn expected_end_date_stands_in_for_missing_start() {
    let store = FakeStore::returning(vec![json!({
        "apex_maintenanceactivityid": "m1",
        "apex_prioritylevel": 455220001,
        "apex_maintenanceactualenddate": "2025-06-01T00:00:00Z",
    })]);

    let tasks = fetch_all_tasks(&store, USER, &JsonDataset::default())
        .await
        .unwrap();
    assert_eq!(tasks[0].effective_date(), Some(date(2025, 6, 1)));
}

#[tokio::test]
async fn priority_wins_over_date() {
    let dataset = inspections(json!({
        "medium": { "values": { "apex_prioritylevel": 455220001, "apex_startdate": "2025-01-01" } },
        "high": { "values": { "apex_prioritylevel": 455220000, "apex_startdate": "2025-03-01" } },
    }));
    let store = FakeStore::returning(vec![]);

    let tasks = fetch_all_tasks(&store, USER, &dataset).await.unwrap();
    let order: Vec<_> = tasks.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(order, ["high", "medium"]);
}

#[tokio::test]
async fn remote_failure_discards_inspections() {
    let dataset = inspections(json!({ "i1": {} }));
    let store = FakeStore::failing();

    let error = fetch_all_tasks(&store, USER, &dataset).await.unwrap_err();
    assert!(format!("{error:#}").contains("503 Service Unavailable"));
}

#[tokio::test]
async fn invalid_user_id_fails_before_querying() {
    let store = FakeStore::returning(vec![]);
    let result = fetch_all_tasks(&store, "{not-a-guid}", &JsonDataset::default()).await;

    assert!(result.is_err());
    assert!(store.queries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_priorities_sort_with_their_raw_ordinal() {
    let store = FakeStore::returning(vec![
        activity("known-low", TaskPriority::LOW, None),
        activity("unknown", 455220005, None),
        activity("tiny", 1, None),
    ]);

    let tasks = fetch_all_tasks(&store, USER, &JsonDataset::default())
        .await
        .unwrap();
    let order: Vec<_> = tasks.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(order, ["tiny", "known-low", "unknown"]);
    assert!(tasks.iter().all(|t| t.priority.tier() == PriorityTier::Low));
}

struct RecordingNavigator {
    opened: Mutex<Vec<(String, String)>>,
    fail: bool,
}

#[async_trait]
impl Navigator for RecordingNavigator {
    async fn open_form(&self, entity_name: &str, entity_id: &str) -> anyhow::Result<()> {
        self.opened
            .lock()
            .unwrap()
            .push((entity_name.to_string(), entity_id.to_string()));
        if self.fail {
            return Err(anyhow!("form is not available"));
        }
        Ok(())
    }
}

#[tokio::test]
async fn navigates_to_the_entity_of_each_kind() {
    let dataset = inspections(json!({ "i1": {} }));
    let store = FakeStore::returning(vec![activity("m1", TaskPriority::HIGH, None)]);
    let tasks = fetch_all_tasks(&store, USER, &dataset).await.unwrap();

    let navigator = RecordingNavigator {
        opened: Mutex::new(Vec::new()),
        fail: true,
    };
    for task in &tasks {
        view_record(&navigator, task).await;
    }

    let opened = navigator.opened.lock().unwrap();
    assert_eq!(
        *opened,
        [
            ("apex_maintenanceactivity".to_string(), "m1".to_string()),
            ("apex_inspectionvisit".to_string(), "i1".to_string()),
        ]
    );
}
