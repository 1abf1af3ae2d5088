pub mod aggregate;
pub mod client;
pub mod dataset;
pub mod fetch;
pub mod fetchxml;
pub mod fields;
pub mod navigation;

pub use crate::{
    aggregate::fetch_all_tasks,
    client::{RecordStore, WebApiClient},
    dataset::{parse_inspections, Dataset, DatasetRecord, JsonDataset},
    fetch::fetch_maintenance_activities,
    navigation::{view_record, Navigator},
};
