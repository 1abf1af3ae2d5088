use taskboard_types::{sort_tasks, Task};

use crate::{
    client::RecordStore,
    dataset::{parse_inspections, Dataset},
    fetch::fetch_maintenance_activities,
};

/// Inspections from the dataset and the user's maintenance activities, most urgent first.
///
/// If the maintenance fetch fails nothing is returned, not even the
/// inspections that were already parsed.
#[tracing::instrument(skip(store, inspections), err(Debug))]
pub async fn fetch_all_tasks<S, D>(
    store: &S,
    user_id: &str,
    inspections: &D,
) -> anyhow::Result<Vec<Task>>
where
    S: RecordStore + ?Sized,
    D: Dataset + ?Sized,
{
    let inspections = parse_inspections(inspections);
    let maintenance = fetch_maintenance_activities(store, user_id).await?;

    tracing::info!(
        "Total tasks: {} ({} inspections + {} maintenance)",
        inspections.len() + maintenance.len(),
        inspections.len(),
        maintenance.len()
    );

    let mut tasks = inspections;
    tasks.extend(maintenance);
    sort_tasks(&mut tasks);

    Ok(tasks)
}
