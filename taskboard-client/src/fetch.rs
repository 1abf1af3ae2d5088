use anyhow::Context;
use taskboard_types::{Task, TaskKind, TaskPriority, UserId};

use crate::{
    client::RecordStore,
    fetchxml::{FetchQuery, LinkEntity, Operator},
    fields::{self, Entity},
};

pub const MAINTENANCE_ENTITY: &str = "apex_maintenanceactivity";

/// Lifecycle state of records that are still open.
const ACTIVE_STATE: i64 = 0;

const MAINTENANCE_ATTRIBUTES: [&str; 12] = [
    "apex_activitydescription",
    "apex_actualcost",
    "apex_assignedtechnician",
    "apex_enddate",
    "apex_maintenanceactivityid",
    "apex_maintenanceactualenddate",
    "apex_name",
    "apex_prioritylevel",
    "apex_startdate",
    "apex_case",
    "statecode",
    "statuscode",
];

/// Active maintenance activities assigned to `user`, with the technician's name joined in.
pub fn maintenance_query(user: &UserId) -> FetchQuery {
    FetchQuery::new(MAINTENANCE_ENTITY)
        .attributes(MAINTENANCE_ATTRIBUTES)
        .condition("apex_assignedtechnician", Operator::Eq, user)
        .condition("statecode", Operator::Eq, ACTIVE_STATE)
        .link(LinkEntity {
            name: "systemuser".into(),
            from: "systemuserid".into(),
            to: "apex_assignedtechnician".into(),
            alias: "technician".into(),
            attributes: vec!["fullname".into()],
        })
}

#[tracing::instrument(skip(store), err(Debug))]
pub async fn fetch_maintenance_activities<S>(store: &S, user_id: &str) -> anyhow::Result<Vec<Task>>
where
    S: RecordStore + ?Sized,
{
    let user: UserId = user_id.parse().context("Cannot build maintenance query")?;
    tracing::debug!("Fetching maintenance activities for user {user}");

    let entities = store
        .retrieve_multiple(MAINTENANCE_ENTITY, &maintenance_query(&user))
        .await
        .context("Failed to fetch maintenance activities")?;

    tracing::debug!("Fetched {} maintenance activities", entities.len());
    Ok(entities.iter().map(map_maintenance_activity).collect())
}

pub fn map_maintenance_activity(entity: &Entity) -> Task {
    let id = fields::string(entity.get("apex_maintenanceactivityid")).unwrap_or_default();
    let name = fields::string(entity.get("apex_name"));
    let priority = fields::integer(entity.get("apex_prioritylevel")).unwrap_or(TaskPriority::LOW);
    let status = fields::formatted(entity, "statuscode").map(str::to_string);
    let technician = "_apex_assignedtechnician_value";
    let case = "_apex_case_value";

    Task {
        task_id: name
            .clone()
            .unwrap_or_else(|| fields::short_code("MA-", &id)),
        name: name.unwrap_or_else(|| "Unnamed Maintenance".into()),
        id,
        kind: TaskKind::Maintenance,
        priority: TaskPriority::new(priority),
        start_date: fields::date(entity.get("apex_startdate")),
        end_date: fields::date(entity.get("apex_enddate")),
        expected_end_date: fields::date(entity.get("apex_maintenanceactualenddate")),
        status: status.clone().unwrap_or_else(|| "Unknown".into()),
        status_code: fields::integer(entity.get("statuscode")).unwrap_or(0),
        status_code_formatted: status.unwrap_or_default(),
        state_code: fields::integer(entity.get("statecode")).unwrap_or(0),
        assigned_to: fields::formatted(entity, technician)
            .map_or_else(|| "Unassigned".into(), str::to_string),
        assigned_to_id: fields::string(entity.get(technician)).unwrap_or_default(),
        description: fields::string(entity.get("apex_activitydescription")),
        actual_cost: fields::decimal(entity.get("apex_actualcost")),
        estimated_cost: None,
        case_id: fields::string(entity.get(case)),
        related_case_name: fields::formatted(entity, case).map(str::to_string),
    }
}
