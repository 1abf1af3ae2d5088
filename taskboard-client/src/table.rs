use chrono::{DateTime, Local, Utc};
use colored::{ColoredString, Colorize};
use tabled::{
    builder::Builder,
    settings::{
        object::{Columns, Rows},
        Color, Style,
    },
};

use taskboard_types::{PriorityTier, Task, TaskLanes};

fn tier_colored(tier: PriorityTier, text: &str) -> ColoredString {
    match tier {
        PriorityTier::High => text.truecolor(201, 20, 50),
        PriorityTier::Medium => text.truecolor(249, 115, 22),
        PriorityTier::Low => text.truecolor(0, 120, 212),
    }
}

fn format_date(date: Option<DateTime<Utc>>) -> String {
    date.map_or_else(
        || "Not set".into(),
        |date| date.with_timezone(&Local).format("%Y-%m-%d").to_string(),
    )
}

fn format_cost(cost: Option<f64>) -> String {
    cost.map_or_else(|| "-".into(), |cost| format!("{cost:.2}"))
}

pub fn print_lanes(lanes: &TaskLanes<'_>, now: DateTime<Utc>) {
    for tier in PriorityTier::VARIANTS {
        let tasks = lanes.lane(tier);
        println!(
            "{} {}",
            tier_colored(tier, tier.lane_label()).bold(),
            format!("({})", tasks.len()).bright_black()
        );

        if tasks.is_empty() {
            println!("  {}\n", "No tasks".bright_black().italic());
            continue;
        }

        let mut builder = Builder::new();
        builder.push_record(["", "Task", "Type", "Name", "Due", "Status", "Case"]);

        for task in tasks {
            builder.push_record([
                (if task.is_completed() { "✓" } else { "○" }).to_string(),
                task.task_id.clone(),
                task.kind.to_string(),
                task.name.clone(),
                task.due_label(now),
                task.status.clone(),
                task.related_case_name.clone().unwrap_or_default(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::modern_rounded())
            .modify(Columns::first(), Color::FG_GREEN)
            .modify(Rows::first(), Color::FG_WHITE | Color::BOLD);
        println!("{table}\n");
    }
}

pub fn print_task_details(task: &Task, now: DateTime<Utc>) {
    let tier = task.priority.tier();
    println!(
        "{} {}",
        tier_colored(tier, &task.task_id).bold(),
        task.id.bright_black().italic()
    );

    let mut builder = Builder::new();
    builder.push_record(["Field", "Value"]);
    builder.push_record(["Name".to_string(), task.name.clone()]);
    builder.push_record(["Type".to_string(), task.kind.to_string()]);
    builder.push_record([
        "Priority".to_string(),
        format!("{} ({})", tier, tier.lane_label()),
    ]);
    builder.push_record(["Status".to_string(), task.status.clone()]);
    builder.push_record(["Due".to_string(), task.due_label(now)]);
    builder.push_record(["Assigned To".to_string(), task.assigned_to.clone()]);
    builder.push_record(["Start Date".to_string(), format_date(task.start_date)]);
    builder.push_record(["End Date".to_string(), format_date(task.end_date)]);
    builder.push_record([
        "Expected End Date".to_string(),
        format_date(task.expected_end_date),
    ]);

    if let Some(description) = &task.description {
        builder.push_record(["Description".to_string(), description.clone()]);
    }
    if task.estimated_cost.is_some() {
        builder.push_record(["Estimated Cost".to_string(), format_cost(task.estimated_cost)]);
    }
    if task.actual_cost.is_some() {
        builder.push_record(["Actual Cost".to_string(), format_cost(task.actual_cost)]);
    }
    if let Some(case) = &task.related_case_name {
        builder.push_record(["Related Case".to_string(), case.clone()]);
    }

    let mut table = builder.build();
    table
        .with(Style::modern_rounded())
        .modify(Rows::first(), Color::FG_WHITE | Color::BOLD);
    println!("{table}\n");
}
