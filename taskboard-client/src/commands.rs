use crate::{
    table::{print_lanes, print_task_details},
    util::Compact,
};
use chrono::{Local, Utc};
use clap::Args;
use colored::Colorize;
use taskboard_client::{
    fetch_all_tasks, navigation::LinkNavigator, view_record, JsonDataset, WebApiClient,
};
use taskboard_types::{FilterScope, Task, TaskLanes};

/// Everything needed to assemble the current user's task list.
#[derive(Debug)]
pub struct Board {
    pub client: WebApiClient,
    pub user_id: String,
    pub inspections: JsonDataset,
}

impl Board {
    pub async fn tasks(&self) -> anyhow::Result<Vec<Task>> {
        fetch_all_tasks(&self.client, &self.user_id, &self.inspections).await
    }
}

fn find<'a>(tasks: &'a [Task], id: &str) -> Option<&'a Task> {
    tasks
        .iter()
        .find(|task| task.id.eq_ignore_ascii_case(id) || task.task_id.eq_ignore_ascii_case(id))
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[clap(
        long,
        default_value_t = FilterScope::default(),
        help = "Time window to show: all, today or next7days"
    )]
    scope: FilterScope,
}

pub async fn list_command(args: ListArgs, board: Board) -> anyhow::Result<()> {
    let tasks = board.tasks().await?;
    let visible = args.scope.apply(&tasks, &Local::now());
    let lanes = TaskLanes::group(visible);

    if lanes.is_empty() {
        println!(
            "{} No tasks in scope {}",
            "✓".green().bold(),
            args.scope.to_string().italic()
        );
        return Ok(());
    }

    print_lanes(&lanes, Utc::now());
    Ok(())
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    #[clap(required = true, help = "Record ids or task codes to show")]
    ids: Vec<String>,
}

pub async fn show_command(args: ShowArgs, board: Board) -> anyhow::Result<()> {
    let tasks = board.tasks().await?;
    let now = Utc::now();

    for id in args.ids.compact() {
        match find(&tasks, &id) {
            Some(task) => print_task_details(task, now),
            None => println!("{} No task matches {}", "✖".red().bold(), id.italic()),
        }
    }

    Ok(())
}

#[derive(Debug, Args)]
pub struct OpenArgs {
    #[clap(help = "Record id or task code to open")]
    id: String,
}

pub async fn open_command(args: OpenArgs, board: Board) -> anyhow::Result<()> {
    let tasks = board.tasks().await?;
    let Some(task) = find(&tasks, &args.id) else {
        anyhow::bail!("No task matches {}", args.id);
    };

    let navigator = LinkNavigator::new(board.client.base().clone());
    view_record(&navigator, task).await;
    Ok(())
}
