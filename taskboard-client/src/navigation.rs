use async_trait::async_trait;
use taskboard_types::Task;
use url::Url;

use crate::client::base_relative;

/// Host side effect that brings up the form of a record.
#[async_trait]
pub trait Navigator: Send + Sync {
    async fn open_form(&self, entity_name: &str, entity_id: &str) -> anyhow::Result<()>;
}

/// Opens the record behind a task. Failures are logged and otherwise ignored.
pub async fn view_record<N>(navigator: &N, task: &Task)
where
    N: Navigator + ?Sized,
{
    let entity_name = task.kind.entity_name();
    if let Err(error) = navigator.open_form(entity_name, &task.id).await {
        tracing::warn!("Error opening record {entity_name}/{}: {error:?}", task.id);
    }
}

/// Model-driven app URL of a record's main form.
pub fn record_url(base: &Url, entity_name: &str, entity_id: &str) -> anyhow::Result<Url> {
    let mut url = base_relative(base, "main.aspx")?;
    url.query_pairs_mut()
        .clear()
        .append_pair("pagetype", "entityrecord")
        .append_pair("etn", entity_name)
        .append_pair("id", entity_id);
    Ok(url)
}

/// Navigates by printing the record's URL.
#[derive(Debug, Clone)]
pub struct LinkNavigator {
    base: Url,
}

impl LinkNavigator {
    pub fn new(base: Url) -> Self {
        Self { base }
    }
}

#[async_trait]
impl Navigator for LinkNavigator {
    async fn open_form(&self, entity_name: &str, entity_id: &str) -> anyhow::Result<()> {
        println!("{}", record_url(&self.base, entity_name, entity_id)?);
        Ok(())
    }
}
