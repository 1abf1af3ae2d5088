use anyhow::{bail, Context};
use async_trait::async_trait;
use reqwest::{header, Method, RequestBuilder};
use serde::{de::DeserializeOwned, Deserialize};
use std::{fmt::Debug, time::Duration};
use url::Url;

use crate::{fetchxml::FetchQuery, fields::Entity};

/// A store that answers FetchXML queries with loosely typed records.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn retrieve_multiple(&self, entity: &str, query: &FetchQuery)
        -> anyhow::Result<Vec<Entity>>;
}

#[derive(Debug, Deserialize)]
struct EntityCollection {
    value: Vec<Entity>,
}

/// Client for a Dataverse style Web API.
pub struct WebApiClient {
    base: Url,
    api_version: String,
    token: String,
    http_client: reqwest::Client,
}

impl Debug for WebApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebApiClient")
            .field("base", &self.base.as_str())
            .field("api_version", &self.api_version)
            .finish_non_exhaustive()
    }
}

impl WebApiClient {
    pub fn new(
        base: Url,
        token: String,
        api_version: String,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            base,
            api_version,
            token,
            http_client: reqwest::Client::builder()
                .connect_timeout(timeout)
                .timeout(timeout)
                .build()?,
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn collection_url(&self, entity: &str) -> anyhow::Result<Url> {
        base_relative(
            &self.base,
            &format!("api/data/v{}/{}", self.api_version, entity_set_name(entity)),
        )
    }

    async fn execute<T>(&self, request: RequestBuilder) -> anyhow::Result<T>
    where
        T: DeserializeOwned,
    {
        let request = request
            .bearer_auth(&self.token)
            .header(header::ACCEPT, "application/json")
            .header("OData-MaxVersion", "4.0")
            .header("OData-Version", "4.0")
            .header(
                "Prefer",
                "odata.include-annotations=\"OData.Community.Display.V1.FormattedValue\"",
            )
            .build()?;

        let url = request.url().path().to_string();
        let response = self
            .http_client
            .execute(request)
            .await
            .with_context(|| format!("Request to {url} failed"))?;

        let status = response.status();
        if !status.is_success() {
            bail!("{url} answered {status}: {}", response.text().await?)
        }

        response
            .json()
            .await
            .with_context(|| format!("Unexpected response from {url}"))
    }
}

#[async_trait]
impl RecordStore for WebApiClient {
    #[tracing::instrument(skip(self, query), err(Debug))]
    async fn retrieve_multiple(
        &self,
        entity: &str,
        query: &FetchQuery,
    ) -> anyhow::Result<Vec<Entity>> {
        let mut url = self.collection_url(entity)?;
        url.query_pairs_mut()
            .append_pair("fetchXml", &query.to_string());

        let collection: EntityCollection = self
            .execute(self.http_client.request(Method::GET, url))
            .await?;

        Ok(collection.value)
    }
}

/// Resolves `path` below `base`, keeping a path prefix such as `/org1/`.
pub fn base_relative(base: &Url, path: &str) -> anyhow::Result<Url> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let directory = format!("{}/", base.path());
        base.set_path(&directory);
    }
    base.join(path)
        .with_context(|| format!("Cannot resolve {path} against {base}"))
}

/// Plural collection name the Web API exposes for an entity's logical name.
pub fn entity_set_name(logical_name: &str) -> String {
    if let Some(stem) = logical_name.strip_suffix('y') {
        format!("{stem}ies")
    } else if logical_name.ends_with('s') {
        format!("{logical_name}es")
    } else {
        format!("{logical_name}s")
    }
}
