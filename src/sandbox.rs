//! Typed client for the public restful-api.dev `/objects` sandbox.
//!
//! Unlike the local users service, the sandbox assigns string ids, answers
//! `POST` with 200, supports `PATCH`, and can filter a listing by id.

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::SandboxError;

const OBJECTS: &str = "objects";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SandboxObject {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Any other top-level keys the sandbox echoed back.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body for create and full replace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewObject {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeleteReceipt {
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct SandboxClient {
    http: Client,
    base_url: String,
}

impl SandboxClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, SandboxError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self::with_client(http, base_url))
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, id: Option<&str>) -> String {
        match id {
            Some(id) => format!("{}/{OBJECTS}/{id}", self.base_url),
            None => format!("{}/{OBJECTS}", self.base_url),
        }
    }

    /// GET /objects
    pub async fn list(&self) -> Result<Vec<SandboxObject>, SandboxError> {
        let res = self.http.get(self.url(None)).send().await?;
        decode(res, None).await
    }

    /// GET /objects?id=..&id=..
    pub async fn list_by_ids(&self, ids: &[&str]) -> Result<Vec<SandboxObject>, SandboxError> {
        let query: Vec<(&str, &str)> = ids.iter().map(|id| ("id", *id)).collect();
        let res = self.http.get(self.url(None)).query(&query).send().await?;
        decode(res, None).await
    }

    /// GET /objects?name=..
    pub async fn list_by_name(&self, name: &str) -> Result<Vec<SandboxObject>, SandboxError> {
        let res = self.http.get(self.url(None)).query(&[("name", name)]).send().await?;
        decode(res, None).await
    }

    /// GET /objects/{id}
    pub async fn get(&self, id: &str) -> Result<SandboxObject, SandboxError> {
        let res = self.http.get(self.url(Some(id))).send().await?;
        decode(res, Some(id)).await
    }

    /// POST /objects
    pub async fn create(&self, obj: &NewObject) -> Result<SandboxObject, SandboxError> {
        self.create_raw(obj).await
    }

    /// POST /objects with an arbitrary body. The sandbox validates it and
    /// answers 400 for a missing `name` or a bad `data.price`.
    pub async fn create_raw<B: Serialize + ?Sized>(
        &self,
        body: &B,
    ) -> Result<SandboxObject, SandboxError> {
        let res = self.http.post(self.url(None)).json(body).send().await?;
        let created: SandboxObject = decode(res, None).await?;
        tracing::debug!(id = %created.id, "Sandbox object created");
        Ok(created)
    }

    /// PUT /objects/{id}
    pub async fn replace(&self, id: &str, obj: &NewObject) -> Result<SandboxObject, SandboxError> {
        let res = self.http.put(self.url(Some(id))).json(obj).send().await?;
        decode(res, Some(id)).await
    }

    /// PATCH /objects/{id} with any subset of the object's fields.
    pub async fn patch(&self, id: &str, partial: &Value) -> Result<SandboxObject, SandboxError> {
        let res = self.http.patch(self.url(Some(id))).json(partial).send().await?;
        decode(res, Some(id)).await
    }

    /// DELETE /objects/{id}
    pub async fn delete(&self, id: &str) -> Result<DeleteReceipt, SandboxError> {
        let res = self.http.delete(self.url(Some(id))).send().await?;
        decode(res, Some(id)).await
    }
}

async fn decode<T: DeserializeOwned>(res: Response, id: Option<&str>) -> Result<T, SandboxError> {
    let status = res.status();

    if let (StatusCode::NOT_FOUND, Some(id)) = (status, id) {
        return Err(SandboxError::NotFound(id.to_string()));
    }

    if !status.is_success() {
        let body = res.text().await.unwrap_or_default();
        tracing::warn!(%status, %body, "Sandbox request failed");
        return Err(SandboxError::Status { status, body });
    }

    Ok(res.json::<T>().await?)
}
