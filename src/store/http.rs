//! REST client for a JSON document gateway in front of the league store.
//!
//! The gateway exposes:
//! - `GET  {base}/{doc path}`   → document body, 404 when absent
//! - `GET  {base}/{collection}` → `[{"id": ..., "data": {...}}, ...]`
//! - `PATCH {base}/{doc path}`  → replaces the given top-level fields

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{Map, Value};

use super::{Document, DocumentStore};
use crate::error::{LeagueError, Result};

#[derive(Deserialize)]
struct ListedDocument {
    id: String,
    #[serde(default)]
    data: Value,
}

/// Build request headers, adding the bearer token when one is configured.
pub fn gateway_headers(token: Option<&str>) -> Result<HeaderMap> {
    let mut h = HeaderMap::new();
    h.insert(ACCEPT, HeaderValue::from_static("application/json"));
    if let Some(token) = token {
        h.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token))?,
        );
    }
    Ok(h)
}

pub struct HttpStore {
    client: Client,
    base_url: String,
    headers: HeaderMap,
}

impl HttpStore {
    pub fn new(base_url: impl Into<String>, token: Option<&str>) -> Result<Self> {
        Ok(Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            headers: gateway_headers(token)?,
        })
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_matches('/'))
    }
}

impl DocumentStore for HttpStore {
    async fn get(&self, path: &str) -> Result<Option<Value>> {
        let res = self
            .client
            .get(self.url_for(path))
            .headers(self.headers.clone())
            .send()
            .await?;

        if res.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        Ok(Some(res.error_for_status()?.json::<Value>().await?))
    }

    async fn list(&self, collection: &str) -> Result<Vec<Document>> {
        let res = self
            .client
            .get(self.url_for(collection))
            .headers(self.headers.clone())
            .send()
            .await?;

        if res.status() == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }

        let listed = res
            .error_for_status()?
            .json::<Vec<ListedDocument>>()
            .await?;

        Ok(listed
            .into_iter()
            .map(|doc| Document {
                id: doc.id,
                data: doc.data,
            })
            .collect())
    }

    async fn update_fields(&self, path: &str, fields: Map<String, Value>) -> Result<()> {
        let res = self
            .client
            .patch(self.url_for(path))
            .headers(self.headers.clone())
            .json(&Value::Object(fields))
            .send()
            .await?;

        if res.status() == StatusCode::NOT_FOUND {
            return Err(LeagueError::NotFound {
                path: path.to_string(),
            });
        }

        res.error_for_status()?;
        Ok(())
    }
}
