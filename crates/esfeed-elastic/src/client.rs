//! HTTP/1.1 [`IndexStore`] over the Elasticsearch REST API.

use std::time::Duration;

use bytes::Bytes;
use esfeed_core::{Event, IndexSettings, IndexStore, StoreError};
use http_body_util::{BodyExt, Full};
use hyper::header::CONTENT_TYPE;
use hyper::{Method, Request, Uri};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use serde_json::Value;

use crate::payload::{bulk_body, check_bulk_response, classify_failure};

const JSON: &str = "application/json";
const NDJSON: &str = "application/x-ndjson";

fn transport<E>(err: E) -> StoreError
where
    E: std::error::Error + Send + Sync + 'static,
{
    StoreError::Transport(Box::new(err))
}

/// Elasticsearch client bound to one cluster base URL.
///
/// Every request, response body included, is bounded by `timeout`.
#[derive(Clone)]
pub struct ElasticStore {
    base_url: String,
    timeout: Duration,
    http: Client<HttpConnector, Full<Bytes>>,
}

impl std::fmt::Debug for ElasticStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElasticStore")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl ElasticStore {
    /// Point a client at `url` (`http://host:port`, optionally with a path
    /// prefix). TLS is not supported.
    pub fn new(url: &str, timeout: Duration) -> Result<Self, StoreError> {
        let invalid = |reason: String| StoreError::InvalidUrl {
            url: url.to_string(),
            reason,
        };

        let base_url = url.trim().trim_end_matches('/').to_string();
        let uri: Uri = base_url.parse().map_err(|e| invalid(format!("{e}")))?;
        match uri.scheme_str() {
            Some("http") => {}
            Some(other) => return Err(invalid(format!("unsupported scheme {other:?}"))),
            None => return Err(invalid("missing scheme".to_string())),
        }
        if uri.host().is_none() {
            return Err(invalid("missing host".to_string()));
        }

        Ok(Self {
            base_url,
            timeout,
            http: Client::builder(TokioExecutor::new()).build_http(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send one request and collect the full response body.
    async fn send(
        &self,
        method: Method,
        path: &str,
        content_type: &'static str,
        body: Vec<u8>,
    ) -> Result<(u16, Bytes), StoreError> {
        let request = Request::builder()
            .method(method.clone())
            .uri(format!("{}{}", self.base_url, path))
            .header(CONTENT_TYPE, content_type)
            .body(Full::new(Bytes::from(body)))
            .map_err(transport)?;

        let exchange = async {
            let response = self.http.request(request).await.map_err(transport)?;
            let status = response.status().as_u16();
            let body = response
                .into_body()
                .collect()
                .await
                .map_err(transport)?
                .to_bytes();
            Ok::<_, StoreError>((status, body))
        };

        let (status, body) = tokio::time::timeout(self.timeout, exchange)
            .await
            .map_err(|_| StoreError::Timeout(self.timeout))??;
        tracing::debug!(%method, path, status, bytes = body.len(), "elasticsearch request");
        Ok((status, body))
    }

    async fn send_json(
        &self,
        method: Method,
        path: &str,
        body: &Value,
        index: &str,
    ) -> Result<Bytes, StoreError> {
        let (status, response) = self
            .send(method, path, JSON, serde_json::to_vec(body)?)
            .await?;
        if !(200..300).contains(&status) {
            return Err(classify_failure(status, &response, index));
        }
        Ok(response)
    }
}

impl IndexStore for ElasticStore {
    async fn create_index(
        &mut self,
        name: &str,
        settings: &IndexSettings,
    ) -> Result<(), StoreError> {
        self.send_json(Method::PUT, &format!("/{name}"), &settings.to_body(), name)
            .await
            .map(drop)
    }

    async fn put_mapping(
        &mut self,
        name: &str,
        document_type: Option<&str>,
        schema: &Value,
    ) -> Result<(), StoreError> {
        let path = match document_type {
            Some(doc_type) => format!("/{name}/_mapping/{doc_type}"),
            None => format!("/{name}/_mapping"),
        };
        self.send_json(Method::PUT, &path, schema, name).await.map(drop)
    }

    async fn bulk_index(
        &mut self,
        name: &str,
        document_type: Option<&str>,
        documents: &[Event],
    ) -> Result<(), StoreError> {
        let body = bulk_body(name, document_type, documents)?;
        let (status, response) = self.send(Method::POST, "/_bulk", NDJSON, body).await?;
        if !(200..300).contains(&status) {
            return Err(classify_failure(status, &response, name));
        }
        check_bulk_response(&response, documents.len())
    }
}
