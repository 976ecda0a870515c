// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::rc::Rc;
use std::time::Duration;

use reqwest::{StatusCode, Url};
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::GatewayError;
use crate::mapper;
use crate::models::{
    ApiResponse, PageResponse, RawTransaction, Statistics, TransactionParameters, ViewRecord,
};
use crate::storage::{AUTH_TOKEN_KEY, KeyValueStorage};
use crate::utils::http_client;

pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Operations offered by the remote transactions API.
pub trait TransactionGateway {
    /// Every transaction, already mapped to View Records.
    fn list_all(&self) -> Result<Vec<ViewRecord>, GatewayError>;
    fn list_page(&self, page: u32, size: u32)
    -> Result<PageResponse<RawTransaction>, GatewayError>;
    fn get_one(&self, id: &str) -> Result<RawTransaction, GatewayError>;
    fn create(&self, params: &TransactionParameters) -> Result<ViewRecord, GatewayError>;
    /// `partial` is sent as-is; the server decides which fields it accepts.
    fn update(&self, id: &str, partial: &Value) -> Result<RawTransaction, GatewayError>;
    fn delete(&self, id: &str) -> Result<(), GatewayError>;
    fn statistics(&self) -> Result<Statistics, GatewayError>;
}

pub struct HttpGateway {
    client: Client,
    base_url: String,
    login_url: String,
    storage: Rc<dyn KeyValueStorage>,
}

impl HttpGateway {
    pub fn new(cfg: &Config, storage: Rc<dyn KeyValueStorage>) -> Result<Self, GatewayError> {
        let client = http_client(Duration::from_secs(cfg.timeout_secs))?;
        Ok(Self::with_client(client, cfg, storage))
    }

    /// Uses a caller-built client; the timeout in `cfg` is not applied.
    pub fn with_client(client: Client, cfg: &Config, storage: Rc<dyn KeyValueStorage>) -> Self {
        Self {
            client,
            base_url: cfg.api_base_url.trim_end_matches('/').to_string(),
            login_url: cfg.login_url.clone(),
            storage,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `/transactions/{id}` with `id` percent-encoded as one path segment.
    fn item_url(&self, id: &str) -> Result<Url, GatewayError> {
        let mut url = Url::parse(&self.url("/transactions"))
            .map_err(|e| GatewayError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| GatewayError::InvalidUrl(self.base_url.clone()))?
            .push(id);
        Ok(url)
    }

    fn token(&self) -> Option<String> {
        match self.storage.get(AUTH_TOKEN_KEY) {
            Ok(t) => t.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!(error = %e, "could not read auth token, sending request without it");
                None
            }
        }
    }

    fn send(&self, req: RequestBuilder) -> Result<Response, GatewayError> {
        let req = match self.token() {
            Some(t) => req.bearer_auth(t),
            None => req,
        };
        let resp = req.send()?;
        let status = resp.status();
        debug!(url = %resp.url(), status = status.as_u16(), "api response");

        if status == StatusCode::UNAUTHORIZED {
            if let Err(e) = self.storage.remove(AUTH_TOKEN_KEY) {
                warn!(error = %e, "could not clear rejected auth token");
            }
            return Err(GatewayError::Unauthorized {
                login_url: self.login_url.clone(),
            });
        }
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(GatewayError::Status {
                status: status.as_u16(),
                message: server_message(&body),
            });
        }
        Ok(resp)
    }
}

fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, GatewayError> {
    let body = resp.text()?;
    Ok(serde_json::from_str(&body)?)
}

/// Pulls `message` out of a JSON error body, if there is one.
fn server_message(body: &str) -> Option<String> {
    let v: Value = serde_json::from_str(body).ok()?;
    v.get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

impl TransactionGateway for HttpGateway {
    fn list_all(&self) -> Result<Vec<ViewRecord>, GatewayError> {
        let resp = self.send(self.client.get(self.url("/transactions")))?;
        let raws: Vec<Value> = read_json(resp)?;
        Ok(mapper::map_all(&raws)?)
    }

    fn list_page(
        &self,
        page: u32,
        size: u32,
    ) -> Result<PageResponse<RawTransaction>, GatewayError> {
        let req = self
            .client
            .get(self.url("/transactions"))
            .query(&[("page", page), ("size", size)]);
        let env: ApiResponse<PageResponse<RawTransaction>> = read_json(self.send(req)?)?;
        Ok(env.data)
    }

    fn get_one(&self, id: &str) -> Result<RawTransaction, GatewayError> {
        let resp = self.send(self.client.get(self.item_url(id)?))?;
        let env: ApiResponse<RawTransaction> = read_json(resp)?;
        Ok(env.data)
    }

    fn create(&self, params: &TransactionParameters) -> Result<ViewRecord, GatewayError> {
        let req = self.client.post(self.url("/transactions")).json(params);
        let raw: Value = read_json(self.send(req)?)?;
        Ok(mapper::map_to_view_record(&raw)?)
    }

    fn update(&self, id: &str, partial: &Value) -> Result<RawTransaction, GatewayError> {
        let req = self
            .client
            .put(self.item_url(id)?)
            .json(partial);
        let env: ApiResponse<RawTransaction> = read_json(self.send(req)?)?;
        Ok(env.data)
    }

    fn delete(&self, id: &str) -> Result<(), GatewayError> {
        self.send(self.client.delete(self.item_url(id)?))?;
        Ok(())
    }

    fn statistics(&self) -> Result<Statistics, GatewayError> {
        let resp = self.send(self.client.get(self.url("/transactions/statistics")))?;
        let env: ApiResponse<Statistics> = read_json(resp)?;
        Ok(env.data)
    }
}
