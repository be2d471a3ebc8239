use std::time::Duration;

use log::{debug, log_enabled, trace};
use reqwest_middleware::RequestBuilder;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    config::Config,
    threads::{insights::InsightsResponse, post::Post, Page, User},
};

use super::{ApiClient, ApiError};

/// Posts per list page, the API maximum
pub const PAGE_LIMIT: u32 = 100;

#[derive(Debug, Clone)]
pub struct ThreadsClient {
    inner: ApiClient,
    base_url: String,
    token: String,
}

impl ThreadsClient {
    pub fn new(config: &Config, token: String) -> Result<Self, ApiError> {
        Self::with_base_url(config.base_url(), token, config.timeout())
    }

    pub fn with_base_url(base_url: &str, token: String, timeout: Duration) -> Result<Self, ApiError> {
        let inner = ApiClient::new(timeout)?;
        let base_url = base_url.trim_end_matches('/').to_string();
        Ok(Self {
            inner,
            base_url,
            token,
        })
    }

    fn wrap_request(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.query(&[("access_token", self.token.as_str())])
    }

    pub async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let url = format!("{}/{}", self.base_url, path);
        let request = self.inner.client().get(&url).query(query);
        let request = self.wrap_request(request);

        debug!("GET {}", url);
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::Status { status, body });
        }

        if log_enabled!(log::Level::Trace) {
            if let Ok(value) = serde_json::from_str::<Value>(&body) {
                trace!("{}", serde_json::to_string_pretty(&value).unwrap_or_default());
            }
        }

        Ok(serde_json::from_str(&body)?)
    }

    pub async fn get_me(&self) -> Result<User, ApiError> {
        self.fetch("me", &[("fields", "id,username,name")]).await
    }

    pub async fn get_threads(
        &self,
        user: &User,
        fields: &[&str],
        after: Option<&str>,
    ) -> Result<Page<Post>, ApiError> {
        let path = format!("{}/threads", user.id);
        let fields = fields.join(",");
        let limit = PAGE_LIMIT.to_string();

        let mut query = vec![("fields", fields.as_str()), ("limit", limit.as_str())];
        if let Some(after) = after {
            query.push(("after", after));
        }

        self.fetch(&path, &query).await
    }

    pub async fn get_insights(
        &self,
        media_id: &str,
        metrics: &str,
    ) -> Result<InsightsResponse, ApiError> {
        let path = format!("{}/insights", media_id);
        self.fetch(&path, &[("metric", metrics)]).await
    }
}
