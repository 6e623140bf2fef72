use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use reqwest::header;
use serde::{Deserialize, Serialize};

use super::PageTransport;
use crate::utils::config::ReporterConfig;

/// Payload for `POST {endpoint}/api/v2/pages`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePageRequest {
    pub space_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Always "current", drafts are never created
    pub status: &'static str,
    pub title: String,
    pub body: PageBody,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageBody {
    /// Markup format identifier for `value`
    pub representation: &'static str,
    pub value: String,
}

impl CreatePageRequest {
    pub fn new(config: &ReporterConfig, title: &str, body: String) -> Self {
        Self {
            space_id: config.space_id.clone(),
            parent_id: config.parent_page_id.clone(),
            status: "current",
            title: title.to_string(),
            body: PageBody {
                representation: "storage",
                value: body,
            },
        }
    }
}

/// Subset of the creation response needed to derive a viewable URL
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePageResponse {
    #[serde(rename = "_links")]
    pub links: PageLinks,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PageLinks {
    pub base: String,
    pub webui: String,
}

impl CreatePageResponse {
    /// Viewable location of the created page
    pub fn page_url(&self) -> String {
        format!("{}{}", self.links.base, self.links.webui)
    }
}

/// Confluence REST v2 client. One POST per publish, no retry, no timeout.
pub struct ConfluenceClient {
    http: reqwest::Client,
}

impl ConfluenceClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }
}

impl Default for ConfluenceClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageTransport for ConfluenceClient {
    async fn create_page(
        &self,
        config: &ReporterConfig,
        request: &CreatePageRequest,
    ) -> Result<CreatePageResponse> {
        let url = format!("{}/api/v2/pages", config.endpoint);
        let auth = STANDARD.encode(format!("{}:{}", config.username, config.credential));

        log::debug!("POST {} (space {})", url, request.space_id);

        let response = self
            .http
            .post(&url)
            .header(header::AUTHORIZATION, format!("Basic {}", auth))
            .header(header::ACCEPT, "application/json")
            .json(request)
            .send()
            .await
            .context("page creation request failed")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("page creation failed: HTTP {}", status);
        }

        response
            .json::<CreatePageResponse>()
            .await
            .context("unexpected page creation response")
    }
}
