use serde::{Deserialize, Serialize};

/// One label/value pair rendered into the report header
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetaPair {
    pub key: String,
    pub value: String,
}

impl MetaPair {
    pub fn new(key: &str, value: &str) -> Self {
        Self {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}

/// Reporter configuration, constructed by the host runner
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReporterConfig {
    /// Confluence base URL, e.g. "https://example.atlassian.net/wiki"
    pub endpoint: String,

    /// Account the pages are created as
    pub username: String,

    /// API token paired with the username for basic auth
    pub credential: String,

    /// Destination space for the report pages
    pub space_id: String,

    /// Scope new pages under this existing page
    pub parent_page_id: Option<String>,

    /// Set to false to skip rendering and publishing entirely
    pub generate_page: bool,

    /// Fixed page title; falls back to the current date/time when unset
    pub page_title: Option<String>,

    /// Extra header lines, rendered in the order supplied
    pub metadata: Vec<MetaPair>,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            username: String::new(),
            credential: String::new(),
            space_id: String::new(),
            parent_page_id: None,
            generate_page: true,
            page_title: None,
            metadata: Vec::new(),
        }
    }
}

impl ReporterConfig {
    /// True when every field required for a publish attempt is present.
    /// An incomplete configuration skips publishing, it never fails the run.
    pub fn is_complete(&self) -> bool {
        !self.endpoint.is_empty()
            && !self.username.is_empty()
            && !self.credential.is_empty()
            && !self.space_id.is_empty()
    }
}
