pub mod confluence;

pub use confluence::{ConfluenceClient, CreatePageRequest, CreatePageResponse, PageBody, PageLinks};

use anyhow::Result;
use async_trait::async_trait;

use crate::utils::config::ReporterConfig;

/// Page-creation transport.
///
/// The production implementation is [`ConfluenceClient`]; tests substitute
/// a recording fake to assert how often and with what payload the wire is
/// touched.
#[async_trait]
pub trait PageTransport: Send + Sync {
    async fn create_page(
        &self,
        config: &ReporterConfig,
        request: &CreatePageRequest,
    ) -> Result<CreatePageResponse>;
}
