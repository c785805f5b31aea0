//! Where pages come from.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use autoapply_page_cdp::{CdpClient, CdpPage};
use autoapply_protocols::{Page, PageError};

/// A page plus whatever keeps its backend connection alive.
pub(crate) struct OpenedPage {
    page: Arc<dyn Page>,
    _client: Option<CdpClient>,
}

impl OpenedPage {
    pub(crate) fn new(page: Arc<dyn Page>) -> Self {
        Self { page, _client: None }
    }

    /// Keep the browser connection open for as long as the page is used.
    pub(crate) fn keep_alive(mut self, client: CdpClient) -> Self {
        self._client = Some(client);
        self
    }

    pub(crate) fn page(&self) -> &dyn Page {
        self.page.as_ref()
    }
}

/// Opens the page an auto-apply request should run against.
#[async_trait]
pub(crate) trait PageSource: Send + Sync {
    /// `target` selects an existing tab, `url` opens a new one; with neither,
    /// the first open tab is used.
    async fn open(&self, target: Option<&str>, url: Option<&str>) -> Result<OpenedPage, PageError>;
}

/// Tabs of a Chrome instance running with remote debugging.
pub(crate) struct CdpPageSource {
    endpoint: String,
}

impl CdpPageSource {
    pub(crate) fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl PageSource for CdpPageSource {
    async fn open(&self, target: Option<&str>, url: Option<&str>) -> Result<OpenedPage, PageError> {
        let client = CdpClient::connect(&self.endpoint).await?;
        let session = client.open_page(target, url).await?;
        debug!("Opened tab {}", session.target_id());
        let page = CdpPage::attach(session).await?;

        Ok(OpenedPage::new(Arc::new(page)).keep_alive(client))
    }
}
