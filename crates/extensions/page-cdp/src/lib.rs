//! # AutoApply CDP page
//!
//! Drives a Chrome/Chromium tab as an auto-apply [`Page`](autoapply_protocols::Page)
//! over the Chrome DevTools Protocol.
//!
//! 1. Start Chrome with remote debugging:
//!    ```bash
//!    chrome --remote-debugging-port=9222
//!    ```
//!
//! 2. Attach to a tab and hand it to the engine:
//!    ```rust,ignore
//!    let client = CdpClient::connect("http://localhost:9222").await?;
//!    let session = client.open_page(None, Some("https://boards.greenhouse.io/acme/jobs/1")).await?;
//!    let page = CdpPage::attach(session).await?;
//!    ```

mod client;
mod error;
mod page;
mod protocol;
mod session;

pub use client::CdpClient;
pub use error::CdpError;
pub use page::CdpPage;
pub use protocol::*;
pub use session::PageSession;
