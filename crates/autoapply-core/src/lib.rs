//! # AutoApply Core
//!
//! The auto-apply engine. Given a [`Page`](autoapply_protocols::Page) and a
//! [`Profile`](autoapply_protocols::Profile), it:
//!
//! 1. detects which job board the page belongs to ([`detector`]),
//! 2. fills the form through the board's adapter, falling back to the
//!    generic filler ([`adapters`], [`filler`]),
//! 3. attaches resume and cover-letter files ([`upload`]),
//! 4. waits for and clicks the apply button ([`waiter`], [`clicker`]).
//!
//! [`bridge::AutoApplyBridge`] runs these stages for one `AUTO_APPLY`
//! message and reports a structured response.

pub mod adapters;
pub mod bridge;
pub mod clicker;
pub mod detector;
pub mod filler;
pub mod memory_page;
pub mod profile_store;
pub mod registry;
pub mod upload;
pub mod waiter;

pub use adapters::{AdapterRegistry, ApplyContext, BoardAdapter, FillOutcome};
pub use bridge::{AutoApplyBridge, PipelineSettings};
pub use detector::{detect_from_url, detect_job_board};
pub use filler::FillReport;
pub use memory_page::MemoryPage;
pub use profile_store::{FallbackProfileStore, FileProfileStore};
