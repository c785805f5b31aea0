//! Board adapters.
//!
//! Every board goes through the same three capabilities: fill the form,
//! attach documents, click apply. [`BoardAdapter`]'s default methods run the
//! generic behavior, so an adapter only overrides what its board does
//! differently. Boards without a dedicated adapter get [`GenericAdapter`].

mod generic;
mod greenhouse;

pub use generic::GenericAdapter;
pub use greenhouse::GreenhouseAdapter;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use autoapply_config::WaitConfig;
use autoapply_protocols::{AdapterOutcome, ApplyError, BoardId, BoardSelectors, Page, Profile};

use crate::filler::{self, FillReport};
use crate::{clicker, registry, upload};

/// Everything an adapter needs for one pipeline pass.
#[derive(Clone, Copy)]
pub struct ApplyContext<'a> {
    pub page: &'a dyn Page,
    pub board: BoardId,
    pub selectors: &'static BoardSelectors,
    pub profile: &'a Profile,
    pub waits: &'a WaitConfig,
}

impl<'a> ApplyContext<'a> {
    pub fn new(page: &'a dyn Page, board: BoardId, profile: &'a Profile, waits: &'a WaitConfig) -> Self {
        Self {
            page,
            board,
            selectors: registry::selectors(board),
            profile,
            waits,
        }
    }
}

/// Result of a form fill.
#[derive(Debug, Clone, PartialEq)]
pub struct FillOutcome {
    pub success: bool,
    pub report: FillReport,
}

impl FillOutcome {
    pub fn filled(report: FillReport) -> Self {
        Self { success: true, report }
    }

    pub fn not_filled(report: FillReport) -> Self {
        Self { success: false, report }
    }

    pub fn to_adapter_outcome(&self) -> AdapterOutcome {
        let outcome = if self.success {
            AdapterOutcome::success()
        } else {
            AdapterOutcome::failure()
        };
        outcome.with_details(json!({
            "filled": self.report.filled,
            "missing": self.report.missing,
        }))
    }
}

/// Board-specific fill, upload and click behavior.
#[async_trait]
pub trait BoardAdapter: Send + Sync {
    /// Name recorded in response details.
    fn name(&self) -> &'static str;

    /// Whether this adapter is the generic path itself.
    ///
    /// The bridge skips the generic fallback fill for generic adapters, since
    /// it would only repeat the same work.
    fn is_generic(&self) -> bool {
        false
    }

    async fn fill_form(&self, ctx: &ApplyContext<'_>) -> Result<FillOutcome, ApplyError> {
        let report = filler::fill_form(ctx.page, ctx.profile, ctx.selectors).await?;
        Ok(FillOutcome::filled(report))
    }

    async fn handle_file_upload(&self, ctx: &ApplyContext<'_>) -> Result<AdapterOutcome, ApplyError> {
        Ok(upload::handle_file_uploads(ctx.page, ctx.profile, ctx.selectors).await)
    }

    async fn click_apply(&self, ctx: &ApplyContext<'_>) -> Result<AdapterOutcome, ApplyError> {
        let clicked =
            clicker::click_apply_if_possible(ctx.page, ctx.selectors, ctx.waits.apply_timeout()).await;
        Ok(if clicked {
            AdapterOutcome::success()
        } else {
            AdapterOutcome::failure()
        })
    }
}

/// Adapter lookup by board.
pub struct AdapterRegistry {
    adapters: HashMap<BoardId, Arc<dyn BoardAdapter>>,
    generic: Arc<dyn BoardAdapter>,
}

impl AdapterRegistry {
    /// A registry where every board uses the generic adapter.
    pub fn new() -> Self {
        Self {
            adapters: HashMap::new(),
            generic: Arc::new(GenericAdapter),
        }
    }

    /// A registry with every built-in adapter registered.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(BoardId::Greenhouse, Arc::new(GreenhouseAdapter));
        registry
    }

    /// Register an adapter for a board, replacing any existing one.
    pub fn register(&mut self, board: BoardId, adapter: Arc<dyn BoardAdapter>) {
        self.adapters.insert(board, adapter);
    }

    /// The adapter for `board`, or the generic adapter.
    pub fn get(&self, board: BoardId) -> Arc<dyn BoardAdapter> {
        self.adapters
            .get(&board)
            .cloned()
            .unwrap_or_else(|| Arc::clone(&self.generic))
    }
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
#[path = "adapters_tests.rs"]
mod tests;
