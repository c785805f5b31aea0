//! The `AUTO_APPLY` message handler.
//!
//! One invocation runs: detect board, adapter fill, generic fallback fill,
//! file upload, apply click. Stage failures never abort the pipeline; they are
//! recorded in [`ApplyDetails`] and the response status reflects whether the
//! form was filled.

use serde_json::json;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use autoapply_config::{Config, WaitConfig};
use autoapply_protocols::{
    AdapterOutcome, ApplyDetails, AutoApplyResponse, Page, Profile, RuntimeMessage,
};

use crate::adapters::{AdapterRegistry, ApplyContext, BoardAdapter};
use crate::{clicker, detector, filler};

pub const UNSUPPORTED_BOARD: &str = "Unsupported job board";
pub const UNSUPPORTED_MESSAGE: &str = "Unsupported message type";
pub const ALREADY_RUNNING: &str = "Auto-apply already in progress";
pub const FILL_FAILED: &str = "Failed to fill application form";

/// Timeouts and retry policy for the pipeline.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub waits: WaitConfig,
    /// Passes allowed per message; at least one always runs.
    pub max_passes: u32,
}

impl PipelineSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            waits: config.waits.clone(),
            max_passes: config.pipeline.max_passes,
        }
    }
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

#[derive(Debug, Clone, Copy)]
struct PassOutcome {
    filled: bool,
    clicked: bool,
}

/// Handles runtime messages against a page.
///
/// Only one auto-apply runs at a time; a message arriving while another is in
/// flight is rejected instead of racing it on the same document.
pub struct AutoApplyBridge {
    adapters: AdapterRegistry,
    settings: PipelineSettings,
    in_flight: Mutex<()>,
}

impl AutoApplyBridge {
    pub fn new(settings: PipelineSettings) -> Self {
        Self::with_adapters(AdapterRegistry::with_defaults(), settings)
    }

    pub fn with_adapters(adapters: AdapterRegistry, settings: PipelineSettings) -> Self {
        Self {
            adapters,
            settings,
            in_flight: Mutex::new(()),
        }
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    pub fn adapters(&self) -> &AdapterRegistry {
        &self.adapters
    }

    /// Whether an auto-apply is currently running.
    ///
    /// A `false` answer is advisory; [`auto_apply`](Self::auto_apply) still
    /// takes the guard itself.
    pub fn is_busy(&self) -> bool {
        self.in_flight.try_lock().is_err()
    }

    /// Decode and handle a raw JSON message.
    pub async fn handle_value(&self, page: &dyn Page, message: serde_json::Value) -> AutoApplyResponse {
        match serde_json::from_value::<RuntimeMessage>(message) {
            Ok(message) => self.handle(page, message).await,
            Err(e) => {
                debug!("Rejected runtime message: {}", e);
                AutoApplyResponse::error(UNSUPPORTED_MESSAGE)
            }
        }
    }

    pub async fn handle(&self, page: &dyn Page, message: RuntimeMessage) -> AutoApplyResponse {
        match message {
            RuntimeMessage::AutoApply { profile } => self.auto_apply(page, &profile).await,
        }
    }

    /// Run the auto-apply pipeline on `page`.
    pub async fn auto_apply(&self, page: &dyn Page, profile: &Profile) -> AutoApplyResponse {
        let Ok(_guard) = self.in_flight.try_lock() else {
            warn!("Auto-apply requested while another is running");
            return AutoApplyResponse::error(ALREADY_RUNNING);
        };

        let board = match detector::detect_page(page).await {
            Ok(Some(board)) => board,
            Ok(None) => return AutoApplyResponse::error(UNSUPPORTED_BOARD),
            Err(e) => {
                warn!("Could not read page location: {}", e);
                return AutoApplyResponse::error(format!("Could not read page location: {}", e));
            }
        };

        let adapter = self.adapters.get(board);
        let ctx = ApplyContext::new(page, board, profile, &self.settings.waits);
        let mut details = ApplyDetails {
            adapter: Some(adapter.name().to_string()),
            ..Default::default()
        };
        info!("Auto-applying on {} with the {} adapter", board, adapter.name());

        let max_passes = self.settings.max_passes.max(1);
        let mut filled = false;
        for pass in 1..=max_passes {
            details.passes = pass;
            let outcome = self.run_pass(adapter.as_ref(), &ctx, &mut details).await;
            filled |= outcome.filled;

            if !outcome.filled || outcome.clicked {
                break;
            }
            if pass < max_passes {
                debug!("Apply button not clicked on pass {}, retrying", pass);
            }
        }

        if filled {
            info!(
                "Auto-apply on {} filled {} field(s), clicked apply: {}",
                board,
                details.filled_fields.len(),
                details.clicked_apply.unwrap_or(false)
            );
            AutoApplyResponse::success(board.as_str(), details)
        } else {
            warn!("Auto-apply on {} could not fill the form", board);
            AutoApplyResponse::failed(board.as_str(), FILL_FAILED, details)
        }
    }

    async fn run_pass(
        &self,
        adapter: &dyn BoardAdapter,
        ctx: &ApplyContext<'_>,
        details: &mut ApplyDetails,
    ) -> PassOutcome {
        let mut filled = match adapter.fill_form(ctx).await {
            Ok(fill) => {
                details.adapter_result = Some(fill.to_adapter_outcome());
                details.filled_fields = fill.report.filled;
                details.missing_fields = fill.report.missing;
                fill.success
            }
            Err(e) => {
                warn!("Adapter {} fill failed: {}", adapter.name(), e);
                details.adapter_error = Some(e.to_string());
                false
            }
        };

        if !filled && !adapter.is_generic() {
            details.fallback_used = true;
            filled = self.generic_fill(ctx, details).await;
        }

        if !filled {
            return PassOutcome {
                filled: false,
                clicked: false,
            };
        }

        let file_result = match adapter.handle_file_upload(ctx).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Adapter {} upload failed: {}", adapter.name(), e);
                AdapterOutcome::failure().with_details(json!({ "error": e.to_string() }))
            }
        };
        details.file_result = Some(file_result);

        let clicked = match adapter.click_apply(ctx).await {
            Ok(outcome) => outcome.success,
            Err(e) => {
                warn!("Adapter {} click failed: {}", adapter.name(), e);
                details.adapter_click_error = Some(e.to_string());
                clicker::click_apply_if_possible(ctx.page, ctx.selectors, self.settings.waits.apply_timeout())
                    .await
            }
        };
        details.clicked_apply = Some(clicked);

        PassOutcome { filled, clicked }
    }

    async fn generic_fill(&self, ctx: &ApplyContext<'_>, details: &mut ApplyDetails) -> bool {
        debug!("Falling back to generic fill on {}", ctx.board);
        match filler::fill_form(ctx.page, ctx.profile, ctx.selectors).await {
            Ok(report) => {
                details.filled_fields = report.filled;
                details.missing_fields = report.missing;
                true
            }
            Err(e) => {
                warn!("Generic fill on {} failed: {}", ctx.board, e);
                false
            }
        }
    }
}

#[cfg(test)]
#[path = "bridge_tests.rs"]
mod tests;
