//! Greenhouse.
//!
//! Greenhouse renders its application form client-side, so the adapter waits
//! for the form before filling. Older hosted boards still use Rails-style
//! `job_application[...]` field names instead of ids; fields the primary
//! selectors miss are retried against those.

use async_trait::async_trait;
use tracing::debug;

use autoapply_protocols::{ApplyError, FieldKind};

use super::{ApplyContext, BoardAdapter, FillOutcome};
use crate::filler::{self, FillReport};
use crate::waiter::wait_for;

const LEGACY_FIELDS: [(FieldKind, &str); 4] = [
    (FieldKind::FirstName, "input[name='job_application[first_name]']"),
    (FieldKind::LastName, "input[name='job_application[last_name]']"),
    (FieldKind::Email, "input[name='job_application[email]']"),
    (FieldKind::Phone, "input[name='job_application[phone]']"),
];

fn legacy_selector(kind: FieldKind) -> Option<&'static str> {
    LEGACY_FIELDS
        .iter()
        .find(|(field, _)| *field == kind)
        .map(|(_, selector)| *selector)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GreenhouseAdapter;

impl GreenhouseAdapter {
    /// Wait until either markup generation of the form has rendered.
    async fn wait_for_form(&self, ctx: &ApplyContext<'_>) -> bool {
        let candidates: Vec<&str> = ctx
            .selectors
            .name_field
            .into_iter()
            .chain(legacy_selector(FieldKind::FirstName))
            .collect();

        let candidates = candidates.as_slice();
        wait_for(ctx.page.mutations(), ctx.waits.element_timeout(), move || async move {
            for selector in candidates {
                if let Ok(Some(_)) = ctx.page.query(selector).await {
                    return Some(());
                }
            }
            None
        })
        .await
        .is_some()
    }

    async fn fill_legacy(
        &self,
        ctx: &ApplyContext<'_>,
        fields: &[FieldKind],
    ) -> Result<FillReport, ApplyError> {
        let mut report = FillReport::default();
        for kind in fields {
            let (Some(selector), Some(value)) = (legacy_selector(*kind), ctx.profile.value(*kind)) else {
                continue;
            };
            let found = filler::fill_field(ctx.page, selector, value)
                .await
                .map_err(|e| {
                    ApplyError::adapter(self.name(), format!("legacy {:?} field: {}", kind, e))
                })?;
            if found {
                report.filled.push(*kind);
            } else {
                report.missing.push(*kind);
            }
        }
        Ok(report)
    }
}

#[async_trait]
impl BoardAdapter for GreenhouseAdapter {
    fn name(&self) -> &'static str {
        "greenhouse"
    }

    async fn fill_form(&self, ctx: &ApplyContext<'_>) -> Result<FillOutcome, ApplyError> {
        if !self.wait_for_form(ctx).await {
            debug!("Greenhouse form did not render within {:?}", ctx.waits.element_timeout());
            return Ok(FillOutcome::not_filled(FillReport::default()));
        }

        let mut report = filler::fill_form(ctx.page, ctx.profile, ctx.selectors).await?;
        if !report.is_complete() {
            let missing = report.missing.clone();
            let retry = self.fill_legacy(ctx, &missing).await?;
            debug!("Legacy selectors filled {} of {} missing field(s)", retry.filled.len(), missing.len());
            report.merge(retry);
        }

        Ok(FillOutcome::filled(report))
    }
}
