use super::*;
use crate::memory_page::MemoryPage;
use async_trait::async_trait;
use autoapply_protocols::{ApplyError, ApplyStatus, BoardId, FieldKind};
use std::sync::Arc;
use std::time::Duration;

const GREENHOUSE_PAGE: &str = r#"
    <div class="application-header"><a class="btn-primary">Apply</a></div>
    <form><input id="first_name"><input id="email"></form>
"#;

fn grace() -> Profile {
    Profile {
        first_name: Some("Grace".to_string()),
        email: Some("grace@example.com".to_string()),
        ..Default::default()
    }
}

fn fast_settings(max_passes: u32) -> PipelineSettings {
    PipelineSettings {
        waits: WaitConfig {
            element_timeout_ms: 50,
            apply_timeout_ms: 50,
        },
        max_passes,
    }
}

/// Adapter whose fill and click both raise.
struct BrokenAdapter;

#[async_trait]
impl BoardAdapter for BrokenAdapter {
    fn name(&self) -> &'static str {
        "broken"
    }

    async fn fill_form(&self, _ctx: &ApplyContext<'_>) -> Result<crate::FillOutcome, ApplyError> {
        Err(ApplyError::adapter("broken", "markup changed"))
    }

    async fn click_apply(&self, _ctx: &ApplyContext<'_>) -> Result<AdapterOutcome, ApplyError> {
        Err(ApplyError::adapter("broken", "button hidden"))
    }
}

#[test]
fn test_settings_from_config() {
    let mut config = Config::default();
    config.pipeline.max_passes = 3;
    config.waits.apply_timeout_ms = 750;

    let settings = PipelineSettings::from_config(&config);
    assert_eq!(settings.max_passes, 3);
    assert_eq!(settings.waits.apply_timeout(), Duration::from_millis(750));
    assert_eq!(PipelineSettings::default().max_passes, 1);
}

#[tokio::test]
async fn test_greenhouse_success() {
    let page = MemoryPage::with_html("boards.greenhouse.io", GREENHOUSE_PAGE);
    let bridge = AutoApplyBridge::new(fast_settings(1));

    let response = bridge.auto_apply(&page, &grace()).await;

    assert_eq!(response.status, ApplyStatus::Success);
    assert_eq!(response.job_board.as_deref(), Some("greenhouse"));
    let details = response.details.unwrap();
    assert_eq!(details.adapter.as_deref(), Some("greenhouse"));
    assert!(!details.fallback_used);
    assert_eq!(details.filled_fields, vec![FieldKind::FirstName, FieldKind::Email]);
    assert_eq!(details.clicked_apply, Some(true));
    assert_eq!(details.passes, 1);
    assert_eq!(page.click_count(".application-header .btn-primary"), 1);
}

#[tokio::test]
async fn test_unsupported_board() {
    let page = MemoryPage::with_html("example.com", GREENHOUSE_PAGE);
    let bridge = AutoApplyBridge::new(fast_settings(1));

    let response = bridge.auto_apply(&page, &grace()).await;

    assert_eq!(response.status, ApplyStatus::Error);
    assert_eq!(response.message.as_deref(), Some(UNSUPPORTED_BOARD));
    assert!(response.details.is_none());
    assert_eq!(page.interaction_count(), 0);
}

#[tokio::test]
async fn test_adapter_errors_fall_back_to_generic() {
    let mut adapters = AdapterRegistry::new();
    adapters.register(BoardId::Greenhouse, Arc::new(BrokenAdapter));
    let bridge = AutoApplyBridge::with_adapters(adapters, fast_settings(1));
    let page = MemoryPage::with_html("boards.greenhouse.io", GREENHOUSE_PAGE);

    let response = bridge.auto_apply(&page, &grace()).await;

    assert!(response.is_success());
    let details = response.details.unwrap();
    assert!(details.adapter_error.unwrap().contains("markup changed"));
    assert!(details.fallback_used);
    assert!(details.adapter_click_error.unwrap().contains("button hidden"));
    assert_eq!(details.clicked_apply, Some(true));
    assert_eq!(page.value("#first_name").as_deref(), Some("Grace"));
    assert_eq!(page.click_count(".application-header .btn-primary"), 1);
}

#[tokio::test]
async fn test_greenhouse_fallback_when_form_never_renders() {
    let page = MemoryPage::with_html(
        "boards.greenhouse.io",
        r#"<div class="application-header"><a class="btn-primary">Apply</a></div>"#,
    );
    let bridge = AutoApplyBridge::new(fast_settings(1));

    let response = bridge.auto_apply(&page, &grace()).await;

    // The generic filler succeeds even when every field is missing.
    assert!(response.is_success());
    let details = response.details.unwrap();
    assert!(!details.adapter_result.unwrap().success);
    assert!(details.fallback_used);
    assert_eq!(details.missing_fields, vec![FieldKind::FirstName, FieldKind::Email]);
}

#[tokio::test]
async fn test_generic_adapter_skips_fallback() {
    let page = MemoryPage::with_html(
        "jobs.lever.co",
        r#"<input name="name"><div class="postings-btn-wrapper"><a class="postings-btn">Apply</a></div>"#,
    );
    let bridge = AutoApplyBridge::new(fast_settings(1));

    let response = bridge.auto_apply(&page, &grace()).await;

    assert!(response.is_success());
    let details = response.details.unwrap();
    assert_eq!(details.adapter.as_deref(), Some("generic"));
    assert!(!details.fallback_used);
    assert_eq!(details.clicked_apply, Some(true));
}

#[tokio::test]
async fn test_second_pass_only_when_click_missed() {
    let page = MemoryPage::with_html("boards.greenhouse.io", r#"<input id="first_name">"#);
    let bridge = AutoApplyBridge::new(fast_settings(2));

    let response = bridge.auto_apply(&page, &grace()).await;

    assert!(response.is_success());
    let details = response.details.unwrap();
    assert_eq!(details.passes, 2);
    assert_eq!(details.clicked_apply, Some(false));

    let page = MemoryPage::with_html("boards.greenhouse.io", GREENHOUSE_PAGE);
    let response = bridge.auto_apply(&page, &grace()).await;
    assert_eq!(response.details.unwrap().passes, 1);
    assert_eq!(page.click_count(".application-header .btn-primary"), 1);
}

#[tokio::test]
async fn test_overlapping_invocation_rejected() {
    let settings = PipelineSettings {
        waits: WaitConfig {
            element_timeout_ms: 300,
            apply_timeout_ms: 50,
        },
        max_passes: 1,
    };
    let bridge = Arc::new(AutoApplyBridge::new(settings));
    let page = Arc::new(MemoryPage::new("boards.greenhouse.io"));

    let first = {
        let bridge = Arc::clone(&bridge);
        let page = Arc::clone(&page);
        tokio::spawn(async move { bridge.auto_apply(page.as_ref(), &grace()).await })
    };
    tokio::time::sleep(Duration::from_millis(30)).await;
    assert!(bridge.is_busy());

    let second = bridge.auto_apply(page.as_ref(), &grace()).await;
    assert_eq!(second.message.as_deref(), Some(ALREADY_RUNNING));

    let first = first.await.unwrap();
    assert_eq!(first.job_board.as_deref(), Some("greenhouse"));

    // The guard is released once the first invocation finishes.
    assert!(!bridge.is_busy());
    let third = bridge.auto_apply(page.as_ref(), &grace()).await;
    assert_ne!(third.message.as_deref(), Some(ALREADY_RUNNING));
}

#[tokio::test]
async fn test_handle_value_decodes_message() {
    let page = MemoryPage::with_html("boards.greenhouse.io", GREENHOUSE_PAGE);
    let bridge = AutoApplyBridge::new(fast_settings(1));

    let response = bridge
        .handle_value(
            &page,
            json!({
                "type": "AUTO_APPLY",
                "profile": { "firstName": "Grace", "email": "grace@example.com" }
            }),
        )
        .await;

    assert!(response.is_success());
    assert_eq!(page.value("#email").as_deref(), Some("grace@example.com"));
}

#[tokio::test]
async fn test_handle_value_rejects_unknown_type() {
    let page = MemoryPage::with_html("boards.greenhouse.io", GREENHOUSE_PAGE);
    let bridge = AutoApplyBridge::new(fast_settings(1));

    let response = bridge.handle_value(&page, json!({ "type": "OPEN_DASHBOARD" })).await;

    assert_eq!(response.message.as_deref(), Some(UNSUPPORTED_MESSAGE));
    assert_eq!(page.interaction_count(), 0);
}

#[tokio::test]
async fn test_fill_failure_stops_pipeline() {
    let page = MemoryPage::with_html(
        "boards.greenhouse.io",
        r#"
        <div class="application-header"><a class="btn-primary">Apply</a></div>
        <form><input id="first_name" data-value-fails><input id="email"></form>
        "#,
    );
    let bridge = AutoApplyBridge::new(fast_settings(3));

    let response = bridge.auto_apply(&page, &grace()).await;

    assert_eq!(response.status, ApplyStatus::Error);
    assert_eq!(response.job_board.as_deref(), Some("greenhouse"));
    assert_eq!(response.message.as_deref(), Some(FILL_FAILED));
    let details = response.details.unwrap();
    assert!(details.adapter_error.unwrap().contains("rejected"));
    assert!(details.fallback_used);
    assert!(details.file_result.is_none());
    assert_eq!(details.clicked_apply, None);
    assert_eq!(details.passes, 1);
    assert_eq!(page.click_count(".application-header .btn-primary"), 0);
}
