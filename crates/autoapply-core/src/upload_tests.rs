use super::*;
use crate::memory_page::MemoryPage;
use autoapply_protocols::BoardId;
use std::io::Write;

fn greenhouse() -> &'static BoardSelectors {
    crate::registry::selectors(BoardId::Greenhouse)
}

#[tokio::test]
async fn test_attaches_local_resume() {
    let mut resume = tempfile::NamedTempFile::new().unwrap();
    writeln!(resume, "%PDF-1.4").unwrap();

    let page = MemoryPage::with_html(
        "boards.greenhouse.io",
        r#"<input id="resume" type="file"><input id="cover_letter" type="file">"#,
    );
    let profile = Profile {
        resume: Some(resume.path().display().to_string()),
        ..Default::default()
    };

    let outcome = handle_file_uploads(&page, &profile, greenhouse()).await;

    assert!(outcome.success);
    assert_eq!(page.files("#resume"), vec![resume.path().to_path_buf()]);
    let details = outcome.details.unwrap();
    assert_eq!(details["attached"], json!(["resume"]));
}

#[tokio::test]
async fn test_skips_urls_and_text() {
    let page = MemoryPage::with_html(
        "boards.greenhouse.io",
        r#"<input id="resume" type="file"><input id="cover_letter" type="file">"#,
    );
    let profile = Profile {
        resume: Some("https://cdn.example.com/resume.pdf".to_string()),
        cover_letter: Some("Dear hiring manager,".to_string()),
        ..Default::default()
    };

    let outcome = handle_file_uploads(&page, &profile, greenhouse()).await;

    assert!(outcome.success);
    assert_eq!(page.interaction_count(), 0);
    let details = outcome.details.unwrap();
    assert_eq!(details["skipped"].as_array().unwrap().len(), 2);
    assert_eq!(details["skipped"][0]["reason"], "not a local file");
}

#[tokio::test]
async fn test_directory_is_not_a_local_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let page = MemoryPage::with_html("boards.greenhouse.io", r#"<input id="resume" type="file">"#);
    let profile = Profile {
        resume: Some(dir.path().display().to_string()),
        ..Default::default()
    };

    let outcome = handle_file_uploads(&page, &profile, greenhouse()).await;

    assert!(outcome.success);
    assert!(page.files("#resume").is_empty());
    let details = outcome.details.unwrap();
    assert_eq!(details["skipped"][0]["reason"], "not a local file");
    assert!(local_file(&dir.path().display().to_string()).await.is_none());
}

#[tokio::test]
async fn test_non_file_input_fails() {
    let resume = tempfile::NamedTempFile::new().unwrap();
    let page = MemoryPage::with_html("boards.greenhouse.io", r#"<input id="resume" type="text">"#);
    let profile = Profile {
        resume: Some(resume.path().display().to_string()),
        ..Default::default()
    };

    let outcome = handle_file_uploads(&page, &profile, greenhouse()).await;

    assert!(!outcome.success);
    assert_eq!(outcome.details.unwrap()["failed"][0]["field"], "resume");
}

#[tokio::test]
async fn test_nothing_to_upload() {
    let page = MemoryPage::new("boards.greenhouse.io");
    let outcome = handle_file_uploads(&page, &Profile::default(), greenhouse()).await;

    assert!(outcome.success);
    assert_eq!(outcome.details.unwrap()["attached"], json!([]));
}
