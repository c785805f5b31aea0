use super::*;
use crate::memory_page::MemoryPage;

#[test]
fn test_detect_greenhouse() {
    assert_eq!(
        detect_job_board("boards.greenhouse.io"),
        Some(BoardId::Greenhouse)
    );
}

#[test]
fn test_detect_each_board() {
    let hosts = [
        ("job-boards.greenhouse.io", BoardId::Greenhouse),
        ("jobs.lever.co", BoardId::Lever),
        ("acme.wd5.myworkdayjobs.com", BoardId::Workday),
        ("jobs.smartrecruiters.com", BoardId::SmartRecruiters),
        ("careers-acme.icims.com", BoardId::Icims),
        ("acme.bamboohr.com", BoardId::BambooHr),
        ("jobs.jobvite.com", BoardId::Jobvite),
        ("acme.taleo.net", BoardId::Taleo),
    ];
    for (host, expected) in hosts {
        assert_eq!(detect_job_board(host), Some(expected), "host {}", host);
    }
}

#[test]
fn test_detect_unknown_host() {
    assert_eq!(detect_job_board("example.com"), None);
    assert_eq!(detect_job_board(""), None);
    assert_eq!(detect_job_board("linkedin.com"), None);
}

#[test]
fn test_detect_is_case_insensitive() {
    assert_eq!(detect_job_board("Jobs.Lever.CO"), Some(BoardId::Lever));
}

#[test]
fn test_detect_first_match_wins() {
    // Both fragments present: greenhouse is checked before lever.
    assert_eq!(
        detect_job_board("lever.greenhouse.example"),
        Some(BoardId::Greenhouse)
    );
}

#[test]
fn test_detect_from_url() {
    assert_eq!(
        detect_from_url("https://boards.greenhouse.io/acme/jobs/123"),
        Some(BoardId::Greenhouse)
    );
    assert_eq!(detect_from_url("https://example.com/greenhouse"), None);
    assert_eq!(detect_from_url("not a url"), None);
}

#[tokio::test]
async fn test_detect_page() {
    let page = MemoryPage::new("jobs.lever.co");
    assert_eq!(detect_page(&page).await.unwrap(), Some(BoardId::Lever));

    let page = MemoryPage::new("example.com");
    assert_eq!(detect_page(&page).await.unwrap(), None);
}
