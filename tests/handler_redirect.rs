mod common;

use shortener::domain::entities::ShortRecord;
use shortener::domain::repositories::ShortRepository;

#[tokio::test]
async fn test_redirect_success() {
    let (state, repository) = common::create_test_state();
    repository
        .insert(ShortRecord::new(
            "c3xd4d1",
            "https",
            "github.com",
            Some("/soggycactus".to_string()),
            Some("tab=repositories".to_string()),
            None,
        ))
        .await
        .unwrap();

    let server = common::create_test_server(state);

    let response = server.get("/c3xd4d1").await;

    assert_eq!(response.status_code(), 301);
    assert_eq!(
        response.header("location"),
        "https://github.com/soggycactus?tab=repositories"
    );
    assert!(response.text().contains("Moved Permanently"));
}

#[tokio::test]
async fn test_redirect_escapes_body_link() {
    let (state, repository) = common::create_test_state();
    repository
        .insert(ShortRecord::new(
            "abc1234",
            "http",
            "lucastephens.com",
            None,
            Some("a=b&c=d".to_string()),
            None,
        ))
        .await
        .unwrap();

    let server = common::create_test_server(state);

    let response = server.get("/abc1234").await;

    assert_eq!(response.status_code(), 301);
    assert_eq!(response.header("location"), "http://lucastephens.com?a=b&c=d");
    assert!(response.text().contains("a=b&amp;c=d"));
}

#[tokio::test]
async fn test_redirect_not_found() {
    let (state, _repository) = common::create_test_state();
    let server = common::create_test_server(state);

    let response = server.get("/nonexistent").await;

    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_redirect_store_failure() {
    let server = common::create_failing_server();

    let response = server.get("/c3xd4d1").await;

    assert_eq!(response.status_code(), 500);
}

#[tokio::test]
async fn test_get_short_path_is_a_lookup() {
    let (state, repository) = common::create_test_state();
    let server = common::create_test_server(state);

    let response = server.get("/short").await;
    assert_eq!(response.status_code(), 404);

    repository
        .insert(ShortRecord::new("short", "http", "lucastephens.com", None, None, None))
        .await
        .unwrap();

    let response = server.get("/short").await;
    assert_eq!(response.status_code(), 301);
    assert_eq!(response.header("location"), "http://lucastephens.com");
}
