use news_hub::{ArticleSource, FixedArticleSource, NewsApiConfig, NewsApiSource, NewsHubError, RawArticle};
use serde_json::json;
use std::io::Write;
use std::sync::Once;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

static INIT: Once = Once::new();

fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

fn source_for(server: &MockServer) -> NewsApiSource {
    let config = NewsApiConfig::default()
        .with_base_url(&server.uri())
        .with_api_key(Some("test-key".to_string()));
    NewsApiSource::new(config).unwrap()
}

#[tokio::test]
async fn test_newsapi_ok_response() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/everything"))
        .and(query_param("q", "quantum computing"))
        .and(query_param("sortBy", "publishedAt"))
        .and(query_param("language", "en"))
        .and(query_param("pageSize", "2"))
        .and(query_param("apiKey", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "totalResults": 2,
            "articles": [
                {
                    "source": {"id": null, "name": "Lab Times"},
                    "title": "Qubits hold steady",
                    "description": "Error rates fall",
                    "url": "https://labtimes.example/qubits",
                    "publishedAt": "2024-05-01T10:00:00Z",
                    "content": "Researchers reported..."
                },
                {
                    "source": {"id": null, "name": null},
                    "title": "Second story",
                    "description": "Only a description",
                    "url": "https://example.com/second",
                    "publishedAt": "2024-05-01T09:00:00Z",
                    "content": null
                }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let articles = source_for(&server).fetch("quantum computing", 2).await.unwrap();

    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0].title, "Qubits hold steady");
    assert_eq!(articles[0].source, "Lab Times");
    assert_eq!(articles[0].content, "Researchers reported...");
    assert_eq!(articles[1].source, "Unknown");
    assert_eq!(articles[1].content, "Only a description");
}

#[tokio::test]
async fn test_newsapi_error_status_is_a_failure() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/everything"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "error",
            "code": "rateLimited",
            "message": "You have made too many requests recently."
        })))
        .mount(&server)
        .await;

    let source = source_for(&server);
    let err = source.fetch("ai", 5).await.unwrap_err();
    assert!(err.to_string().contains("too many requests"), "got: {}", err);

    // The pipeline-facing wrapper absorbs it
    assert!(source.fetch_or_empty("ai", 5).await.is_empty());
}

#[tokio::test]
async fn test_newsapi_http_failure_maps_to_api_error() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/everything"))
        .respond_with(ResponseTemplate::new(401).set_body_string("apiKeyInvalid"))
        .mount(&server)
        .await;

    match source_for(&server).fetch("ai", 5).await {
        Err(NewsHubError::Api { status, message }) => {
            assert_eq!(status, 401);
            assert_eq!(message, "apiKeyInvalid");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_newsapi_malformed_body_is_a_parse_error() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/everything"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let result = source_for(&server).fetch("ai", 5).await;
    assert!(matches!(result, Err(NewsHubError::Parse(_))));
}

#[tokio::test]
async fn test_newsapi_skips_malformed_entries() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/everything"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "articles": [
                "not an object",
                {"title": 42},
                {"title": "Survivor", "source": {"name": "Wire"}}
            ]
        })))
        .mount(&server)
        .await;

    let articles = source_for(&server).fetch("ai", 5).await.unwrap();
    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].title, "Survivor");
    assert_eq!(articles[0].content, "");
}

#[tokio::test]
async fn test_newsapi_without_key_never_calls_provider() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let source = NewsApiSource::new(NewsApiConfig::default().with_base_url(&server.uri())).unwrap();
    assert!(matches!(
        source.fetch("ai", 5).await,
        Err(NewsHubError::MissingCredential(_))
    ));
}

#[tokio::test]
async fn test_fixed_source_loads_json_file() {
    init_tracing();

    let articles = vec![
        RawArticle {
            title: "From disk".to_string(),
            description: "Saved earlier".to_string(),
            source: "Archive".to_string(),
            url: "https://example.com/disk".to_string(),
            published_at: "2024-01-01T00:00:00Z".to_string(),
            content: "Body".to_string(),
        };
        3
    ];

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(serde_json::to_string(&articles).unwrap().as_bytes())
        .unwrap();

    let source = FixedArticleSource::from_json_file(file.path()).unwrap();
    let fetched = source.fetch("ignored", 2).await.unwrap();

    assert_eq!(fetched.len(), 2);
    assert_eq!(fetched[0], articles[0]);
}
