//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full discover-then-verify cycle end-to-end.

use recipe_scout::config::{Config, CrawlOptions, UserAgentConfig};
use recipe_scout::output::{CsvExporter, RecipeListExporter, ResultExporter};
use recipe_scout::{crawl, Crawler, PageResult};
use tempfile::TempDir;
use wiremock::matchers::{header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Crawl options suited to a local mock server
fn test_options() -> CrawlOptions {
    CrawlOptions {
        max_pages: 20,
        max_candidates: 20,
        delay_seconds: 0.0,
        timeout_seconds: 5,
        ..CrawlOptions::default()
    }
}

fn html_page(title: &str, head: &str, body: &str) -> String {
    format!(
        "<html><head><title>{}</title>{}</head><body>{}</body></html>",
        title, head, body
    )
}

async fn mount_html(server: &MockServer, route: &str, html: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(html, "text/html"))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_discovers_and_verifies_recipe() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_html(
        &server,
        "/",
        html_page(
            "Home",
            "",
            r#"<a href="/recipes/pasta">Pasta</a> <a href="/about">About</a>"#,
        ),
    )
    .await;
    mount_html(
        &server,
        "/recipes/pasta",
        html_page(
            "Pasta",
            r#"<script type="application/ld+json">{"@context":"https://schema.org","@type":"Recipe","name":"Pasta"}</script>"#,
            "<h1>Pasta</h1>",
        ),
    )
    .await;
    mount_html(&server, "/about", html_page("About", "", "<p>Hi</p>")).await;

    let results = crawl(&base, test_options()).await.unwrap();

    assert_eq!(results.len(), 1);
    let pasta = &results[0];
    assert_eq!(pasta.url, format!("{}/recipes/pasta", base));
    assert_eq!(pasta.source_page, Some(format!("{}/", base)));
    assert!(pasta.is_candidate);
    assert!(pasta.is_recipe);
    assert_eq!(pasta.title.as_deref(), Some("Pasta"));
    assert_eq!(pasta.http_status, Some(200));
    assert!(pasta.error.is_none());
}

#[tokio::test]
async fn test_microdata_recipe_and_non_recipe_candidate() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_html(
        &server,
        "/",
        html_page(
            "Home",
            "",
            r#"<a href="/recipe/stew">Stew</a> <a href="/recipes">All recipes</a>"#,
        ),
    )
    .await;
    mount_html(
        &server,
        "/recipe/stew",
        html_page(
            "Stew",
            "",
            r#"<div itemscope itemtype="http://schema.org/Recipe"><h1>Stew</h1></div>"#,
        ),
    )
    .await;
    mount_html(&server, "/recipes", html_page("Recipe index", "", "")).await;

    let results = crawl(&base, test_options()).await.unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].url, format!("{}/recipe/stew", base));
    assert!(results[0].is_recipe);
    assert_eq!(results[1].url, format!("{}/recipes", base));
    assert!(results[1].is_candidate);
    assert!(!results[1].is_recipe);
    assert_eq!(results[1].title.as_deref(), Some("Recipe index"));
}

#[tokio::test]
async fn test_non_ascii_recipe_links() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_html(
        &server,
        "/",
        html_page(
            "Inicio",
            "",
            r#"<a href="/recetas/ñoquis">Ñoquis</a> <a href="/レシピ/カレー">カレー</a> <a href="/recipes/ñoquis">Gnocchi</a>"#,
        ),
    )
    .await;
    mount_html(
        &server,
        "/recipes/%C3%B1oquis",
        html_page(
            "Ñoquis",
            r#"<script type="application/ld+json">{"@type":"Recipe","name":"Ñoquis"}</script>"#,
            "",
        ),
    )
    .await;
    mount_html(&server, "/recetas/%C3%B1oquis", html_page("Ñoquis", "", "")).await;

    let results = crawl(&base, test_options()).await.unwrap();

    // The unmounted /レシピ/カレー page answers 404 and is recorded first
    assert_eq!(results.len(), 2);
    assert_eq!(
        results[0].url,
        format!(
            "{}/%E3%83%AC%E3%82%B7%E3%83%94/%E3%82%AB%E3%83%AC%E3%83%BC",
            base
        )
    );
    assert_eq!(results[0].http_status, Some(404));
    assert_eq!(results[1].url, format!("{}/recipes/%C3%B1oquis", base));
    assert!(results[1].is_recipe);
    assert_eq!(results[1].title.as_deref(), Some("Ñoquis"));
}

#[tokio::test]
async fn test_discovery_failure_recorded() {
    let server = MockServer::start().await;
    let base = server.uri();

    // Unmatched requests get a 404 from wiremock
    mount_html(
        &server,
        "/",
        html_page("Home", "", r#"<a href="/missing">Missing</a>"#),
    )
    .await;

    let results = crawl(&base, test_options()).await.unwrap();

    assert_eq!(results.len(), 1);
    let missing = &results[0];
    assert_eq!(missing.url, format!("{}/missing", base));
    assert!(!missing.is_candidate);
    assert!(!missing.is_recipe);
    assert_eq!(missing.http_status, Some(404));
    assert_eq!(missing.error.as_deref(), Some("HTTP 404"));
    assert!(missing.source_page.is_none());
}

#[tokio::test]
async fn test_non_html_response_recorded() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_html(
        &server,
        "/",
        html_page("Home", "", r#"<a href="/feed.json">Feed</a>"#),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/feed.json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"{"items":[]}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let results = crawl(&base, test_options()).await.unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].http_status, Some(200));
    assert!(results[0]
        .error
        .as_deref()
        .unwrap()
        .starts_with("Unsupported content type"));
}

#[tokio::test]
async fn test_failed_verification_recorded_on_candidate() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_html(
        &server,
        "/",
        html_page("Home", "", r#"<a href="/recipes/broken">Broken</a>"#),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/recipes/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let options = CrawlOptions {
        max_pages: 1,
        ..test_options()
    };
    let results = crawl(&base, options).await.unwrap();

    assert_eq!(results.len(), 1);
    assert!(results[0].is_candidate);
    assert!(!results[0].is_recipe);
    assert_eq!(results[0].http_status, Some(500));
    assert_eq!(results[0].error.as_deref(), Some("HTTP 500"));
}

#[tokio::test]
async fn test_max_pages_limits_requests() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_html(
        &server,
        "/",
        html_page(
            "Home",
            "",
            r#"<a href="/a">A</a> <a href="/b">B</a> <a href="/recipes/x">X</a>"#,
        ),
    )
    .await;

    let options = CrawlOptions {
        max_pages: 1,
        verify_recipes: false,
        ..test_options()
    };
    let results = crawl(&base, options).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.path(), "/");

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].url, format!("{}/recipes/x", base));
    assert!(results[0].http_status.is_none());
    assert!(!results[0].is_recipe);
}

#[tokio::test]
async fn test_external_links_ignored_in_same_domain_mode() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_html(
        &server,
        "/",
        html_page(
            "Home",
            "",
            r#"<a href="http://recipes.invalid/recipe/1">Elsewhere</a>"#,
        ),
    )
    .await;

    let results = crawl(&base, test_options()).await.unwrap();

    assert!(results.is_empty());
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_sends_configured_user_agent() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header_regex("user-agent", r"^TestBot/9\.9 \(\+"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(
                html_page("Home", "", r#"<a href="/recipe/1">One</a>"#),
                "text/html",
            ),
        )
        .mount(&server)
        .await;

    let config = Config {
        crawler: CrawlOptions {
            verify_recipes: false,
            ..test_options()
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "9.9".to_string(),
            contact_url: "https://example.com/contact".to_string(),
            contact_email: "test@example.com".to_string(),
        },
    };

    let crawler = Crawler::from_config(&config).unwrap();
    let results = crawler.crawl(&base).await.unwrap();

    // A user-agent mismatch would surface as a 404 discovery failure instead
    assert_eq!(results.len(), 1);
    assert!(results[0].is_candidate);
}

#[tokio::test]
async fn test_exports_written_to_files() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_html(
        &server,
        "/",
        html_page(
            "Home",
            "",
            r#"<a href="/recipes/soup">Soup</a> <a href="/gone">Gone</a>"#,
        ),
    )
    .await;
    mount_html(
        &server,
        "/recipes/soup",
        html_page(
            "Soup, Hot",
            r#"<script type="application/ld+json">{"@type":"Recipe"}</script>"#,
            "",
        ),
    )
    .await;

    let results: Vec<PageResult> = crawl(&base, test_options()).await.unwrap();
    assert_eq!(results.len(), 2);

    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("results.csv");
    let txt_path = dir.path().join("recipes.txt");

    CsvExporter.export_to_file(&results, &csv_path).unwrap();
    RecipeListExporter.export_to_file(&results, &txt_path).unwrap();

    let csv = std::fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<_> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        "url,source_page,is_candidate,is_recipe,title,http_status,error"
    );
    assert_eq!(lines[1], format!("{}/gone,,false,false,,404,HTTP 404", base));
    assert_eq!(
        lines[2],
        format!(
            "{}/recipes/soup,{}/,true,true,\"Soup, Hot\",200,",
            base, base
        )
    );

    let txt = std::fs::read_to_string(&txt_path).unwrap();
    assert_eq!(txt, format!("{}/recipes/soup", base));
}

#[tokio::test]
async fn test_invalid_start_url_is_an_error() {
    assert!(crawl("ftp://example.com/", test_options()).await.is_err());
}
