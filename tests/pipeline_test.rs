use scraper::{Html, Selector};
use serde_json::json;
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use wap_paper_pages::error::{ApiError, IndexError, LlmError};
use wap_paper_pages::{App, AppError, Config, MergeOutcome, RunMode};

const ISSUE_NUMBER: u64 = 7;

const INDEX_HTML: &str = r#"<!doctype html>
<html>
<head><title>WAP</title></head>
<body>
  <div id="paper-list">
    <a class="paper-card" href="/older-paper"><h3>Older</h3></a>
  </div>
</body>
</html>
"#;

const ATOM_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title type="html">ArXiv Query</title>
  <id>http://arxiv.org/api/query-id</id>
  <entry>
    <id>http://arxiv.org/abs/2301.00001v1</id>
    <published>2023-01-01T08:00:00Z</published>
    <title>Example  Paper:
      A Study</title>
    <summary>We study examples.</summary>
    <author><name>Ada Lovelace</name></author>
  </entry>
</feed>
"#;

const SUMMARY_REPLY: &str = "hs_en: Robots learn from examples.\n\
grad_en: An example-driven objective.\n\
hs_zh: 机器人从例子中学习。\n\
grad_zh: 以样例驱动的目标函数。";

fn issue_body(query: &str) -> String {
    format!(
        "### Paper query\n\n{}\n\n### Slug (optional)\n\n_No response_\n\n### Notes (optional)\n\n_No response_",
        query
    )
}

fn completion(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "created": 1,
        "model": "gpt-4o-mini",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

fn test_config(server: &MockServer) -> Config {
    Config {
        github_api_base: server.uri(),
        github_repository: "owner/site".to_string(),
        github_token: "test-token".to_string(),
        arxiv_api_base: format!("{}/api/query", server.uri()),
        arxiv_pdf_base: format!("{}/pdf", server.uri()),
        llm_api_key: "sk-test".to_string(),
        llm_api_base_url: format!("{}/v1", server.uri()),
        ..Config::default()
    }
}

async fn mount_issue(server: &MockServer, query: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/repos/owner/site/issues/{}", ISSUE_NUMBER)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "title": "Add paper",
            "body": issue_body(query),
        })))
        .mount(server)
        .await;
}

async fn mount_arxiv(server: &MockServer, arxiv_id: &str) {
    Mock::given(method("GET"))
        .and(path("/api/query"))
        .and(query_param("id_list", arxiv_id))
        .respond_with(ResponseTemplate::new(200).set_body_string(ATOM_FEED))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/pdf/{}.pdf", arxiv_id)))
        .respond_with(ResponseTemplate::new(404))
        .mount(server)
        .await;
}

async fn mount_llm(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_string_contains("hs_en"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(SUMMARY_REPLY)))
        .with_priority(1)
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion("<!doctype html><html><body>page</body></html>")),
        )
        .mount(server)
        .await;
}

async fn site_repo(index_html: &str) -> (TempDir, RunMode) {
    let repo = tempfile::tempdir().unwrap();
    tokio::fs::write(repo.path().join("index.html"), index_html)
        .await
        .unwrap();
    let prompt_file = repo.path().join("prompt.md");
    tokio::fs::write(&prompt_file, "Follow the paper's own structure.")
        .await
        .unwrap();
    let mode = RunMode::Generate {
        repo_path: repo.path().to_path_buf(),
        prompt_file,
    };
    (repo, mode)
}

fn card_hrefs(repo: &Path) -> Vec<String> {
    let html = std::fs::read_to_string(repo.join("index.html")).unwrap();
    let doc = Html::parse_document(&html);
    let selector = Selector::parse("#paper-list > a.paper-card").unwrap();
    doc.select(&selector)
        .filter_map(|a| a.value().attr("href").map(str::to_string))
        .collect()
}

#[tokio::test]
async fn test_generates_four_pages_and_front_card() {
    let server = MockServer::start().await;
    mount_issue(&server, "2301.00001: Example Paper").await;
    mount_arxiv(&server, "2301.00001").await;
    mount_llm(&server).await;
    let (repo, mode) = site_repo(INDEX_HTML).await;

    let outcome = App::new(test_config(&server))
        .run(ISSUE_NUMBER, mode)
        .await
        .unwrap();

    assert_eq!(outcome.slug.as_str(), "example-paper-a-study");
    assert_eq!(outcome.pages_written, 4);
    assert_eq!(outcome.index_outcome, Some(MergeOutcome::Inserted));
    assert_eq!(
        outcome.confirmation(),
        "Generated pages for example-paper-a-study"
    );

    let paper_dir = repo.path().join("papers/example-paper-a-study");
    for file in [
        "hs-en.html",
        "grad-en.html",
        "hs-zh.html",
        "grad-zh.html",
        "index.html",
        "styles.css",
        "script.js",
    ] {
        assert!(paper_dir.join(file).exists(), "missing {}", file);
    }

    assert_eq!(
        card_hrefs(repo.path()),
        vec!["/example-paper-a-study".to_string(), "/older-paper".to_string()]
    );
    let index = std::fs::read_to_string(repo.path().join("index.html")).unwrap();
    assert!(index.contains(r#"<span class="pill">arXiv 2301.00001</span>"#));
    assert!(index.contains("Robots learn from examples."));
}

#[tokio::test]
async fn test_rerun_does_not_duplicate_card() {
    let server = MockServer::start().await;
    mount_issue(&server, "2301.00001: Example Paper").await;
    mount_arxiv(&server, "2301.00001").await;
    mount_llm(&server).await;
    let (repo, mode) = site_repo(INDEX_HTML).await;
    let app = App::new(test_config(&server));

    app.run(ISSUE_NUMBER, mode.clone()).await.unwrap();
    let second = app.run(ISSUE_NUMBER, mode).await.unwrap();

    assert_eq!(second.index_outcome, Some(MergeOutcome::AlreadyPresent));
    let hrefs = card_hrefs(repo.path());
    assert_eq!(
        hrefs.iter().filter(|h| *h == "/example-paper-a-study").count(),
        1
    );
}

#[tokio::test]
async fn test_unavailable_metadata_falls_back_to_query() {
    let server = MockServer::start().await;
    mount_issue(&server, "2301.00002: Fallback Title").await;
    Mock::given(method("GET"))
        .and(path("/api/query"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/pdf/2301.00002.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"not a pdf".to_vec()))
        .mount(&server)
        .await;
    mount_llm(&server).await;
    let (repo, mode) = site_repo(INDEX_HTML).await;

    let outcome = App::new(test_config(&server))
        .run(ISSUE_NUMBER, mode)
        .await
        .unwrap();

    assert_eq!(outcome.slug.as_str(), "2301-00002-fallback-title");
    assert_eq!(outcome.pages_written, 4);
    let index = std::fs::read_to_string(repo.path().join("index.html")).unwrap();
    assert!(index.contains("2301.00002: Fallback Title"));
}

#[tokio::test]
async fn test_prompt_handoff_writes_prompt_only() {
    let server = MockServer::start().await;
    mount_issue(&server, "2301.00001: Example Paper").await;
    mount_arxiv(&server, "2301.00001").await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let out_dir = tempfile::tempdir().unwrap();
    let output_path = out_dir.path().join("prompt.md");
    let config = Config {
        llm_api_key: String::new(),
        ..test_config(&server)
    };

    let outcome = App::new(config)
        .run(
            ISSUE_NUMBER,
            RunMode::PromptHandoff {
                output_path: output_path.clone(),
                prompt_file: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(outcome.pages_written, 0);
    assert_eq!(outcome.index_outcome, None);
    assert_eq!(
        outcome.confirmation(),
        format!(
            "Wrote prompt for example-paper-a-study to {}",
            output_path.display()
        )
    );
    let prompt = std::fs::read_to_string(&output_path).unwrap();
    assert!(prompt.contains("papers/example-paper-a-study/grad-zh.html"));
    assert!(prompt.contains("- Title: Example Paper: A Study"));
}

#[tokio::test]
async fn test_missing_container_aborts_after_pages() {
    let server = MockServer::start().await;
    mount_issue(&server, "2301.00001: Example Paper").await;
    mount_arxiv(&server, "2301.00001").await;
    mount_llm(&server).await;
    let (repo, mode) = site_repo("<html><body><main></main></body></html>").await;

    let err = App::new(test_config(&server))
        .run(ISSUE_NUMBER, mode)
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<AppError>(),
        Some(AppError::Index(IndexError::ContainerMissing { .. }))
    ));
    // 已写入的页面不回滚
    assert!(repo
        .path()
        .join("papers/example-paper-a-study/hs-en.html")
        .exists());
}

#[tokio::test]
async fn test_generation_failure_aborts_before_index() {
    let server = MockServer::start().await;
    mount_issue(&server, "2301.00001: Example Paper").await;
    mount_arxiv(&server, "2301.00001").await;
    // 最后一个版本失败，只请求一次
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_string_contains("Version: grad-zh"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;
    mount_llm(&server).await;
    let (repo, mode) = site_repo(INDEX_HTML).await;

    let err = App::new(test_config(&server))
        .run(ISSUE_NUMBER, mode)
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<AppError>(),
        Some(AppError::Llm(LlmError::ApiCallFailed { .. }))
    ));
    let paper_dir = repo.path().join("papers/example-paper-a-study");
    for file in ["hs-en.html", "grad-en.html", "hs-zh.html"] {
        assert!(paper_dir.join(file).exists(), "missing {}", file);
    }
    assert!(!paper_dir.join("grad-zh.html").exists());
    assert!(!paper_dir.join("index.html").exists());
    let index = std::fs::read_to_string(repo.path().join("index.html")).unwrap();
    assert_eq!(index, INDEX_HTML);
}

#[tokio::test]
async fn test_issue_fetch_failure_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/repos/owner/site/issues/{}", ISSUE_NUMBER)))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let (repo, mode) = site_repo(INDEX_HTML).await;

    let err = App::new(test_config(&server))
        .run(ISSUE_NUMBER, mode)
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<AppError>(),
        Some(AppError::Api(ApiError::BadStatus { status: 404, .. }))
    ));
    assert!(!repo.path().join("papers").exists());
}
