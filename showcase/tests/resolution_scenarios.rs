use async_trait::async_trait;
use mockito::Matcher;
use serde_json::{json, Value};
use showcase::{
    fallback_repositories, refresh, resolve_showcased_repositories, RepositoryDescriptor,
    RepositoryProvider, RepositorySection, ResolutionSource, ResolutionStrategy, ShowcaseConfig,
    ShowcaseResolver, ShowcaseResult, LANGUAGE_NOT_SPECIFIED, NO_DESCRIPTION, PLACEHOLDER_TOKEN,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

const HANDLE: &str = "anixane";

fn config_for(server: &mockito::ServerGuard) -> ShowcaseConfig {
    ShowcaseConfig::default()
        .with_token("test-token")
        .with_graphql_url(format!("{}/graphql", server.url()))
        .with_rest_base_url(server.url())
}

fn pinned_body(nodes: Value) -> String {
    json!({ "data": { "user": { "pinnedItems": { "nodes": nodes } } } }).to_string()
}

#[tokio::test]
async fn test_scenario_a_no_credential_returns_fallback() {
    let repos = resolve_showcased_repositories(HANDLE, &ShowcaseConfig::default()).await;

    assert_eq!(repos.len(), 6);
    assert_eq!(repos[0].name, "Google-Store-Locator");
    assert_eq!(repos[0].star_count, 2);
    assert_eq!(repos[0].fork_count, 0);
    assert_eq!(repos, fallback_repositories());
}

#[tokio::test]
async fn test_placeholder_token_makes_no_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/graphql")
        .expect(0)
        .create_async()
        .await;

    let config = config_for(&server).with_token(PLACEHOLDER_TOKEN);
    let repos = resolve_showcased_repositories(HANDLE, &config).await;

    mock.assert_async().await;
    assert_eq!(repos, fallback_repositories());
}

#[tokio::test]
async fn test_scenario_b_three_pinned_items() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/graphql")
        .match_header("authorization", "Bearer test-token")
        .match_body(Matcher::PartialJson(json!({ "variables": { "login": HANDLE } })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(pinned_body(json!([
            {
                "name": "Foo",
                "description": "First",
                "url": "https://github.com/anixane/Foo",
                "stargazerCount": 7,
                "forkCount": 1,
                "primaryLanguage": { "name": "Rust", "color": "#dea584" },
                "diskUsage": 300
            },
            {
                "name": "Bar",
                "description": null,
                "url": "https://github.com/anixane/Bar",
                "stargazerCount": 0,
                "forkCount": 0,
                "primaryLanguage": null,
                "diskUsage": 12
            },
            {
                "name": "Baz",
                "description": "Third",
                "url": "https://github.com/anixane/Baz",
                "stargazerCount": 2,
                "forkCount": 0,
                "primaryLanguage": { "name": "Go", "color": null },
                "diskUsage": 2048
            }
        ])))
        .create_async()
        .await;

    let resolver = ShowcaseResolver::from_config(&config_for(&server));
    let resolution = resolver.resolve_with_source(HANDLE).await;

    mock.assert_async().await;
    assert_eq!(resolution.source, ResolutionSource::Live);

    let repos = resolution.repositories;
    assert_eq!(repos.len(), 3);
    assert!(repos
        .iter()
        .all(|r| r.url.starts_with("https://github.com/anixane/")));
    assert_eq!(repos[0].url, "https://github.com/anixane/Foo");

    assert_eq!(repos[1].description, NO_DESCRIPTION);
    assert_eq!(repos[1].primary_language_name, LANGUAGE_NOT_SPECIFIED);
    assert_eq!(repos[1].primary_language_color, None);

    assert_eq!(repos[2].primary_language_name, "Go");
    assert_eq!(repos[2].primary_language_color, None);
}

#[tokio::test]
async fn test_empty_pinned_list_falls_back() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/graphql")
        .with_status(200)
        .with_body(pinned_body(json!([])))
        .create_async()
        .await;

    let resolver = ShowcaseResolver::from_config(&config_for(&server));
    let resolution = resolver.resolve_with_source(HANDLE).await;

    assert_eq!(resolution.source, ResolutionSource::FallbackEmpty);
    assert_eq!(resolution.repositories, fallback_repositories());
}

#[tokio::test]
async fn test_server_error_falls_back() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/graphql")
        .with_status(500)
        .with_body("Internal Server Error")
        .create_async()
        .await;

    let repos = resolve_showcased_repositories(HANDLE, &config_for(&server)).await;
    assert_eq!(repos, fallback_repositories());
}

#[tokio::test]
async fn test_all_nodes_malformed_falls_back() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/graphql")
        .with_status(200)
        .with_body(pinned_body(json!([null, { "description": "nameless" }])))
        .create_async()
        .await;

    let resolver = ShowcaseResolver::from_config(&config_for(&server));
    let resolution = resolver.resolve_with_source(HANDLE).await;
    assert_eq!(resolution.source, ResolutionSource::FallbackEmpty);
}

#[tokio::test]
async fn test_hung_upstream_times_out_into_fallback() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let accept = tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let config = ShowcaseConfig::default()
        .with_token("test-token")
        .with_graphql_url(format!("http://{}/graphql", addr))
        .with_timeout(Duration::from_millis(200));

    let repos = tokio::time::timeout(
        Duration::from_secs(10),
        resolve_showcased_repositories(HANDLE, &config),
    )
    .await
    .expect("resolution must finish once the client times out");

    assert_eq!(repos, fallback_repositories());
    accept.abort();
}

#[tokio::test]
async fn test_top_starred_strategy_uses_rest_listing() {
    let mut server = mockito::Server::new_async().await;
    let graphql = server
        .mock("POST", "/graphql")
        .expect(0)
        .create_async()
        .await;
    let rest = server
        .mock("GET", "/users/anixane/repos")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            json!([{
                "id": 42,
                "name": "Starred",
                "stargazers_count": 12,
                "forks_count": 3,
                "size": 100,
                "language": "TypeScript",
                "html_url": "https://github.com/anixane/Starred"
            }])
            .to_string(),
        )
        .create_async()
        .await;

    let config = config_for(&server);
    let resolver =
        ShowcaseResolver::from_config(&config).with_strategy(ResolutionStrategy::TopStarred);
    let repos = resolver.resolve(HANDLE).await;

    graphql.assert_async().await;
    rest.assert_async().await;
    assert_eq!(repos.len(), 1);
    assert_eq!(repos[0].id, "42");
    assert_eq!(repos[0].primary_language_color, None);
}

#[tokio::test]
async fn test_top_starred_failure_falls_back() {
    let mut server = mockito::Server::new_async().await;
    let _rest = server
        .mock("GET", "/users/anixane/repos")
        .match_query(Matcher::Any)
        .with_status(403)
        .with_body(r#"{"message":"API rate limit exceeded"}"#)
        .create_async()
        .await;

    let resolver = ShowcaseResolver::from_config(&config_for(&server))
        .with_strategy(ResolutionStrategy::TopStarred);
    let resolution = resolver.resolve_with_source(HANDLE).await;

    assert_eq!(resolution.source, ResolutionSource::FallbackError);
    assert_eq!(resolution.repositories.len(), 6);
}

/// The first call is slow, every later call answers immediately.
struct SlowFirstProvider {
    calls: AtomicUsize,
}

#[async_trait]
impl RepositoryProvider for SlowFirstProvider {
    async fn pinned_repositories(&self, login: &str) -> ShowcaseResult<Vec<RepositoryDescriptor>> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call == 0 {
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        Ok(vec![RepositoryDescriptor::new(login, format!("call-{}", call))])
    }

    async fn top_starred_repositories(
        &self,
        login: &str,
    ) -> ShowcaseResult<Vec<RepositoryDescriptor>> {
        self.pinned_repositories(login).await
    }

    fn provider_name(&self) -> &'static str {
        "slow-first"
    }
}

#[tokio::test]
async fn test_latest_refresh_wins_over_slower_earlier_one() {
    let provider = SlowFirstProvider {
        calls: AtomicUsize::new(0),
    };
    let resolver = ShowcaseResolver::with_provider(Box::new(provider), true);
    let section = Mutex::new(RepositorySection::new());

    let (first_applied, second_applied) = futures::join!(
        refresh(&section, &resolver, HANDLE),
        refresh(&section, &resolver, HANDLE)
    );

    assert!(!first_applied);
    assert!(second_applied);

    let section = section.lock().unwrap();
    assert_eq!(section.repositories().len(), 1);
    assert_eq!(section.repositories()[0].name, "call-1");
    assert!(!section.is_loading());
}
