//! Integration tests for the resolution pipeline.
//!
//! Providers here are in-process doubles that count calls or hang on
//! purpose, so fallback order, short-circuiting and the overall deadline
//! can be checked without network access. The last few tests wire real
//! providers to a mock server.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use trivia_search::{
    Acknowledger, AnswerProvider, FailureReason, ProviderErrorKind, ProviderKind, ProviderOutcome,
    ResolutionResult, Resolver, SearchConfig, SearchError,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// How the double behaves when attempted.
#[derive(Clone)]
enum Behaviour {
    Respond(ProviderOutcome),
    Hang,
}

struct CountingProvider {
    kind: ProviderKind,
    behaviour: Behaviour,
    calls: AtomicUsize,
    seen: std::sync::Mutex<Vec<String>>,
}

impl CountingProvider {
    fn new(kind: ProviderKind, behaviour: Behaviour) -> Arc<Self> {
        Arc::new(Self {
            kind,
            behaviour,
            calls: AtomicUsize::new(0),
            seen: std::sync::Mutex::new(Vec::new()),
        })
    }

    fn answering(kind: ProviderKind, text: &str) -> Arc<Self> {
        Self::new(
            kind,
            Behaviour::Respond(ProviderOutcome::Answer {
                text: text.into(),
                source_field: "double".into(),
            }),
        )
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last_query(&self) -> Option<String> {
        self.seen.lock().expect("lock").last().cloned()
    }
}

#[async_trait]
impl AnswerProvider for CountingProvider {
    async fn attempt(&self, query: &str) -> ProviderOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().expect("lock").push(query.to_owned());
        match &self.behaviour {
            Behaviour::Respond(outcome) => outcome.clone(),
            Behaviour::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                ProviderOutcome::Empty
            }
        }
    }

    fn kind(&self) -> ProviderKind {
        self.kind
    }
}

fn chain(providers: &[&Arc<CountingProvider>], deadline: Duration) -> Resolver {
    Resolver::with_providers(
        providers
            .iter()
            .map(|p| Arc::clone(*p) as Arc<dyn AnswerProvider>)
            .collect(),
        deadline,
    )
}

/// Three providers that would all answer, to prove who actually got asked.
fn full_chain() -> (Arc<CountingProvider>, Arc<CountingProvider>, Arc<CountingProvider>) {
    (
        CountingProvider::answering(ProviderKind::SearchApi, "from api"),
        CountingProvider::answering(ProviderKind::Google, "from google"),
        CountingProvider::answering(ProviderKind::DuckDuckGo, "from ddg"),
    )
}

#[tokio::test]
async fn empty_question_calls_no_provider() {
    let (api, google, ddg) = full_chain();
    let resolver = chain(&[&api, &google, &ddg], Duration::from_secs(5));

    let result = resolver.resolve("  ").await;

    assert_eq!(result, ResolutionResult::failed(FailureReason::EmptyQuestion));
    assert_eq!(api.calls() + google.calls() + ddg.calls(), 0);
}

#[tokio::test]
async fn api_answer_skips_scrapers() {
    let (api, google, ddg) = full_chain();
    let resolver = chain(&[&api, &google, &ddg], Duration::from_secs(5));

    let result = resolver.resolve("capital of france").await;

    assert_eq!(result, ResolutionResult::answered("from api"));
    assert_eq!((api.calls(), google.calls(), ddg.calls()), (1, 0, 0));
}

#[tokio::test]
async fn providers_receive_the_normalized_query() {
    let (api, google, ddg) = full_chain();
    let resolver = chain(&[&api, &google, &ddg], Duration::from_secs(5));

    resolver.resolve("What is the largest ocean?").await;

    assert_eq!(
        api.last_query().as_deref(),
        Some("what is the largest ocean facts confirmed")
    );
}

#[tokio::test]
async fn arithmetic_calls_no_provider() {
    let (api, google, ddg) = full_chain();
    let resolver = chain(&[&api, &google, &ddg], Duration::from_secs(5));

    assert_eq!(
        resolver.resolve("what is 7 plus 5").await,
        ResolutionResult::answered("12")
    );
    assert_eq!(
        resolver.resolve("What is 10 / 4?").await,
        ResolutionResult::answered("2.5")
    );
    assert_eq!(
        resolver.resolve("What is 10 / 0?").await,
        ResolutionResult::failed(FailureReason::ProviderError)
    );
    assert_eq!(api.calls() + google.calls() + ddg.calls(), 0);
}

#[tokio::test]
async fn failures_fall_back_in_priority_order() {
    let api = CountingProvider::new(
        ProviderKind::SearchApi,
        Behaviour::Respond(ProviderOutcome::Error(ProviderErrorKind::Timeout)),
    );
    let google = CountingProvider::new(
        ProviderKind::Google,
        Behaviour::Respond(ProviderOutcome::Error(ProviderErrorKind::Status(429))),
    );
    let ddg = CountingProvider::answering(ProviderKind::DuckDuckGo, "Shakespeare wrote Hamlet");
    let resolver = chain(&[&api, &google, &ddg], Duration::from_secs(5));

    let result = resolver.resolve("who wrote hamlet").await;

    assert_eq!(result, ResolutionResult::answered("Shakespeare wrote Hamlet"));
    assert_eq!((api.calls(), google.calls(), ddg.calls()), (1, 1, 1));
}

#[tokio::test]
async fn all_empty_is_no_provider_answer() {
    let api = CountingProvider::new(ProviderKind::SearchApi, Behaviour::Respond(ProviderOutcome::Empty));
    let ddg = CountingProvider::new(ProviderKind::DuckDuckGo, Behaviour::Respond(ProviderOutcome::Empty));
    let resolver = chain(&[&api, &ddg], Duration::from_secs(5));

    let result = resolver.resolve("zzqx unknown thing").await;

    assert_eq!(result.failure(), Some(FailureReason::NoProviderAnswer));
    assert_eq!(
        result.display_text(),
        "Sorry, I couldn't find an answer to that question."
    );
}

#[tokio::test]
async fn hanging_providers_hit_the_deadline() {
    let api = CountingProvider::new(ProviderKind::SearchApi, Behaviour::Hang);
    let ddg = CountingProvider::answering(ProviderKind::DuckDuckGo, "never reached");
    let deadline = Duration::from_millis(200);
    let resolver = chain(&[&api, &ddg], deadline);

    let started = Instant::now();
    let result = resolver.resolve("who wrote hamlet").await;
    let elapsed = started.elapsed();

    assert_eq!(result, ResolutionResult::failed(FailureReason::Timeout));
    assert!(elapsed >= deadline);
    assert!(elapsed < deadline + Duration::from_millis(500), "took {elapsed:?}");
    assert_eq!(ddg.calls(), 0);
}

struct SlowFailingAck {
    started: AtomicUsize,
}

#[async_trait]
impl Acknowledger for SlowFailingAck {
    async fn acknowledge(&self, _question: &str) -> Result<(), SearchError> {
        self.started.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_secs(2)).await;
        Err(SearchError::Acknowledge("speaker unplugged".into()))
    }
}

#[tokio::test]
async fn slow_failing_acknowledgement_does_not_delay_or_change_result() {
    let api = CountingProvider::answering(ProviderKind::SearchApi, "Paris");
    let resolver = chain(&[&api], Duration::from_secs(5));
    let ack = Arc::new(SlowFailingAck {
        started: AtomicUsize::new(0),
    });

    let started = Instant::now();
    let result = resolver
        .resolve_with_ack("capital of france", ack.clone())
        .await;

    assert_eq!(result, ResolutionResult::answered("Paris"));
    assert!(started.elapsed() < Duration::from_secs(1));

    tokio::task::yield_now().await;
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(ack.started.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn empty_question_skips_acknowledgement() {
    let resolver = chain(&[], Duration::from_secs(1));
    let ack = Arc::new(SlowFailingAck {
        started: AtomicUsize::new(0),
    });

    resolver.resolve_with_ack("", ack.clone()).await;
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert_eq!(ack.started.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn concurrent_identical_questions_resolve_independently() {
    let api = CountingProvider::answering(ProviderKind::SearchApi, "Paris");
    let resolver = chain(&[&api], Duration::from_secs(5));

    let (a, b) = tokio::join!(
        resolver.resolve("capital of france"),
        resolver.resolve("capital of france")
    );

    assert_eq!(a, b);
    assert_eq!(api.calls(), 2);
}

#[tokio::test]
async fn configured_chain_falls_back_from_api_to_duckduckgo() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/search"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body></body></html>"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/html/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<div class="result__snippet">Mount Everest is Earth's highest mountain above sea level.</div>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let config = SearchConfig {
        api_key: Some("test-key".into()),
        search_api_url: format!("{}/api/v1/search", server.uri()),
        google_url: format!("{}/search", server.uri()),
        duckduckgo_url: format!("{}/html/", server.uri()),
        api_timeout_seconds: 2,
        scrape_timeout_seconds: 2,
        deadline_ms: 5_000,
        ..Default::default()
    };
    let resolver = Resolver::new(&config).expect("valid config");
    assert_eq!(resolver.provider_names(), vec!["SearchApi", "Google", "DuckDuckGo"]);

    let result = resolver.resolve("What is the tallest mountain?").await;

    assert_eq!(
        result,
        ResolutionResult::answered("Mount Everest is Earth's highest mountain above sea level")
    );
}

#[tokio::test]
async fn slow_api_still_falls_back_under_default_budget() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(12)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<div class="kno-rdesc">Paris is the capital of France.</div>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let config = SearchConfig {
        api_key: Some("test-key".into()),
        search_api_url: format!("{}/api/v1/search", server.uri()),
        google_url: format!("{}/search", server.uri()),
        duckduckgo_url: format!("{}/html/", server.uri()),
        ..Default::default()
    };
    let resolver = Resolver::new(&config).expect("valid config");

    let started = Instant::now();
    let result = resolver.resolve("capital of france").await;

    assert_eq!(
        result,
        ResolutionResult::answered("Paris is the capital of France")
    );
    assert!(started.elapsed() < config.deadline(), "took {:?}", started.elapsed());
}

#[tokio::test]
async fn meta_only_snippets_are_no_provider_answer() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<div class="kno-rdesc">Click here for more info. Learn more about this topic.</div>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/html/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<div class="result__snippet">Click here for more info.</div>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let config = SearchConfig {
        google_url: format!("{}/search", server.uri()),
        duckduckgo_url: format!("{}/html/", server.uri()),
        scrape_timeout_seconds: 2,
        deadline_ms: 5_000,
        ..Default::default()
    };
    let resolver = Resolver::new(&config).expect("valid config");
    assert_eq!(resolver.provider_names(), vec!["Google", "DuckDuckGo"]);

    let result = resolver.resolve("who wrote hamlet").await;

    assert_eq!(result, ResolutionResult::failed(FailureReason::NoProviderAnswer));
}
