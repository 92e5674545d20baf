use snip_core::{ShortenOutcome, ShortenParams, Shortener};
use snip_generator::RandomGenerator;
use snip_normalize::CanonicalNormalizer;
use snip_shortener::ShortenerService;
use snip_store::InMemoryStore;
use std::collections::HashSet;
use std::sync::Arc;

type Service = ShortenerService<InMemoryStore, RandomGenerator, CanonicalNormalizer>;

fn service() -> Arc<Service> {
    Arc::new(ShortenerService::new(
        InMemoryStore::new(),
        RandomGenerator::new(),
        CanonicalNormalizer,
    ))
}

#[tokio::test]
async fn concurrent_shortens_of_one_url_converge_on_one_code() {
    let service = service();
    let mut handles = vec![];

    for _ in 0..16 {
        let service = Arc::clone(&service);
        handles.push(tokio::spawn(async move {
            service
                .shorten(ShortenParams::auto("https://example.com/hot-path"))
                .await
                .expect("shorten should succeed")
        }));
    }

    let mut outcomes = vec![];
    for handle in handles {
        outcomes.push(handle.await.expect("task should not panic"));
    }

    let codes: HashSet<_> = outcomes.iter().map(|o| o.code().clone()).collect();
    assert_eq!(codes.len(), 1, "all requests must converge on one code");

    let created = outcomes
        .iter()
        .filter(|o| matches!(o, ShortenOutcome::Created(_)))
        .count();
    assert_eq!(created, 1, "exactly one request creates the mapping");

    let snapshot = service.snapshot().await.expect("snapshot should succeed");
    assert_eq!(snapshot.len(), 1);
}

#[tokio::test]
async fn concurrent_shortens_of_distinct_urls_stay_consistent() {
    let service = service();
    let mut handles = vec![];

    for i in 0..20u32 {
        let service = Arc::clone(&service);
        handles.push(tokio::spawn(async move {
            let url = format!("https://example.com/page/{}", i);
            let outcome = service
                .shorten(ShortenParams::auto(url.as_str()))
                .await
                .expect("shorten should succeed");
            (outcome, url)
        }));
    }

    let mut seen = HashSet::new();
    for handle in handles {
        let (outcome, url) = handle.await.expect("task should not panic");
        assert!(seen.insert(outcome.code().clone()), "codes must be unique");

        let record = service
            .resolve(outcome.code())
            .await
            .expect("resolve should succeed")
            .expect("record should exist");
        assert_eq!(record.canonical_url, url);
    }

    assert_eq!(service.snapshot().await.unwrap().len(), 20);
}

#[tokio::test]
async fn concurrent_resolves_count_every_click() {
    let service = service();

    let outcome = service
        .shorten(ShortenParams::auto("https://example.com/counted"))
        .await
        .expect("shorten should succeed");
    let code = outcome.code().clone();

    let mut handles = vec![];
    for _ in 0..32 {
        let service = Arc::clone(&service);
        let code = code.clone();
        handles.push(tokio::spawn(async move {
            service
                .resolve(&code)
                .await
                .expect("resolve should succeed")
                .expect("record should exist");
        }));
    }

    for handle in handles {
        handle.await.expect("task should not panic");
    }

    let snapshot = service.snapshot().await.expect("snapshot should succeed");
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].clicks, 32);
}

#[tokio::test]
async fn mixed_readers_and_writers_make_progress() {
    let service = service();

    service
        .shorten(ShortenParams::with_alias(
            "https://example.com/pinned",
            "pinned",
        ))
        .await
        .expect("shorten should succeed");

    let mut handles = vec![];
    for i in 0..8u32 {
        let writer = Arc::clone(&service);
        handles.push(tokio::spawn(async move {
            writer
                .shorten(ShortenParams::auto(format!(
                    "https://example.com/writer/{}",
                    i
                )))
                .await
                .expect("shorten should succeed");
        }));

        let reader = Arc::clone(&service);
        handles.push(tokio::spawn(async move {
            let code = snip_core::ShortCode::new_unchecked("pinned");
            reader
                .resolve(&code)
                .await
                .expect("resolve should succeed")
                .expect("record should exist");
        }));
    }

    for handle in handles {
        handle.await.expect("task should not panic");
    }

    let snapshot = service.snapshot().await.expect("snapshot should succeed");
    assert_eq!(snapshot.len(), 9);

    let pinned = snapshot
        .iter()
        .find(|r| r.code.as_str() == "pinned")
        .expect("pinned record should be in the snapshot");
    assert_eq!(pinned.clicks, 8);
}
