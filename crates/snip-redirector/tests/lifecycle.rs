//! Shorten, resolve, expire and reap against one shared store.

use std::sync::Arc;

use jiff::{SignedDuration, Timestamp};
use snip_core::{
    ManualClock, ResolveError, Resolver, Settings, ShortCode, ShortenRequest, Shortener,
};
use snip_generator::RandomGenerator;
use snip_redirector::ResolveService;
use snip_shortener::ShortenService;
use snip_storage::{InMemoryStore, MappingStore, ReapReport, Reaper};

struct Stack {
    store: Arc<InMemoryStore>,
    clock: ManualClock,
    shortener: ShortenService<InMemoryStore, RandomGenerator, ManualClock>,
    resolver: ResolveService<InMemoryStore, ManualClock>,
    reaper: Reaper<InMemoryStore, ManualClock>,
}

fn start() -> Timestamp {
    Timestamp::from_second(1_700_000_000).unwrap()
}

fn stack() -> Stack {
    let settings = Settings::default();
    let store = Arc::new(InMemoryStore::new());
    let clock = ManualClock::new(start());

    Stack {
        shortener: ShortenService::new(
            Arc::clone(&store),
            RandomGenerator::from_settings(&settings).unwrap(),
            clock.clone(),
            settings,
        )
        .unwrap(),
        resolver: ResolveService::new(Arc::clone(&store), clock.clone()),
        reaper: Reaper::new(Arc::clone(&store), clock.clone()),
        store,
        clock,
    }
}

#[test]
fn custom_code_lives_for_its_validity() {
    let s = stack();

    let shortened = s
        .shortener
        .shorten(
            ShortenRequest::new("https://example.com/page")
                .with_custom_code("abc123")
                .with_validity_minutes(1),
        )
        .unwrap();
    assert_eq!(shortened.code.as_str(), "abc123");
    assert_eq!(shortened.expires_at, start() + SignedDuration::from_secs(60));

    s.clock.advance(SignedDuration::from_secs(30));
    assert_eq!(
        s.resolver.resolve("abc123").unwrap().long_url,
        "https://example.com/page"
    );

    s.clock.advance(SignedDuration::from_secs(31));
    assert_eq!(
        s.resolver.resolve("abc123"),
        Err(ResolveError::Expired("abc123".to_string()))
    );
}

#[test]
fn generated_codes_round_trip() {
    let s = stack();

    let codes: Vec<ShortCode> = (0..100)
        .map(|i| {
            s.shortener
                .shorten(ShortenRequest::new(format!("https://example.com/{i}")))
                .unwrap()
                .code
        })
        .collect();

    for (i, code) in codes.iter().enumerate() {
        assert_eq!(code.as_str().len(), 6);
        assert_eq!(
            s.resolver.resolve(code.as_str()).unwrap().long_url,
            format!("https://example.com/{i}")
        );
    }
    assert_eq!(s.store.len(), 100);
}

#[test]
fn reaper_removes_expired_mappings_once() {
    let s = stack();

    for i in 0..5 {
        s.shortener
            .shorten(ShortenRequest::new(format!("https://short.example/{i}")).with_validity_minutes(1))
            .unwrap();
    }
    let keeper = s
        .shortener
        .shorten(ShortenRequest::new("https://long.example").with_validity_minutes(60))
        .unwrap();

    s.clock.advance(SignedDuration::from_mins(2));

    assert_eq!(
        s.reaper.run_once(),
        ReapReport {
            scanned: 6,
            removed: 5
        }
    );
    assert_eq!(
        s.reaper.run_once(),
        ReapReport {
            scanned: 1,
            removed: 0
        }
    );
    assert!(s.resolver.resolve(keeper.code.as_str()).is_ok());
}

#[test]
fn reaped_custom_code_can_be_claimed_again() {
    let s = stack();
    let request = ShortenRequest::new("https://first.example")
        .with_custom_code("promo")
        .with_validity_minutes(5);
    s.shortener.shorten(request).unwrap();

    s.clock.advance(SignedDuration::from_mins(5));
    s.reaper.run_once();
    assert!(matches!(
        s.resolver.resolve("promo"),
        Err(ResolveError::NotFound(_))
    ));

    s.shortener
        .shorten(ShortenRequest::new("https://second.example").with_custom_code("promo"))
        .unwrap();
    assert_eq!(
        s.resolver.resolve("promo").unwrap().long_url,
        "https://second.example"
    );
}

#[test]
fn services_share_the_store_through_trait_objects() {
    let s = stack();
    let shortener: Arc<dyn Shortener> = Arc::new(s.shortener);
    let resolver: Arc<dyn Resolver> = Arc::new(s.resolver);

    let shortened = shortener
        .shorten(ShortenRequest::new("https://example.com"))
        .unwrap();
    assert!(s.store.lookup(&shortened.code).is_some());
    assert_eq!(
        resolver.resolve(shortened.code.as_str()).unwrap().expires_at,
        start() + SignedDuration::from_mins(30)
    );
}
