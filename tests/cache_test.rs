//! Tests for [`LookupCache`] — response caching with negative entries.

use std::time::Duration;

use tailfin::{CacheConfig, CachedLookup, FlightEnrichment, FlightQuery, LookupCache, RawQuery};

fn query(flight: &str) -> FlightQuery {
    FlightQuery::parse(RawQuery::flight(flight)).unwrap()
}

fn enrichment(flight: &str) -> FlightEnrichment {
    FlightEnrichment {
        flight_iata: Some(flight.to_string()),
        airline_iata: None,
        dep_iata: Some("JFK".to_string()),
        arr_iata: Some("LAX".to_string()),
        status: Some("scheduled".to_string()),
        dep_time: None,
        dep_estimated: None,
        arr_time: None,
        arr_estimated: None,
        delayed: None,
    }
}

#[test]
fn cache_miss_returns_none() {
    let cache = LookupCache::new(&CacheConfig::default());
    assert!(cache.get(&query("AA100")).is_none());
}

#[test]
fn insert_then_get() {
    let cache = LookupCache::new(&CacheConfig::default());
    let q = query("AA100");
    cache.insert(&q, CachedLookup::Found(enrichment("AA100")));

    let got = cache.get(&q).unwrap();
    assert_eq!(got, CachedLookup::Found(enrichment("AA100")));
}

#[test]
fn negative_entry_is_a_hit_not_a_miss() {
    let cache = LookupCache::new(&CacheConfig::default());
    let q = query("ZZ999");
    cache.insert(&q, CachedLookup::NotFound);

    // Present-with-negative must be distinguishable from absent.
    let got = cache.get(&q);
    assert_eq!(got, Some(CachedLookup::NotFound));
    assert_eq!(got.unwrap().into_enrichment(), None);
}

#[test]
fn overwrite_replaces_entry() {
    let cache = LookupCache::new(&CacheConfig::default());
    let q = query("AA100");

    cache.insert(&q, CachedLookup::NotFound);
    cache.insert(&q, CachedLookup::Found(enrichment("AA100")));

    assert_eq!(cache.get(&q), Some(CachedLookup::Found(enrichment("AA100"))));
}

#[test]
fn normalized_queries_share_an_entry() {
    let cache = LookupCache::new(&CacheConfig::default());
    cache.insert(&query("AA100"), CachedLookup::NotFound);

    let folded = FlightQuery::parse(RawQuery::flight(" aa100 ")).unwrap();
    assert!(cache.get(&folded).is_some());
}

#[test]
fn independent_keys() {
    let cache = LookupCache::new(&CacheConfig::default());
    cache.insert(&query("AA100"), CachedLookup::NotFound);
    cache.insert(&query("BA200"), CachedLookup::Found(enrichment("BA200")));

    assert!(cache.get(&query("AA100")).is_some());
    assert!(cache.get(&query("BA200")).is_some());
    assert!(cache.get(&query("LH300")).is_none());
}

#[test]
fn route_and_designator_queries_do_not_collide() {
    let cache = LookupCache::new(&CacheConfig::default());
    let by_flight = query("AA100");
    let by_route = FlightQuery::parse(RawQuery::route("JFK", "LAX")).unwrap();

    cache.insert(&by_flight, CachedLookup::NotFound);
    assert!(cache.get(&by_route).is_none());
}

#[test]
fn config_builder_round_trips() {
    let config = CacheConfig::new()
        .max_entries(42)
        .ttl(Duration::from_secs(5));
    assert_eq!(config.max_entries, 42);
    assert_eq!(config.ttl, Duration::from_secs(5));
}

#[test]
fn thread_safety() {
    use std::sync::Arc;
    use std::thread;

    let cache = Arc::new(LookupCache::new(&CacheConfig::default()));
    let mut handles = Vec::new();

    // Spawn writers
    for i in 0..10 {
        let cache = Arc::clone(&cache);
        handles.push(thread::spawn(move || {
            cache.insert(&query(&format!("AA{i}")), CachedLookup::NotFound);
        }));
    }

    // Spawn concurrent readers
    for i in 0..10 {
        let cache = Arc::clone(&cache);
        handles.push(thread::spawn(move || {
            // May or may not see the entry yet — shouldn't panic
            let _ = cache.get(&query(&format!("AA{i}")));
        }));
    }

    for h in handles {
        h.join().expect("thread panicked");
    }
}
