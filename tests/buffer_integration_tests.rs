//! Integration Tests for the Buffer
//!
//! Exercises the public API end to end, including concurrent callers and the
//! background sweep.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Barrier};
use std::thread::{self, sleep};
use std::time::Duration;

use fsft_buffer::{
    spawn_configured_sweeper, spawn_sweeper, BufferConfig, BufferError, Bufferable, FsftBuffer,
};

// == Helper Types ==

#[derive(Debug, Clone, PartialEq)]
struct Article {
    title: String,
    text: String,
}

impl Article {
    fn new(title: &str, text: &str) -> Self {
        Self {
            title: title.to_string(),
            text: text.to_string(),
        }
    }
}

impl Bufferable for Article {
    fn id(&self) -> &str {
        &self.title
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn article_buffer(capacity: usize, timeout: Duration) -> FsftBuffer<Article> {
    init_tracing();
    FsftBuffer::new(capacity, timeout).unwrap()
}

// == Walkthrough ==

#[test]
fn test_buffer_operations_walkthrough() {
    let buffer = article_buffer(2, Duration::from_secs(1));

    let b1 = Article::new("1", "one");
    let b2 = Article::new("2", "two");
    let b3 = Article::new("3", "three");

    // Put and get
    assert!(buffer.put(b1.clone()));
    assert!(buffer.put(b2.clone()));
    assert_eq!(buffer.get("1").unwrap(), b1);
    assert_eq!(buffer.get("2").unwrap(), b2);

    // "1" is least recently used once "2" has been read
    assert!(buffer.put(b3.clone()));
    assert!(matches!(buffer.get("1"), Err(BufferError::NotFound(_))));
    assert_eq!(buffer.get("2").unwrap().id(), "2");
    assert_eq!(buffer.get("3").unwrap().id(), "3");

    // Timeout
    buffer.put(b1.clone());
    sleep(Duration::from_millis(1100));
    assert!(matches!(buffer.get("1"), Err(BufferError::Expired(_))));

    // Touch delays the timeout
    buffer.put(b1.clone());
    sleep(Duration::from_millis(500));
    assert!(buffer.touch("1").unwrap());
    sleep(Duration::from_millis(600));
    assert_eq!(buffer.get("1").unwrap().id(), "1");

    // Absent ids and values
    assert!(!buffer.touch("4").unwrap());
    let err = buffer.get(None).unwrap_err();
    assert_eq!(
        err,
        BufferError::InvalidArgument("id must be present".to_string())
    );
    assert!(!buffer.put(None));
}

// == Testable Properties ==

#[test]
fn test_capacity_invariant_for_distinct_puts() {
    let buffer = article_buffer(5, Duration::from_secs(60));

    for i in 0..50 {
        assert!(buffer.put(Article::new(&format!("page-{i}"), "text")));
        assert!(buffer.len() <= 5);
    }
    assert_eq!(buffer.len(), 5);
    assert_eq!(buffer.stats().evictions, 45);
}

#[test]
fn test_lru_correctness() {
    let buffer = article_buffer(2, Duration::from_secs(60));

    buffer.put(Article::new("a", ""));
    buffer.put(Article::new("b", ""));
    buffer.get("a").unwrap();
    buffer.put(Article::new("c", ""));

    assert!(matches!(buffer.get("b"), Err(BufferError::NotFound(_))));
    assert!(buffer.get("a").is_ok());
    assert!(buffer.get("c").is_ok());
}

#[test]
fn test_expiry_correctness() {
    let buffer = article_buffer(4, Duration::from_millis(300));

    buffer.put(Article::new("a", "fresh"));
    assert_eq!(buffer.get("a").unwrap().text, "fresh");

    sleep(Duration::from_millis(500));
    assert!(matches!(buffer.get("a"), Err(BufferError::Expired(_))));
}

#[test]
fn test_touch_extends_lifetime() {
    let timeout = Duration::from_secs(1);
    let buffer = article_buffer(4, timeout);

    buffer.put(Article::new("a", ""));
    sleep(timeout / 2);
    assert!(buffer.touch("a").unwrap());
    sleep(timeout * 8 / 10);

    // 1.3T since put, 0.8T since touch
    assert!(buffer.get("a").is_ok());
}

#[test]
fn test_reput_is_refresh_not_duplicate() {
    let buffer = article_buffer(4, Duration::from_secs(60));

    assert!(buffer.put(Article::new("a", "first")));
    assert!(!buffer.put(Article::new("a", "second")));

    assert_eq!(buffer.len(), 1);
    assert_eq!(buffer.get("a").unwrap().text, "second");
}

#[test]
fn test_reput_keeps_entry_alive() {
    let buffer = article_buffer(4, Duration::from_millis(800));

    buffer.put(Article::new("a", "first"));
    sleep(Duration::from_millis(500));
    assert!(!buffer.put(Article::new("a", "second")));
    sleep(Duration::from_millis(500));

    assert_eq!(buffer.get("a").unwrap().text, "second");
}

#[test]
fn test_null_handling() {
    let buffer = article_buffer(4, Duration::from_secs(60));

    assert!(!buffer.put(None));
    assert!(matches!(
        buffer.get(None),
        Err(BufferError::InvalidArgument(_))
    ));
    assert!(matches!(
        buffer.touch(None),
        Err(BufferError::InvalidArgument(_))
    ));
    assert!(buffer.is_empty());
}

// == Configuration ==

#[test]
fn test_configuration_errors() {
    assert!(matches!(
        FsftBuffer::<Article>::new(0, Duration::from_secs(1)),
        Err(BufferError::Configuration(_))
    ));
    assert!(matches!(
        FsftBuffer::<Article>::new(1, Duration::ZERO),
        Err(BufferError::Configuration(_))
    ));
}

#[test]
fn test_from_config() {
    let config = BufferConfig::new(3, Duration::from_secs(5));
    let buffer: FsftBuffer<Article> = FsftBuffer::from_config(&config).unwrap();

    assert_eq!(buffer.capacity(), 3);
    assert_eq!(buffer.timeout(), Duration::from_secs(5));
}

#[test]
fn test_default_buffer() {
    let buffer: FsftBuffer<Article> = FsftBuffer::default();

    assert_eq!(buffer.capacity(), fsft_buffer::DEFAULT_CAPACITY);
    assert_eq!(buffer.timeout(), fsft_buffer::DEFAULT_TIMEOUT);
}

#[test]
fn test_shared_handles_are_returned() {
    init_tracing();
    let buffer: FsftBuffer<Arc<Article>> = FsftBuffer::new(2, Duration::from_secs(60)).unwrap();

    let article = Arc::new(Article::new("a", "shared"));
    buffer.put(Arc::clone(&article));

    let fetched = buffer.get("a").unwrap();
    assert!(Arc::ptr_eq(&fetched, &article));
}

// == Concurrency ==

#[test]
fn test_concurrent_capacity_stress() {
    const THREADS: usize = 32;
    const CAPACITY: usize = 8;

    let buffer = Arc::new(article_buffer(CAPACITY, Duration::from_secs(60)));
    let barrier = Arc::new(Barrier::new(THREADS + 1));
    let done = Arc::new(AtomicBool::new(false));

    // Separate reader watching for an over-capacity transient
    let watcher = {
        let buffer = Arc::clone(&buffer);
        let done = Arc::clone(&done);
        thread::spawn(move || {
            let mut max_seen = 0;
            while !done.load(Ordering::Acquire) {
                max_seen = max_seen.max(buffer.len());
            }
            max_seen
        })
    };

    let writers: Vec<_> = (0..THREADS)
        .map(|i| {
            let buffer = Arc::clone(&buffer);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                assert!(buffer.put(Article::new(&format!("id-{i}"), "text")));
            })
        })
        .collect();

    barrier.wait();
    for writer in writers {
        writer.join().unwrap();
    }
    done.store(true, Ordering::Release);
    let max_seen = watcher.join().unwrap();

    assert!(max_seen <= CAPACITY, "Watcher saw {} entries", max_seen);
    assert_eq!(buffer.len(), CAPACITY);

    let attempted: HashSet<String> = (0..THREADS).map(|i| format!("id-{i}")).collect();
    let mut present = 0;
    for id in &attempted {
        if buffer.get(id.as_str()).is_ok() {
            present += 1;
        }
    }
    assert_eq!(present, CAPACITY);
    assert_eq!(buffer.stats().evictions, (THREADS - CAPACITY) as u64);
}

#[test]
fn test_concurrent_mixed_operations_keep_invariants() {
    const THREADS: usize = 8;
    const CAPACITY: usize = 4;

    let buffer = Arc::new(article_buffer(CAPACITY, Duration::from_secs(60)));

    let workers: Vec<_> = (0..THREADS)
        .map(|t| {
            let buffer = Arc::clone(&buffer);
            thread::spawn(move || {
                for i in 0..200 {
                    let id = format!("id-{}", (t * 7 + i) % 10);
                    match i % 3 {
                        0 => {
                            buffer.put(Article::new(&id, "text"));
                        }
                        1 => match buffer.get(id.as_str()) {
                            Ok(article) => assert_eq!(article.title, id),
                            Err(err) => assert!(err.is_miss()),
                        },
                        _ => {
                            buffer.touch(id.as_str()).unwrap();
                        }
                    }
                    assert!(buffer.len() <= CAPACITY);
                }
            })
        })
        .collect();

    for worker in workers {
        worker.join().unwrap();
    }

    let stats = buffer.stats();
    assert!(stats.total_entries <= CAPACITY);
    assert!(stats.hit_rate() >= 0.0 && stats.hit_rate() <= 1.0);
}

// == Background Sweep ==

#[tokio::test]
async fn test_sweeper_bounds_staleness() {
    let config = BufferConfig::new(8, Duration::from_millis(200))
        .with_sweep_interval(Duration::from_millis(50));
    let buffer: Arc<FsftBuffer<Article>> = Arc::new(FsftBuffer::from_config(&config).unwrap());

    buffer.put(Article::new("a", ""));
    buffer.put(Article::new("b", ""));

    let handle = spawn_configured_sweeper(Arc::clone(&buffer), &config).unwrap();

    tokio::time::sleep(Duration::from_millis(500)).await;
    assert!(buffer.is_empty());
    assert_eq!(buffer.stats().expirations, 2);

    handle.abort();
}

#[tokio::test]
async fn test_explicit_sweeper_interval() {
    let buffer = Arc::new(article_buffer(8, Duration::from_millis(100)));
    buffer.put(Article::new("a", ""));

    let handle = spawn_sweeper(Arc::clone(&buffer), Duration::from_millis(20));

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert!(buffer.is_empty());

    handle.abort();
}
