//! Pipeline lifecycle tests
//!
//! Start the full pipeline through the Coordinator, let it run, and verify
//! shutdown behaviour and item accounting.

use std::sync::Arc;
use std::time::{Duration, Instant};

use queue_balancer_core::application::{Coordinator, StopReason};
use queue_balancer_core::port::SeededRngProvider;
use queue_balancer_core::PipelineConfig;

fn coordinator(config: PipelineConfig) -> Coordinator {
    Coordinator::new(config, Arc::new(SeededRngProvider::new(2024))).unwrap()
}

/// Cancellation: every unit stops well within one idle interval
#[tokio::test(flavor = "multi_thread", worker_threads = 5)]
async fn test_shutdown_within_idle_bound() {
    let idle_ms = 500;
    let pipeline = coordinator(PipelineConfig {
        producer_max_idle_ms: idle_ms,
        consumer_max_idle_ms: idle_ms,
        ..Default::default()
    })
    .start()
    .unwrap();

    tokio::time::sleep(Duration::from_millis(300)).await;

    let started = Instant::now();
    let report = pipeline.shutdown().await;
    let elapsed = started.elapsed();

    assert!(
        elapsed < Duration::from_millis(idle_ms),
        "shutdown took {:?}",
        elapsed
    );
    assert_eq!(report.producer.stop, StopReason::Cancelled);
    assert_eq!(report.consumers.len(), 3);
    for consumer in &report.consumers {
        assert_eq!(consumer.stop, StopReason::Cancelled, "{}", consumer.label);
    }
}

/// Every produced item is either consumed or still buffered
#[tokio::test(flavor = "multi_thread", worker_threads = 6)]
async fn test_items_conserved_across_run() {
    let mut pipeline = coordinator(PipelineConfig {
        queue_count: 4,
        max_capacity: 3,
        producer_max_idle_ms: 1,
        consumer_max_idle_ms: 5,
        produce_limit: Some(200),
        ..Default::default()
    })
    .start()
    .unwrap();

    let producer = tokio::time::timeout(Duration::from_secs(10), pipeline.producer_finished())
        .await
        .expect("producer should reach its limit");
    assert_eq!(producer.stop, StopReason::LimitReached);

    // Calling again returns the recorded report immediately
    let again = pipeline.producer_finished().await;
    assert_eq!(again, producer);

    for queue in pipeline.group().iter() {
        assert!(queue.peak_len() <= queue.capacity());
    }

    let report = pipeline.shutdown().await;
    assert_eq!(report.produced(), 200);
    assert_eq!(report.consumed() + report.buffered() as u64, 200);
    assert_eq!(report.leftover.len(), 4);
}

/// The diagnostic task runs next to a live pipeline without disturbing it
#[tokio::test(flavor = "multi_thread", worker_threads = 5)]
async fn test_diagnostic_alongside_pipeline() {
    let pipeline = coordinator(PipelineConfig {
        producer_max_idle_ms: 5,
        consumer_max_idle_ms: 5,
        ..Default::default()
    })
    .start()
    .unwrap();

    let message = pipeline.run_diagnostic().await;
    for queue in pipeline.group().iter() {
        assert!(message.contains(&format!("queue {}:", queue.id())));
    }

    tokio::time::sleep(Duration::from_millis(50)).await;
    let report = pipeline.shutdown().await;
    assert!(report.produced() > 0);
}
