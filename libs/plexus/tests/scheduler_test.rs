// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

mod common;

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use common::{init_tracing, wait_until, Collector, CountingSource, Doubler};
use plexus::prelude::*;
use tempfile::TempDir;

/// Builds source → doubler → collector and returns the collector's buffer.
fn build_chain(
    pipeline: &Ref<Pipeline>,
    limit: u64,
) -> Arc<parking_lot::Mutex<Vec<u64>>> {
    let source = ElementNode::new("source", CountingSource::new(limit));
    let doubler = ElementNode::new("doubler", Doubler::default());
    let collector = Collector::new();
    let seen = collector.seen.clone();
    let sink = ElementNode::new("sink", collector);

    for node in [&source, &doubler, &sink] {
        pipeline.add(node).unwrap();
    }
    initialize_pipeline(pipeline, InitFailurePolicy::AbortPipeline).unwrap();
    pipeline.connect(&source, "out", &doubler, "in").unwrap();
    pipeline.connect(&doubler, "out", &sink, "in").unwrap();
    seen
}

#[test]
fn test_cooperative_chain_delivers_in_order() {
    init_tracing();
    let pipeline = Pipeline::new("coop-chain");
    let seen = build_chain(&pipeline, 5);

    let scheduler = CooperativeScheduler::new(SchedulerConfig::default());
    let report = scheduler.run_until_idle(&pipeline, 100).unwrap();

    assert_eq!(*seen.lock(), vec![0, 2, 4, 6, 8]);
    assert_eq!(report.processed, 15);
    assert_eq!(report.failed, 0);
    assert_eq!(scheduler.run_pass(&pipeline).unwrap(), PassReport::default());
}

#[test]
fn test_threaded_chain_delivers_in_order() {
    init_tracing();
    let pipeline = Pipeline::new("threaded-chain");
    let seen = build_chain(&pipeline, 20);

    let config = SchedulerConfig {
        strategy: SchedulingStrategy::Threaded,
        ..SchedulerConfig::default()
    };
    let running = ThreadedScheduler::new(config).spawn(&pipeline).unwrap();
    assert_eq!(running.worker_count(), 3);

    assert!(wait_until(Duration::from_secs(5), || seen.lock().len() == 20));
    running.stop().unwrap();

    let expected: Vec<u64> = (0..20).map(|v| v * 2).collect();
    assert_eq!(*seen.lock(), expected);
}

/// Tracks how many invocations overlap.
struct Overlap {
    active: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
}

impl Element for Overlap {
    fn init(&mut self, _pins: &mut PinRegistry) -> Result<ElementState> {
        Ok(ElementState::Ready)
    }

    fn process(&mut self) -> Result<()> {
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        std::thread::sleep(Duration::from_micros(200));
        self.active.fetch_sub(1, Ordering::SeqCst);
        Ok(())
    }
}

#[test]
fn test_at_most_one_invocation_in_flight() {
    init_tracing();
    let active = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));
    let node = ElementNode::new(
        "overlap",
        Overlap {
            active: active.clone(),
            peak: peak.clone(),
        },
    );
    let pipeline = Pipeline::new("overlap");
    pipeline.add(&node).unwrap();

    let config = SchedulerConfig {
        strategy: SchedulingStrategy::Threaded,
        ..SchedulerConfig::default()
    };
    let running = start(&pipeline, &config).unwrap();

    // Hammer the same element from outside the scheduler as well.
    std::thread::scope(|scope| {
        for _ in 0..4 {
            let node = node.clone();
            scope.spawn(move || {
                for _ in 0..25 {
                    node.process().unwrap();
                }
            });
        }
    });
    running.stop().unwrap();

    assert_eq!(peak.load(Ordering::SeqCst), 1);
    assert_eq!(active.load(Ordering::SeqCst), 0);
    assert!(node.invocation_count() >= 100);
}

struct NeverInits;

impl Element for NeverInits {
    fn init(&mut self, _pins: &mut PinRegistry) -> Result<ElementState> {
        Err(PlexusError::Configuration("missing device".into()))
    }

    fn process(&mut self) -> Result<()> {
        Ok(())
    }
}

#[test]
fn test_disable_policy_skips_failed_element() {
    init_tracing();
    let pipeline = Pipeline::new("disable");
    let broken = ElementNode::new("broken", NeverInits);
    let source = ElementNode::new("source", CountingSource::new(2));
    pipeline.add(&broken).unwrap();
    pipeline.add(&source).unwrap();

    let report = initialize_pipeline(&pipeline, InitFailurePolicy::DisableElement).unwrap();
    assert_eq!(report.disabled, vec![broken.id().clone()]);
    assert_eq!(report.initialized, vec![source.id().clone()]);
    assert!(broken.is_inert());

    let scheduler = CooperativeScheduler::default();
    let total = scheduler.run_until_idle(&pipeline, 10).unwrap();
    assert_eq!(total.processed, 2);
    assert_eq!(broken.invocation_count(), 0);
}

#[test]
fn test_abort_policy_names_element() {
    init_tracing();
    let pipeline = Pipeline::new("abort");
    pipeline.add(&ElementNode::new("broken", NeverInits)).unwrap();

    match initialize_pipeline(&pipeline, InitFailurePolicy::AbortPipeline) {
        Err(PlexusError::Pipeline(msg)) => assert!(msg.contains("broken")),
        other => panic!("expected Pipeline error, got {:?}", other),
    }
}

struct AlwaysFails;

impl Element for AlwaysFails {
    fn init(&mut self, _pins: &mut PinRegistry) -> Result<ElementState> {
        Ok(ElementState::Ready)
    }

    fn process(&mut self) -> Result<()> {
        Err(anyhow::anyhow!("decoder error").into())
    }
}

#[test]
fn test_process_errors_are_counted_not_fatal() {
    init_tracing();
    let pipeline = Pipeline::new("errors");
    let failing = ElementNode::new("failing", AlwaysFails);
    pipeline.add(&failing).unwrap();
    initialize_pipeline(&pipeline, InitFailurePolicy::AbortPipeline).unwrap();

    let scheduler = CooperativeScheduler::default();
    let total = scheduler.run_until_idle(&pipeline, 3).unwrap();
    assert_eq!(total.failed, 3);
    assert_eq!(total.processed, 0);
    assert_eq!(failing.invocation_count(), 3);
}

#[test]
fn test_start_from_yaml_config() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scheduler.yaml");
    let mut file = std::fs::File::create(&path).unwrap();
    write!(
        file,
        "strategy: cooperative\nidle_interval_ms: 2\nmax_passes_per_tick: 3\n"
    )
    .unwrap();

    let config = SchedulerConfig::load(&path).unwrap();
    let pipeline = Pipeline::new("from-config");
    let source = ElementNode::new("source", CountingSource::new(4));
    let collector = Collector::new();
    let seen = collector.seen.clone();
    let sink = ElementNode::new("sink", collector);
    pipeline.add(&source).unwrap();
    pipeline.add(&sink).unwrap();
    source.init().unwrap();
    sink.init().unwrap();
    pipeline.connect(&source, "out", &sink, "in").unwrap();

    let running = start(&pipeline, &config).unwrap();
    assert_eq!(running.worker_count(), 1);
    assert!(wait_until(Duration::from_secs(5), || seen.lock().len() == 4));
    running.stop().unwrap();

    assert_eq!(*seen.lock(), vec![0, 1, 2, 3]);
}

#[test]
fn test_removed_element_stops_being_scheduled() {
    init_tracing();
    let pipeline = Pipeline::new("removal");
    let source = ElementNode::new("source", CountingSource::new(u64::MAX));
    pipeline.add(&source).unwrap();

    let config = SchedulerConfig {
        strategy: SchedulingStrategy::Threaded,
        ..SchedulerConfig::default()
    };
    let running = start(&pipeline, &config).unwrap();
    assert!(wait_until(Duration::from_secs(5), || source.invocation_count() > 0));

    pipeline.remove(source.id()).unwrap();
    let settled = source.invocation_count();
    std::thread::sleep(Duration::from_millis(20));
    assert!(source.invocation_count() <= settled + 1);
    running.stop().unwrap();
}

#[test]
fn test_dropping_running_scheduler_joins_workers() {
    init_tracing();
    let pipeline = Pipeline::new("dropped");
    let source = ElementNode::new("source", CountingSource::new(u64::MAX));
    pipeline.add(&source).unwrap();

    let config = SchedulerConfig {
        strategy: SchedulingStrategy::Threaded,
        ..SchedulerConfig::default()
    };
    let running = start(&pipeline, &config).unwrap();
    assert!(wait_until(Duration::from_secs(5), || source.invocation_count() > 0));

    drop(running);
    let after_drop = source.invocation_count();
    std::thread::sleep(Duration::from_millis(20));
    assert_eq!(source.invocation_count(), after_drop);
    assert!(pipeline.contains(source.id()));
}
