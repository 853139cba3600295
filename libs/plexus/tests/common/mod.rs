// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

// Shared elements and helpers for integration tests. Not every test binary
// uses every item.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use plexus::prelude::*;
use tracing_subscriber::EnvFilter;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

/// Poll `condition` until it holds or `timeout` elapses.
pub fn wait_until(timeout: std::time::Duration, condition: impl Fn() -> bool) -> bool {
    let deadline = std::time::Instant::now() + timeout;
    while std::time::Instant::now() < deadline {
        if condition() {
            return true;
        }
        std::thread::sleep(std::time::Duration::from_millis(2));
    }
    condition()
}

/// Emits `0..limit` on `out`, one value per invocation.
pub struct CountingSource {
    pub output: Ref<TypedOutputPin<u64>>,
    next: u64,
    limit: u64,
}

impl CountingSource {
    pub fn new(limit: u64) -> Self {
        Self {
            output: TypedOutputPin::new("out"),
            next: 0,
            limit,
        }
    }
}

impl Element for CountingSource {
    fn init(&mut self, pins: &mut PinRegistry) -> Result<ElementState> {
        pins.add_output_pin(self.output.clone())?;
        Ok(ElementState::Ready)
    }

    fn is_ready_for_processing(&self, _pins: &PinRegistry) -> bool {
        self.next < self.limit
    }

    fn process(&mut self) -> Result<()> {
        self.output.put(self.next)?;
        self.next += 1;
        Ok(())
    }
}

/// Multiplies each value on `in` by two and writes it to `out`.
pub struct Doubler {
    pub input: Ref<TypedInputPin<u64>>,
    pub output: Ref<TypedOutputPin<u64>>,
}

impl Default for Doubler {
    fn default() -> Self {
        Self {
            input: TypedInputPin::new("in"),
            output: TypedOutputPin::new("out"),
        }
    }
}

impl Element for Doubler {
    fn init(&mut self, pins: &mut PinRegistry) -> Result<ElementState> {
        pins.add_input_pin(self.input.clone())?;
        pins.add_output_pin(self.output.clone())?;
        Ok(ElementState::NotReady)
    }

    fn process(&mut self) -> Result<()> {
        if let Some(value) = self.input.take()? {
            self.output.put(value * 2)?;
        }
        Ok(())
    }
}

/// Records every value that arrives on `in`.
pub struct Collector {
    pub input: Ref<TypedInputPin<u64>>,
    pub seen: Arc<Mutex<Vec<u64>>>,
}

impl Collector {
    pub fn new() -> Self {
        Self {
            input: TypedInputPin::new("in"),
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl Element for Collector {
    fn init(&mut self, pins: &mut PinRegistry) -> Result<ElementState> {
        pins.add_input_pin(self.input.clone())?;
        Ok(ElementState::NotReady)
    }

    fn process(&mut self) -> Result<()> {
        if let Some(value) = self.input.take()? {
            self.seen.lock().push(value);
        }
        Ok(())
    }
}

/// Counts calls to each capability method.
#[derive(Clone, Default)]
pub struct CallCounters {
    pub init: Arc<AtomicUsize>,
    pub process: Arc<AtomicUsize>,
}

impl CallCounters {
    pub fn init_calls(&self) -> usize {
        self.init.load(Ordering::SeqCst)
    }

    pub fn process_calls(&self) -> usize {
        self.process.load(Ordering::SeqCst)
    }
}

/// Required input that nothing ever feeds.
pub struct Starved {
    pub input: Ref<TypedInputPin<u64>>,
    pub calls: CallCounters,
}

impl Starved {
    pub fn new(calls: CallCounters) -> Self {
        Self {
            input: TypedInputPin::new("in"),
            calls,
        }
    }
}

impl Element for Starved {
    fn init(&mut self, pins: &mut PinRegistry) -> Result<ElementState> {
        self.calls.init.fetch_add(1, Ordering::SeqCst);
        pins.add_input_pin(self.input.clone())?;
        Ok(ElementState::NotReady)
    }

    fn process(&mut self) -> Result<()> {
        self.calls.process.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
