//! Out-of-band channel for parameter-table misses.
//!
//! A missing table entry is not an error: the lookup returns a zero coupling
//! and reports one [`TableMiss`] to a [`DiagnosticSink`]. Sinks are shared by
//! every thread evaluating bonds, so recording must not block the computation.
use crate::params::{BondLabel, Shell};
use log::warn;
use std::fmt;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// What was absent from the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissKind {
    /// No parameter set is registered for the bond at this shell
    Set,
    /// The set exists but has no entry for the symmetry label
    Label,
}

/// One failed parameter lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableMiss {
    pub bond: BondLabel,
    pub shell: Shell,
    pub label: String,
    pub kind: MissKind,
}

impl fmt::Display for TableMiss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            MissKind::Set => write!(
                f,
                "There is no parameter set PARAMS_{}{} for [{}]",
                self.bond,
                self.shell.suffix(),
                self.label
            ),
            MissKind::Label => write!(
                f,
                "There is no parameter PARAMS_{}{}[{}] in the dictionary",
                self.bond,
                self.shell.suffix(),
                self.label
            ),
        }
    }
}

/// Receiver for table misses.
pub trait DiagnosticSink: Send + Sync {
    fn record(&self, miss: &TableMiss);
}

/// Discard every miss.
impl DiagnosticSink for () {
    #[inline(always)]
    fn record(&self, _miss: &TableMiss) {}
}

impl<T: DiagnosticSink + ?Sized> DiagnosticSink for &T {
    #[inline(always)]
    fn record(&self, miss: &TableMiss) {
        (**self).record(miss)
    }
}

/// Emit each miss as a `log::warn!` record.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn record(&self, miss: &TableMiss) {
        warn!("parameter not tabulated: {}", miss);
    }
}

/// Count misses with a single atomic.
#[derive(Debug, Default)]
pub struct MissCounter {
    count: AtomicUsize,
}

impl MissCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.count.load(Ordering::Relaxed)
    }

    pub fn reset(&self) -> usize {
        self.count.swap(0, Ordering::Relaxed)
    }
}

impl DiagnosticSink for MissCounter {
    #[inline(always)]
    fn record(&self, _miss: &TableMiss) {
        self.count.fetch_add(1, Ordering::Relaxed);
    }
}

/// Keep every miss for later aggregation.
#[derive(Debug, Default)]
pub struct MissCollector {
    misses: Mutex<Vec<TableMiss>>,
}

impl MissCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded misses.
    pub fn misses(&self) -> Vec<TableMiss> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drain the recorded misses.
    pub fn take(&self) -> Vec<TableMiss> {
        std::mem::take(&mut *self.lock())
    }

    // a panicking recorder cannot leave the vector half-written
    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<TableMiss>> {
        self.misses.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl DiagnosticSink for MissCollector {
    fn record(&self, miss: &TableMiss) {
        self.lock().push(miss.clone());
    }
}
