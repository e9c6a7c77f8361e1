//! Record hooks
//!
//! A `HookCore` wraps a writer chain and shows every record it writes to a
//! fixed list of callbacks. Callbacks receive the complete field set of the
//! record (fields accumulated through `with` first, call-site fields after),
//! which is the same set the sink persists. The wrapped chain receives only
//! the call-site fields, since it accumulates its own copy of the rest.
//!
//! Each callback runs in isolation: a panic is caught, counted and reported,
//! and neither the remaining callbacks nor the backend write are skipped.
//! Callbacks run while no sink lock is held.
//!
//! A hook set is never re-entered on one thread: a record emitted from
//! inside a hook reaches the backend without passing through the same set
//! again. Hook sets of other roots still run.

use super::{
    error::Result,
    field::Field,
    log_entry::LogEntry,
    metrics::LoggerMetrics,
    writer::{panic_message, WriterChain},
};
use std::cell::RefCell;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// Callback observing every emitted record
pub type Hook = Arc<dyn Fn(&LogEntry, &[Field]) + Send + Sync>;

thread_local! {
    /// Addresses of the hook sets running on this thread
    static ACTIVE_HOOKS: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };
}

/// Marks one hook set as running on the current thread until dropped
struct HookScope {
    id: usize,
}

impl HookScope {
    /// `None` if `hooks` is already running on this thread
    fn enter(hooks: &Arc<[Hook]>) -> Option<Self> {
        let id = Arc::as_ptr(hooks) as *const () as usize;
        ACTIVE_HOOKS.with(|active| {
            let mut active = active.borrow_mut();
            if active.contains(&id) {
                None
            } else {
                active.push(id);
                Some(HookScope { id })
            }
        })
    }
}

impl Drop for HookScope {
    fn drop(&mut self) {
        ACTIVE_HOOKS.with(|active| active.borrow_mut().retain(|id| *id != self.id));
    }
}

pub struct HookCore {
    inner: Box<WriterChain>,
    hooks: Arc<[Hook]>,
    context: Vec<Field>,
    metrics: Arc<LoggerMetrics>,
}

impl HookCore {
    pub fn new(inner: WriterChain, hooks: Vec<Hook>, metrics: Arc<LoggerMetrics>) -> Self {
        Self {
            inner: Box::new(inner),
            hooks: hooks.into(),
            context: Vec::new(),
            metrics,
        }
    }

    pub fn inner(&self) -> &WriterChain {
        &self.inner
    }

    /// Fields accumulated by every `with` applied to this layer
    pub fn context(&self) -> &[Field] {
        &self.context
    }

    /// Derive a layer over a derived inner chain, remembering `fields`
    pub fn with(&self, fields: &[Field]) -> HookCore {
        let mut context = Vec::with_capacity(self.context.len() + fields.len());
        context.extend_from_slice(&self.context);
        context.extend_from_slice(fields);

        HookCore {
            inner: Box::new(self.inner.with(fields)),
            hooks: Arc::clone(&self.hooks),
            context,
            metrics: Arc::clone(&self.metrics),
        }
    }

    pub fn write(&self, entry: &LogEntry, fields: &[Field]) -> Result<()> {
        if !self.inner.enabled(entry.level) {
            return Ok(());
        }

        // A hook logging through its own lineage still reaches the sink
        if let Some(_scope) = HookScope::enter(&self.hooks) {
            let merged: Vec<Field> = self.context.iter().chain(fields).cloned().collect();
            self.run_hooks(entry, &merged);
        }

        self.inner.write(entry, fields)
    }

    fn run_hooks(&self, entry: &LogEntry, merged: &[Field]) {
        for (idx, hook) in self.hooks.iter().enumerate() {
            self.metrics.record_hook_invocation();

            let outcome = catch_unwind(AssertUnwindSafe(|| hook(entry, merged)));
            if let Err(panic_info) = outcome {
                self.metrics.record_hook_failure();
                eprintln!(
                    "[LOGGER CRITICAL] Hook #{} panicked: {}. \
                     The record is still written.",
                    idx,
                    panic_message(&*panic_info)
                );
            }
        }
    }
}
