//! Concurrent generation-by-generation rewriting of an [`LSystem`].
//!
//! Every [`SymbolInstance`] is expanded by its own tokio task. A run owns a
//! `SyncContext` holding the outstanding-task counter, the completion signal
//! and the [`OutputCollector`]; nothing is shared between runs, so independent
//! expansions may proceed side by side on the same runtime.
//!
//! The counter starts at the number of axiom symbols. A task increments it
//! *before* scheduling each child and releases its own slot once all children
//! are scheduled, so it can only reach zero after the last leaf is collected.

use crate::collector::OutputCollector;
use crate::error::{LSystemError, Result};
use crate::grammar::LSystem;
use crate::instance::{MAX_BRANCHING, SymbolInstance};
use crate::materialize::materialize;
use log::{debug, trace, warn};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::runtime::{Builder, Handle, RuntimeFlavor};
use tokio::sync::oneshot;
use tokio::task::block_in_place;

/// Counters describing how a run was scheduled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExpansionStats {
    /// Expansion tasks spawned, roots included.
    pub tasks_scheduled: usize,
    /// Times the outstanding counter dropped to zero. Always `1` for a finished non-empty run.
    pub counter_zeroed: usize,
    /// Times the completion signal fired. Always `1` for a finished non-empty run.
    pub completion_signals: usize,
}

/// Terminal instances of a finished run, in arrival order.
#[derive(Clone, Debug, Default)]
pub struct Expansion {
    pub terminals: Vec<SymbolInstance>,
    pub stats: ExpansionStats,
}

impl Expansion {
    /// Sorts the terminals structurally and returns their symbols.
    pub fn materialize(self) -> String {
        materialize(self.terminals)
    }
}

/// Synchronization state scoped to a single expansion run.
struct SyncContext {
    system: Arc<LSystem>,
    handle: Handle,
    outstanding: AtomicUsize,
    collector: OutputCollector,
    done: Mutex<Option<oneshot::Sender<()>>>,
    failure: Mutex<Option<LSystemError>>,
    /// Set on the first fatal error; tasks then stop fanning out but still release.
    aborted: AtomicBool,
    scheduled: AtomicUsize,
    zeroed: AtomicUsize,
    signals: AtomicUsize,
}

impl SyncContext {
    fn new(system: Arc<LSystem>, handle: Handle, done: oneshot::Sender<()>) -> Self {
        Self {
            outstanding: AtomicUsize::new(system.axiom.len()),
            system,
            handle,
            collector: OutputCollector::new(),
            done: Mutex::new(Some(done)),
            failure: Mutex::new(None),
            aborted: AtomicBool::new(false),
            scheduled: AtomicUsize::new(0),
            zeroed: AtomicUsize::new(0),
            signals: AtomicUsize::new(0),
        }
    }

    /// Spawns a task for an instance whose slot is already counted.
    fn spawn(self: &Arc<Self>, instance: SymbolInstance) {
        self.scheduled.fetch_add(1, Ordering::Relaxed);
        let ctx = Arc::clone(self);
        self.handle.spawn(async move { ctx.run(instance) });
    }

    fn schedule(self: &Arc<Self>, instance: SymbolInstance) {
        self.outstanding.fetch_add(1, Ordering::AcqRel);
        self.spawn(instance);
    }

    fn run(self: Arc<Self>, instance: SymbolInstance) {
        self.guarded(|ctx| ctx.step(&instance));
    }

    /// Runs one task body while holding its counter slot.
    fn guarded<F>(self: &Arc<Self>, body: F)
    where
        F: FnOnce(&Arc<Self>) -> Result<()>,
    {
        let _slot = TaskSlot(self);
        if self.aborted.load(Ordering::Acquire) {
            return;
        }
        if let Err(err) = body(self) {
            self.fail(err);
        }
    }

    fn step(self: &Arc<Self>, instance: &SymbolInstance) -> Result<()> {
        let production = match self.system.grammar.production(instance.symbol) {
            Some(production) if instance.generation < self.system.max_generation => production,
            _ => {
                trace!(
                    "terminal '{}' at generation {} ({:?})",
                    instance.symbol, instance.generation, instance.position
                );
                return self.collector.insert(instance.clone());
            }
        };

        if production.len() > MAX_BRANCHING {
            return Err(LSystemError::PositionOverflow {
                symbol: instance.symbol,
                len: production.len(),
            });
        }

        for (index, &symbol) in production.iter().enumerate() {
            let child = instance.child(symbol, index)?;
            self.schedule(child);
        }
        Ok(())
    }

    fn fail(&self, err: LSystemError) {
        self.aborted.store(true, Ordering::Release);
        let mut slot = match self.failure.lock() {
            Ok(slot) => slot,
            Err(poisoned) => poisoned.into_inner(),
        };
        if slot.is_none() {
            warn!("aborting expansion: {err}");
            *slot = Some(err);
        }
    }

    fn release(&self) {
        if self.outstanding.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.zeroed.fetch_add(1, Ordering::AcqRel);
            self.signal_completion();
        }
    }

    fn signal_completion(&self) {
        let sender = match self.done.lock() {
            Ok(mut done) => done.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(sender) = sender {
            self.signals.fetch_add(1, Ordering::AcqRel);
            // The receiver only disappears if the caller stopped waiting.
            let _ = sender.send(());
        }
    }

    fn take_failure(&self) -> Option<LSystemError> {
        match self.failure.lock() {
            Ok(mut slot) => slot.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        }
    }
}

/// Releases one outstanding slot when a task finishes, including by panic.
struct TaskSlot<'a>(&'a SyncContext);

impl Drop for TaskSlot<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            self.0
                .fail(LSystemError::ExpansionFailure("expansion task panicked".into()));
        }
        self.0.release();
    }
}

/// Schedules expansion runs on a tokio runtime.
#[derive(Clone, Debug)]
pub struct ExpansionEngine {
    handle: Handle,
}

impl ExpansionEngine {
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Uses the runtime the caller is currently running on.
    pub fn try_current() -> Result<Self> {
        Handle::try_current()
            .map(Self::new)
            .map_err(|e| LSystemError::ExpansionFailure(e.to_string()))
    }

    /// Rewrites every axiom symbol until the generation limit and collects the leaves.
    ///
    /// Resolves once the whole tree has been expanded. The first fatal error of
    /// the run (for instance [`LSystemError::PositionOverflow`]) is returned
    /// instead of any partial result.
    pub async fn expand(&self, system: impl Into<Arc<LSystem>>) -> Result<Expansion> {
        let system = system.into();
        if system.axiom.is_empty() {
            return Ok(Expansion::default());
        }
        debug!(
            "expanding {} root symbols over {} generations",
            system.axiom.len(),
            system.max_generation
        );

        let (done_tx, done_rx) = oneshot::channel();
        let ctx = Arc::new(SyncContext::new(
            Arc::clone(&system),
            self.handle.clone(),
            done_tx,
        ));
        for (index, &symbol) in system.axiom.iter().enumerate() {
            ctx.spawn(SymbolInstance::root(symbol, index));
        }

        done_rx.await.map_err(|_| {
            LSystemError::ExpansionFailure("runtime dropped the expansion before completion".into())
        })?;

        if let Some(err) = ctx.take_failure() {
            return Err(err);
        }
        let terminals = ctx.collector.drain()?;
        let stats = ExpansionStats {
            tasks_scheduled: ctx.scheduled.load(Ordering::Acquire),
            counter_zeroed: ctx.zeroed.load(Ordering::Acquire),
            completion_signals: ctx.signals.load(Ordering::Acquire),
        };
        debug!(
            "expansion complete: {} terminals from {} tasks",
            terminals.len(),
            stats.tasks_scheduled
        );
        Ok(Expansion { terminals, stats })
    }
}

/// Expands `system`, blocking the caller until the run completes.
///
/// Outside a runtime a fresh multi-threaded one is started. Inside a
/// multi-threaded runtime the run is scheduled on it and the current worker
/// blocks in place. A current-thread runtime cannot be blocked without
/// starving the expansion, so that case fails; await
/// [`ExpansionEngine::expand`] there instead.
pub fn expand_blocking(system: impl Into<Arc<LSystem>>) -> Result<Expansion> {
    match Handle::try_current() {
        Ok(handle) => match handle.runtime_flavor() {
            RuntimeFlavor::MultiThread => {
                let engine = ExpansionEngine::new(handle.clone());
                block_in_place(|| handle.block_on(engine.expand(system)))
            }
            _ => Err(LSystemError::ExpansionFailure(
                "cannot block inside a current-thread runtime; await ExpansionEngine::expand"
                    .into(),
            )),
        },
        Err(_) => {
            let runtime = Builder::new_multi_thread().build()?;
            let engine = ExpansionEngine::new(runtime.handle().clone());
            runtime.block_on(engine.expand(system))
        }
    }
}
