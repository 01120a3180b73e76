//! Scripted registry.
//!
//! # Toyota Way: Genchi Genbutsu (現地現物)
//! Go and see: every query is recorded so tests can check how often the
//! registry was actually asked.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use enlace_core::{CapabilityType, Instance, Qualifier, Registry, ResolveError, instance};
use parking_lot::Mutex;

/// One scripted registry answer.
#[derive(Clone)]
pub enum Answer {
    /// Answer with this entry.
    Found(Instance),
    /// Answer with no match.
    Unsatisfied,
}

impl Answer {
    /// Answer with `handle` as the entry for `C`.
    ///
    /// `C` must name the contract (`Answer::found::<dyn TaskExecutor>(..)` or
    /// an `Arc<dyn ..>` handle); a concrete handle yields an entry the
    /// resolver cannot downcast to the contract.
    #[must_use]
    pub fn found<C: ?Sized + Send + Sync + 'static>(handle: Arc<C>) -> Self {
        Self::Found(instance(handle))
    }
}

impl std::fmt::Debug for Answer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Found(_) => f.write_str("Found(..)"),
            Self::Unsatisfied => f.write_str("Unsatisfied"),
        }
    }
}

/// A query the registry received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRecord {
    /// Capability asked for.
    pub capability: CapabilityType,
    /// Qualifier asked with.
    pub qualifier: Option<Qualifier>,
}

type ScriptKey = (CapabilityType, Option<Qualifier>);

/// Answers queued for one key; the last answer repeats once the queue drains.
struct Script {
    queue: VecDeque<Answer>,
    steady: Answer,
}

impl Script {
    fn next(&mut self) -> Answer {
        self.queue.pop_front().unwrap_or_else(|| self.steady.clone())
    }
}

/// Registry whose answers are scripted per capability and qualifier.
///
/// Keys without a script answer [`Answer::Unsatisfied`].
#[derive(Default)]
pub struct ScriptedRegistry {
    scripts: Mutex<HashMap<ScriptKey, Script>>,
    log: Mutex<Vec<QueryRecord>>,
    unreachable: AtomicBool,
}

impl ScriptedRegistry {
    /// Creates a registry with no scripts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Always answers `handle` for `C` under `qualifier`.
    ///
    /// The script is keyed by `C`; pass it with a turbofish
    /// (`provide::<dyn TaskExecutor>(..)`) so it is not inferred from the
    /// concrete handle.
    pub fn provide<C: ?Sized + Send + Sync + 'static>(
        &self,
        qualifier: Option<Qualifier>,
        handle: Arc<C>,
    ) -> &Self {
        self.script::<C>(qualifier, [Answer::found(handle)])
    }

    /// Answers `answers` in order for `C` under `qualifier`, then keeps
    /// repeating the last one. An empty script means always unsatisfied.
    pub fn script<C: ?Sized + 'static>(
        &self,
        qualifier: Option<Qualifier>,
        answers: impl IntoIterator<Item = Answer>,
    ) -> &Self {
        let mut queue: VecDeque<Answer> = answers.into_iter().collect();
        let steady = queue.back().cloned().unwrap_or(Answer::Unsatisfied);
        if queue.len() == 1 {
            queue.clear();
        }
        self.scripts
            .lock()
            .insert((CapabilityType::of::<C>(), qualifier), Script { queue, steady });
        self
    }

    /// Stops answering for `C` under `qualifier`.
    pub fn withdraw<C: ?Sized + 'static>(&self, qualifier: Option<Qualifier>) -> &Self {
        self.script::<C>(qualifier, [])
    }

    /// Makes every later query fail (or succeed again).
    pub fn set_unreachable(&self, unreachable: bool) {
        self.unreachable.store(unreachable, Ordering::SeqCst);
    }

    /// Returns every query received so far.
    #[must_use]
    pub fn queries(&self) -> Vec<QueryRecord> {
        self.log.lock().clone()
    }

    /// Returns the total number of queries received.
    #[must_use]
    pub fn query_count(&self) -> usize {
        self.log.lock().len()
    }

    /// Returns how many queries asked for `C`, under any qualifier.
    #[must_use]
    pub fn queries_for<C: ?Sized + 'static>(&self) -> usize {
        let capability = CapabilityType::of::<C>();
        self.log
            .lock()
            .iter()
            .filter(|record| record.capability == capability)
            .count()
    }
}

impl Registry for ScriptedRegistry {
    fn query(
        &self,
        capability: CapabilityType,
        qualifier: Option<&Qualifier>,
    ) -> enlace_core::Result<Option<Instance>> {
        self.log.lock().push(QueryRecord {
            capability,
            qualifier: qualifier.cloned(),
        });

        if self.unreachable.load(Ordering::SeqCst) {
            return Err(ResolveError::unreachable("scripted registry is unreachable"));
        }

        let answer = self
            .scripts
            .lock()
            .get_mut(&(capability, qualifier.cloned()))
            .map_or(Answer::Unsatisfied, Script::next);
        tracing::trace!(capability = %capability, answer = ?answer, "scripted answer");

        Ok(match answer {
            Answer::Found(entry) => Some(entry),
            Answer::Unsatisfied => None,
        })
    }
}
