// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::{Debug, Formatter},
          sync::Arc};

use tokio::{select,
            sync::{mpsc::UnboundedReceiver, watch},
            task::JoinSet,
            time::Instant};

use crate::{DEBUG_SEARCHBAR_MOD, LookupResult, OnChangeFn, OnSelectFn, SearchBarEffect,
            SearchBarEffects, SearchBarEvent, SearchBarMachine, SearchBarSnapshot,
            SearchToken};

/// What the [`crate::SearchBar`] handle sends to its event loop task.
#[derive(Debug)]
pub enum LoopSignal<T> {
    Event(SearchBarEvent<T>),
    Shutdown,
}

/// The caller's notification hooks. They run on the event loop task, in the order the
/// effects were produced.
pub struct Callbacks<T> {
    pub maybe_on_select: Option<Arc<OnSelectFn<T>>>,
    pub maybe_on_change: Option<Arc<OnChangeFn>>,
}

impl<T> Debug for Callbacks<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callbacks")
            .field("maybe_on_select", &self.maybe_on_select.is_some())
            .field("maybe_on_change", &self.maybe_on_change.is_some())
            .finish()
    }
}

type LookupTasks<T> = JoinSet<(SearchToken, LookupResult<T>)>;

/// Runs one search bar until it receives [`LoopSignal::Shutdown`] or every sender is
/// dropped.
///
/// Each iteration waits on exactly one of:
/// 1. the next signal from the handle,
/// 2. a finished lookup task,
/// 3. the earliest machine timer (debounce or blur grace).
///
/// The outcome is applied to the machine before anything else is polled, and a new
/// snapshot is published only if the revision moved. On exit the machine is disposed
/// and outstanding lookups are aborted, so nothing can touch state afterwards.
pub async fn run_event_loop<T>(
    mut machine: SearchBarMachine<T>,
    callbacks: Callbacks<T>,
    mut signal_receiver: UnboundedReceiver<LoopSignal<T>>,
    snapshot_sender: watch::Sender<SearchBarSnapshot<T>>,
) where
    T: Clone + Send + Sync + 'static,
{
    let mut lookup_tasks: LookupTasks<T> = JoinSet::new();

    let effects = machine.mount();
    process_effects(effects, &callbacks, &mut lookup_tasks);
    let mut last_published_revision = publish_if_changed(&machine, &snapshot_sender, None);

    loop {
        let maybe_deadline = machine.next_deadline();

        select! {
            biased;

            // This branch is cancel safe because recv is cancel safe.
            maybe_signal = signal_receiver.recv() => {
                match maybe_signal {
                    Some(LoopSignal::Event(event)) => {
                        let effects = machine.apply(event, Instant::now());
                        process_effects(effects, &callbacks, &mut lookup_tasks);
                    }
                    Some(LoopSignal::Shutdown) | None => {
                        DEBUG_SEARCHBAR_MOD.then(|| {
                            // % is Display, ? is Debug.
                            tracing::debug!(message = "event loop shutting down");
                        });
                        break;
                    }
                }
            }

            // This branch is cancel safe because join_next is cancel safe.
            Some(joined) = lookup_tasks.join_next(), if !lookup_tasks.is_empty() => {
                match joined {
                    Ok((token, result)) => {
                        let applied = machine.ingest_lookup(token, result);
                        DEBUG_SEARCHBAR_MOD.then(|| {
                            // % is Display, ? is Debug.
                            tracing::debug!(
                                message = "lookup finished",
                                token = %token,
                                applied = %applied
                            );
                        });
                    }
                    Err(join_error) => {
                        // Panics are caught inside the task, so this is a cancellation.
                        tracing::warn!(message = "lookup task did not complete", error = %join_error);
                    }
                }
            }

            () = sleep_until_maybe(maybe_deadline) => {
                let effects = machine.fire_due_timers(Instant::now());
                process_effects(effects, &callbacks, &mut lookup_tasks);
            }
        }

        last_published_revision =
            publish_if_changed(&machine, &snapshot_sender, last_published_revision);
    }

    machine.dispose();
    lookup_tasks.abort_all();
}

/// Never completes if there is no deadline.
async fn sleep_until_maybe(maybe_deadline: Option<Instant>) {
    match maybe_deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

fn process_effects<T>(
    effects: SearchBarEffects<T>,
    callbacks: &Callbacks<T>,
    lookup_tasks: &mut LookupTasks<T>,
) where
    T: Send + 'static,
{
    for effect in effects {
        match effect {
            SearchBarEffect::Select(item) => {
                if let Some(on_select) = &callbacks.maybe_on_select {
                    on_select(&item);
                }
            }
            SearchBarEffect::QueryChanged(text) => {
                if let Some(on_change) = &callbacks.maybe_on_change {
                    on_change(&text);
                }
            }
            SearchBarEffect::SpawnLookup(pending) => {
                lookup_tasks.spawn(pending.run());
            }
        }
    }
}

/// Returns the revision that is now published.
fn publish_if_changed<T: Clone>(
    machine: &SearchBarMachine<T>,
    snapshot_sender: &watch::Sender<SearchBarSnapshot<T>>,
    maybe_last_revision: Option<u64>,
) -> Option<u64> {
    let revision = machine.revision();
    if maybe_last_revision == Some(revision) {
        return maybe_last_revision;
    }
    snapshot_sender.send_replace(machine.snapshot());
    Some(revision)
}
