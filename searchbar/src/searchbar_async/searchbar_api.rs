// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use miette::IntoDiagnostic;
use tokio::{runtime::Handle,
            sync::{mpsc::{UnboundedSender, unbounded_channel},
                   watch},
            task::JoinHandle};

use crate::{AccessibilityAttributes, Callbacks, CommonResult, DEBUG_SEARCHBAR_MOD,
            LoopSignal, NavigationKey, OptionAccessors, SearchBarConfig, SearchBarError,
            SearchBarEvent, SearchBarMachine, SearchBarOptions, SearchBarRenderer,
            SearchBarSnapshot, SearchBarView, run_event_loop};

/// Handle to a running search bar.
///
/// [`spawn()`](Self::spawn) moves a [`SearchBarMachine`] into its own tokio task which
/// owns all the state. This handle only sends events to that task and reads the
/// snapshots it publishes, so it is cheap to use from a render loop.
///
/// The task ends when [`shutdown()`](Self::shutdown) is called or when this handle is
/// dropped. Either way in flight lookups are aborted and their results never reach the
/// state.
#[derive(Debug)]
pub struct SearchBar<T> {
    config: SearchBarConfig,
    signal_sender: UnboundedSender<LoopSignal<T>>,
    snapshot_receiver: watch::Receiver<SearchBarSnapshot<T>>,
    /// Taken by [`shutdown()`](SearchBar::shutdown).
    maybe_join_handle: Option<JoinHandle<()>>,
}

impl<T> SearchBar<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Creates the machine and spawns its event loop on the current tokio runtime. The
    /// search for the starting query begins immediately.
    ///
    /// # Errors
    ///
    /// - [`SearchBarError::InvalidConfig`] if the config does not validate.
    /// - If there is no tokio runtime to spawn on.
    pub fn spawn(options: SearchBarOptions<T>) -> CommonResult<Self> {
        let handle = Handle::try_current().into_diagnostic()?;

        let machine = SearchBarMachine::new(&options)?;
        let config = options.config.clone();
        let callbacks = Callbacks {
            maybe_on_select: options.maybe_on_select,
            maybe_on_change: options.maybe_on_change,
        };

        let (signal_sender, signal_receiver) = unbounded_channel::<LoopSignal<T>>();
        let (snapshot_sender, snapshot_receiver) = watch::channel(machine.snapshot());

        DEBUG_SEARCHBAR_MOD.then(|| {
            // % is Display, ? is Debug.
            tracing::debug!(message = "spawning search bar", config = ?config);
        });

        let join_handle = handle.spawn(run_event_loop(
            machine,
            callbacks,
            signal_receiver,
            snapshot_sender,
        ));

        Ok(Self {
            config,
            signal_sender,
            snapshot_receiver,
            maybe_join_handle: Some(join_handle),
        })
    }

    /// # Errors
    ///
    /// [`SearchBarError::Disposed`] if the event loop is no longer running.
    pub fn send(&self, event: SearchBarEvent<T>) -> CommonResult<()> {
        self.signal_sender
            .send(LoopSignal::Event(event))
            .map_err(|_| SearchBarError::Disposed.into())
    }

    /// # Errors
    ///
    /// See [`send()`](Self::send).
    pub fn text_changed(&self, text: impl Into<String>) -> CommonResult<()> {
        self.send(SearchBarEvent::TextChanged(text.into()))
    }

    /// Replaces the query from the outside. In controlled mode this is how the owner
    /// acknowledges a [`crate::SearchBarEffect::QueryChanged`].
    ///
    /// # Errors
    ///
    /// See [`send()`](Self::send).
    pub fn set_value(&self, value: impl Into<String>) -> CommonResult<()> {
        self.send(SearchBarEvent::SetValue(value.into()))
    }

    /// # Errors
    ///
    /// See [`send()`](Self::send).
    pub fn key_down(&self, key: NavigationKey) -> CommonResult<()> {
        self.send(SearchBarEvent::KeyDown(key))
    }

    /// # Errors
    ///
    /// See [`send()`](Self::send).
    pub fn focus(&self) -> CommonResult<()> { self.send(SearchBarEvent::Focus) }

    /// # Errors
    ///
    /// See [`send()`](Self::send).
    pub fn blur(&self) -> CommonResult<()> { self.send(SearchBarEvent::Blur) }

    /// Pointer press on the option at `index`.
    ///
    /// # Errors
    ///
    /// See [`send()`](Self::send).
    pub fn pointer_select(&self, index: usize) -> CommonResult<()> {
        self.send(SearchBarEvent::OptionPointerDown(index))
    }

    /// `None` hands the result list back to the lookup.
    ///
    /// # Errors
    ///
    /// See [`send()`](Self::send).
    pub fn set_results(&self, maybe_results: Option<Vec<T>>) -> CommonResult<()> {
        self.send(SearchBarEvent::SetResults(maybe_results))
    }

    /// # Errors
    ///
    /// See [`send()`](Self::send).
    pub fn set_disabled(&self, disabled: bool) -> CommonResult<()> {
        self.send(SearchBarEvent::SetDisabled(disabled))
    }

    /// The most recently published state.
    #[must_use]
    pub fn snapshot(&self) -> SearchBarSnapshot<T> { self.snapshot_receiver.borrow().clone() }

    /// A receiver that wakes up each time a new snapshot is published.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SearchBarSnapshot<T>> {
        self.snapshot_receiver.clone()
    }

    #[must_use]
    pub fn config(&self) -> &SearchBarConfig { &self.config }

    /// Rows for the current snapshot.
    #[must_use]
    pub fn view<R>(
        &self,
        renderer: &R,
        accessors: &OptionAccessors<T>,
    ) -> SearchBarView<R::Output>
    where
        R: SearchBarRenderer<T>,
    {
        let snapshot = self.snapshot_receiver.borrow();
        SearchBarView::from_snapshot(&snapshot, renderer, accessors, &self.config.listbox_id)
    }

    /// ARIA attributes for the current snapshot.
    #[must_use]
    pub fn accessibility(&self) -> AccessibilityAttributes {
        let snapshot = self.snapshot_receiver.borrow();
        AccessibilityAttributes::from_snapshot(&snapshot, &self.config)
    }

    /// Stops the event loop and waits for it to finish. Pending timers are dropped and
    /// in flight lookups are aborted. Calling it again is a no-op, and any event sent
    /// afterwards fails with [`SearchBarError::Disposed`].
    ///
    /// # Errors
    ///
    /// If the event loop task panicked or was cancelled.
    pub async fn shutdown(&mut self) -> CommonResult<()> {
        let Some(join_handle) = self.maybe_join_handle.take() else {
            return Ok(());
        };
        // The loop may already be gone, which is fine.
        self.signal_sender.send(LoopSignal::Shutdown).ok();
        join_handle.await.into_diagnostic()
    }

    /// `true` once the event loop has exited.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.maybe_join_handle
            .as_ref()
            .is_none_or(JoinHandle::is_finished)
    }
}
