// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::{Debug, Formatter},
          future::Future,
          panic::AssertUnwindSafe,
          sync::Arc};

use futures_util::{FutureExt, future::BoxFuture};

/// What a lookup produced. [`LookupResponse::Nothing`] stands for "no usable list" and
/// is normalized into an empty result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupResponse<T> {
    Items(Vec<T>),
    Nothing,
}

impl<T> LookupResponse<T> {
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        match self {
            LookupResponse::Items(items) => items,
            LookupResponse::Nothing => vec![],
        }
    }
}

impl<T> From<Vec<T>> for LookupResponse<T> {
    fn from(items: Vec<T>) -> Self { LookupResponse::Items(items) }
}

impl<T> From<Option<Vec<T>>> for LookupResponse<T> {
    fn from(maybe_items: Option<Vec<T>>) -> Self {
        match maybe_items {
            Some(items) => LookupResponse::Items(items),
            None => LookupResponse::Nothing,
        }
    }
}

pub type LookupResult<T> = miette::Result<LookupResponse<T>>;

pub type LookupFuture<T> = BoxFuture<'static, LookupResult<T>>;

pub type SyncLookupFn<T> = dyn Fn(&str) -> LookupResult<T> + Send + Sync;

pub type AsyncLookupFn<T> = dyn Fn(String) -> LookupFuture<T> + Send + Sync;

/// The caller supplied search function. It may answer right away ([`Lookup::from_sync`])
/// or eventually ([`Lookup::from_async`]). Either way it may fail, and a panic inside it
/// is treated the same as an `Err`.
pub enum Lookup<T> {
    Sync(Arc<SyncLookupFn<T>>),
    Async(Arc<AsyncLookupFn<T>>),
}

/// The result of calling [`Lookup::invoke`].
pub enum Invocation<T> {
    Ready(LookupResult<T>),
    Pending(LookupFuture<T>),
}

impl<T> Clone for Lookup<T> {
    fn clone(&self) -> Self {
        match self {
            Lookup::Sync(it) => Lookup::Sync(it.clone()),
            Lookup::Async(it) => Lookup::Async(it.clone()),
        }
    }
}

impl<T> Debug for Lookup<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Lookup::Sync(_) => write!(f, "Lookup::Sync"),
            Lookup::Async(_) => write!(f, "Lookup::Async"),
        }
    }
}

impl<T> Debug for Invocation<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Invocation::Ready(_) => write!(f, "Invocation::Ready"),
            Invocation::Pending(_) => write!(f, "Invocation::Pending"),
        }
    }
}

impl<T: Send + 'static> Lookup<T> {
    /// Wraps a function that answers immediately. The returned list can be a `Vec<T>`,
    /// an `Option<Vec<T>>`, or a [`LookupResponse`].
    pub fn from_sync<F, R>(lookup_fn: F) -> Self
    where
        F: Fn(&str) -> miette::Result<R> + Send + Sync + 'static,
        R: Into<LookupResponse<T>>,
    {
        Lookup::Sync(Arc::new(move |query: &str| -> LookupResult<T> {
            lookup_fn(query).map(Into::into)
        }))
    }

    /// Wraps a function that returns a future, e.g. a network call.
    pub fn from_async<F, Fut, R>(lookup_fn: F) -> Self
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = miette::Result<R>> + Send + 'static,
        R: Into<LookupResponse<T>>,
    {
        Lookup::Async(Arc::new(move |query: String| {
            let future = lookup_fn(query);
            async move {
                let result: LookupResult<T> = future.await.map(Into::into);
                result
            }
            .boxed()
        }))
    }
}

impl<T> Lookup<T> {
    /// Calls the function. A panic while calling it is caught here and reported as an
    /// `Err`, for async lookups too, since their closure may panic before it hands back
    /// a future. A panic while polling that future is caught in
    /// [`crate::PendingLookup::run`].
    pub fn invoke(&self, query: &str) -> Invocation<T> {
        match self {
            Lookup::Sync(lookup_fn) => {
                let result = std::panic::catch_unwind(AssertUnwindSafe(|| lookup_fn(query)))
                    .unwrap_or_else(|_| Err(miette::miette!("sync lookup panicked")));
                Invocation::Ready(result)
            }
            Lookup::Async(lookup_fn) => {
                match std::panic::catch_unwind(AssertUnwindSafe(|| {
                    lookup_fn(query.to_string())
                })) {
                    Ok(future) => Invocation::Pending(future),
                    Err(_) => Invocation::Ready(Err(miette::miette!(
                        "async lookup panicked before returning a future"
                    ))),
                }
            }
        }
    }
}
