//! Submission: handler type, failure type, state and outcomes.

use std::fmt;
use std::future::Future;
use std::rc::Rc;

use futures::future::{self, FutureExt};
use thiserror::Error;

use crate::validate::FieldErrors;
use crate::value::FormValues;

pub use futures::future::LocalBoxFuture;

/// Shown when a submit handler fails without a message.
pub const FALLBACK_MESSAGE: &str = "An error occurred";

/// What a submit handler resolves to.
pub type SubmitResult = Result<(), SubmitError>;

// ---------------------------------------------------------------------------
// SubmitError
// ---------------------------------------------------------------------------

/// A failed submit handler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("{0}")]
    Message(String),
    /// No message available.
    #[error("An error occurred")]
    Unknown,
}

impl SubmitError {
    /// An error carrying `message`; an empty message becomes [`SubmitError::Unknown`].
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.is_empty() {
            SubmitError::Unknown
        } else {
            SubmitError::Message(message)
        }
    }

    /// Wrap any error, keeping its display text as the message.
    pub fn from_error(err: &dyn std::error::Error) -> Self {
        Self::new(err.to_string())
    }

    /// The text shown to the user.
    pub fn message(&self) -> &str {
        match self {
            SubmitError::Message(message) => message,
            SubmitError::Unknown => FALLBACK_MESSAGE,
        }
    }
}

impl From<String> for SubmitError {
    fn from(message: String) -> Self {
        SubmitError::new(message)
    }
}

impl From<&str> for SubmitError {
    fn from(message: &str) -> Self {
        SubmitError::new(message)
    }
}

// ---------------------------------------------------------------------------
// SubmitHandler
// ---------------------------------------------------------------------------

#[derive(Clone)]
enum HandlerFn {
    Sync(Rc<dyn Fn(FormValues) -> SubmitResult>),
    Async(Rc<dyn Fn(FormValues) -> LocalBoxFuture<'static, SubmitResult>>),
}

/// A started handler: finished already, or still running.
pub enum Dispatch {
    Done(SubmitResult),
    Pending(LocalBoxFuture<'static, SubmitResult>),
}

/// The caller's `on_submit`, receiving the validated values.
#[derive(Clone)]
pub struct SubmitHandler(HandlerFn);

impl SubmitHandler {
    /// Wrap an async handler.
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn(FormValues) -> Fut + 'static,
        Fut: Future<Output = SubmitResult> + 'static,
    {
        Self(HandlerFn::Async(Rc::new(move |values| f(values).boxed_local())))
    }

    /// Wrap a handler that completes immediately.
    pub fn sync(f: impl Fn(FormValues) -> SubmitResult + 'static) -> Self {
        Self(HandlerFn::Sync(Rc::new(f)))
    }

    /// Start the handler. A sync handler runs to completion here; an async
    /// one runs nothing past its first await until polled.
    pub fn dispatch(&self, values: FormValues) -> Dispatch {
        match &self.0 {
            HandlerFn::Sync(f) => Dispatch::Done(f(values)),
            HandlerFn::Async(f) => Dispatch::Pending(f(values)),
        }
    }

    /// Start the handler as a future, whichever kind it is.
    pub fn call(&self, values: FormValues) -> LocalBoxFuture<'static, SubmitResult> {
        match self.dispatch(values) {
            Dispatch::Done(result) => future::ready(result).boxed_local(),
            Dispatch::Pending(future) => future,
        }
    }

    pub fn is_sync(&self) -> bool {
        matches!(self.0, HandlerFn::Sync(_))
    }
}

impl fmt::Debug for SubmitHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubmitHandler")
            .field("sync", &self.is_sync())
            .finish()
    }
}

impl fmt::Debug for Dispatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dispatch::Done(result) => f.debug_tuple("Done").field(result).finish(),
            Dispatch::Pending(_) => f.write_str("Pending"),
        }
    }
}

// ---------------------------------------------------------------------------
// State and outcomes
// ---------------------------------------------------------------------------

/// Where the form is in the submit flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitState {
    #[default]
    Idle,
    Validating,
    Submitting,
}

/// Result of a submit press, or of settling an in-flight submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Submit was disabled; nothing happened.
    Ignored,
    /// Validation failed; the handler was not called.
    Invalid(FieldErrors),
    /// The handler was called and has not finished yet.
    Pending,
    /// The handler finished successfully (or there was none).
    Submitted,
    /// The handler failed with this message.
    Failed(String),
}

impl Outcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self, Outcome::Submitted)
    }
}
