//! Reactive state: signals, effects, batching.
//!
//! Fine-grained, single-threaded reactivity used by the field binding to
//! notify controls and the form engine of value changes.
//!
//! - [`create_signal`]: create a read/write signal pair.
//! - [`create_effect`]: auto-tracking side effect; [`dispose_effect`] stops it.
//! - [`dispose_signal`]: release a signal once nothing will read it.
//! - [`batch`]: coalesce multiple writes into one notification pass.
//! - [`untrack`]: read without subscribing.

pub mod signal;

pub use signal::{
    batch, create_effect, create_signal, dispose_effect, dispose_signal, untrack, EffectId, ReadSignal, SignalId,
    WriteSignal,
};
