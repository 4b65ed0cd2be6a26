//! Signals, effects and batching on a thread-local runtime.
//!
//! Single-threaded and synchronous: a write notifies every effect that read
//! the signal during its last run. Signals and effects are keyed in slotmaps
//! so disposing either frees its slot.

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::marker::PhantomData;

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Identifies a signal slot inside the runtime.
    pub struct SignalId;

    /// Identifies an effect slot inside the runtime.
    pub struct EffectId;
}

// ---------------------------------------------------------------------------
// Runtime internals
// ---------------------------------------------------------------------------

struct SignalSlot {
    value: Box<dyn Any>,
    subscribers: HashSet<EffectId>,
}

struct EffectSlot {
    /// Taken out while the effect runs so the runtime is not borrowed across
    /// the user callback.
    callback: Option<Box<dyn FnMut()>>,
    dependencies: HashSet<SignalId>,
}

#[derive(Default)]
struct Runtime {
    signals: SlotMap<SignalId, SignalSlot>,
    effects: SlotMap<EffectId, EffectSlot>,
    /// The effect currently executing (for auto-tracking).
    tracking: Option<EffectId>,
    /// Nesting depth of `batch` calls.
    batch_depth: usize,
    /// Effects to run once the outermost batch (or notification pass) ends.
    pending: Vec<EffectId>,
    /// Set while the notification loop runs; nested writes queue instead.
    flushing: bool,
}

thread_local! {
    static RUNTIME: RefCell<Runtime> = RefCell::new(Runtime::default());
}

fn with_runtime<R>(f: impl FnOnce(&mut Runtime) -> R) -> R {
    RUNTIME.with(|rt| f(&mut rt.borrow_mut()))
}

// ---------------------------------------------------------------------------
// Signal creation
// ---------------------------------------------------------------------------

/// Create a reactive signal with the given initial value.
///
/// Reading the returned [`ReadSignal`] inside an effect subscribes that effect;
/// writing through the [`WriteSignal`] re-runs every subscriber.
pub fn create_signal<T: 'static>(initial: T) -> (ReadSignal<T>, WriteSignal<T>) {
    let id = with_runtime(|rt| {
        rt.signals.insert(SignalSlot {
            value: Box::new(initial),
            subscribers: HashSet::new(),
        })
    });
    (
        ReadSignal { id, _marker: PhantomData },
        WriteSignal { id, _marker: PhantomData },
    )
}

// ---------------------------------------------------------------------------
// ReadSignal
// ---------------------------------------------------------------------------

/// Read-half of a signal. `Copy`; only stores an id.
pub struct ReadSignal<T: 'static> {
    id: SignalId,
    _marker: PhantomData<T>,
}

impl<T: 'static> Copy for ReadSignal<T> {}
impl<T: 'static> Clone for ReadSignal<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> fmt::Debug for ReadSignal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadSignal").field("id", &self.id).finish()
    }
}

impl<T: 'static> ReadSignal<T> {
    pub fn id(&self) -> SignalId {
        self.id
    }

    /// Read the current value, subscribing the running effect (if any).
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.with(T::clone)
    }

    /// Read by reference, subscribing the running effect (if any).
    ///
    /// `f` runs while the runtime is borrowed and must not touch other signals.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        with_runtime(|rt| {
            if let Some(eid) = rt.tracking {
                if let Some(slot) = rt.signals.get_mut(self.id) {
                    slot.subscribers.insert(eid);
                }
                if let Some(effect) = rt.effects.get_mut(eid) {
                    effect.dependencies.insert(self.id);
                }
            }
        });
        self.with_untracked(f)
    }

    /// Read without subscribing the running effect.
    pub fn get_untracked(&self) -> T
    where
        T: Clone,
    {
        self.with_untracked(T::clone)
    }

    fn with_untracked<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        RUNTIME.with(|rt| {
            let rt = rt.borrow();
            let value = rt
                .signals
                .get(self.id)
                .and_then(|slot| slot.value.downcast_ref::<T>())
                .expect("signal read after runtime reset or with mismatched type");
            f(value)
        })
    }
}

// ---------------------------------------------------------------------------
// WriteSignal
// ---------------------------------------------------------------------------

/// Write-half of a signal. `Copy`; only stores an id.
pub struct WriteSignal<T: 'static> {
    id: SignalId,
    _marker: PhantomData<T>,
}

impl<T: 'static> Copy for WriteSignal<T> {}
impl<T: 'static> Clone for WriteSignal<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> fmt::Debug for WriteSignal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriteSignal").field("id", &self.id).finish()
    }
}

impl<T: 'static> WriteSignal<T> {
    pub fn id(&self) -> SignalId {
        self.id
    }

    /// Overwrite the value and notify subscribers.
    pub fn set(&self, value: T) {
        self.update(|slot| *slot = value);
    }

    /// Mutate the value in place and notify subscribers.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let subscribers = with_runtime(|rt| {
            let Some(slot) = rt.signals.get_mut(self.id) else {
                return Vec::new();
            };
            if let Some(value) = slot.value.downcast_mut::<T>() {
                f(value);
            }
            slot.subscribers.iter().copied().collect::<Vec<_>>()
        });
        notify(subscribers);
    }
}

// ---------------------------------------------------------------------------
// Effects
// ---------------------------------------------------------------------------

/// Create a side-effect that auto-tracks signal reads.
///
/// The closure runs immediately once (establishing its subscriptions), then
/// again whenever a tracked signal changes, until disposed.
pub fn create_effect(f: impl FnMut() + 'static) -> EffectId {
    let eid = with_runtime(|rt| {
        rt.effects.insert(EffectSlot {
            callback: Some(Box::new(f)),
            dependencies: HashSet::new(),
        })
    });
    run_effect(eid);
    eid
}

/// Stop an effect and release its slot. Unknown ids are ignored.
pub fn dispose_effect(eid: EffectId) {
    with_runtime(|rt| {
        if let Some(effect) = rt.effects.remove(eid) {
            for sid in effect.dependencies {
                if let Some(slot) = rt.signals.get_mut(sid) {
                    slot.subscribers.remove(&eid);
                }
            }
        }
    });
}

/// Release a signal's slot and unhook it from every effect that read it.
/// Unknown ids are ignored; reading a disposed signal panics.
pub fn dispose_signal(sid: SignalId) {
    with_runtime(|rt| {
        if let Some(slot) = rt.signals.remove(sid) {
            for eid in slot.subscribers {
                if let Some(effect) = rt.effects.get_mut(eid) {
                    effect.dependencies.remove(&sid);
                }
            }
        }
    });
}

/// Run `f` with tracking suspended: signal reads inside do not subscribe the
/// surrounding effect.
pub fn untrack<R>(f: impl FnOnce() -> R) -> R {
    let prev = with_runtime(|rt| rt.tracking.take());
    let result = f();
    with_runtime(|rt| rt.tracking = prev);
    result
}

/// Group several writes so that each affected effect runs once, after `f`.
pub fn batch<R>(f: impl FnOnce() -> R) -> R {
    with_runtime(|rt| rt.batch_depth += 1);
    let result = f();
    let outermost = with_runtime(|rt| {
        rt.batch_depth -= 1;
        rt.batch_depth == 0
    });
    if outermost {
        notify(Vec::new());
    }
    result
}

/// Drop every signal and effect on this thread.
#[cfg(test)]
pub(crate) fn reset_runtime() {
    RUNTIME.with(|rt| *rt.borrow_mut() = Runtime::default());
}

/// Number of signals alive on this thread.
#[cfg(test)]
pub(crate) fn live_signals() -> usize {
    with_runtime(|rt| rt.signals.len())
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Run one effect: drop old dependency edges, track, execute.
fn run_effect(eid: EffectId) {
    let callback = with_runtime(|rt| {
        let effect = rt.effects.get_mut(eid)?;
        let old: Vec<SignalId> = effect.dependencies.drain().collect();
        let callback = effect.callback.take();
        for sid in old {
            if let Some(slot) = rt.signals.get_mut(sid) {
                slot.subscribers.remove(&eid);
            }
        }
        callback
    });
    let Some(mut callback) = callback else {
        return;
    };

    let prev = with_runtime(|rt| rt.tracking.replace(eid));
    callback();
    with_runtime(|rt| {
        rt.tracking = prev;
        // The callback may have disposed its own effect.
        if let Some(effect) = rt.effects.get_mut(eid) {
            effect.callback = Some(callback);
        }
    });
}

/// Queue `subscribers` and, unless batching or already flushing, run every
/// queued effect until the queue drains.
fn notify(subscribers: Vec<EffectId>) {
    let should_flush = with_runtime(|rt| {
        rt.pending.extend(subscribers);
        let idle = rt.batch_depth == 0 && !rt.flushing && !rt.pending.is_empty();
        if idle {
            rt.flushing = true;
        }
        idle
    });
    if !should_flush {
        return;
    }

    loop {
        let round = with_runtime(|rt| std::mem::take(&mut rt.pending));
        if round.is_empty() {
            break;
        }
        let mut seen = HashSet::new();
        for eid in round {
            if seen.insert(eid) {
                run_effect(eid);
            }
        }
    }
    with_runtime(|rt| rt.flushing = false);
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counter() -> (Rc<Cell<usize>>, impl Fn() -> usize) {
        let c = Rc::new(Cell::new(0));
        let read = {
            let c = c.clone();
            move || c.get()
        };
        (c, read)
    }

    #[test]
    fn signal_get_set() {
        reset_runtime();
        let (read, write) = create_signal(1);
        assert_eq!(read.get(), 1);
        write.set(5);
        assert_eq!(read.get(), 5);
        write.update(|v| *v += 1);
        assert_eq!(read.get_untracked(), 6);
    }

    #[test]
    fn effect_runs_immediately_and_on_change() {
        reset_runtime();
        let (read, write) = create_signal(String::from("a"));
        let (runs, count) = counter();
        create_effect(move || {
            read.with(|_| ());
            runs.set(runs.get() + 1);
        });
        assert_eq!(count(), 1);
        write.set("b".into());
        assert_eq!(count(), 2);
    }

    #[test]
    fn untracked_reads_do_not_subscribe() {
        reset_runtime();
        let (read, write) = create_signal(0);
        let (runs, count) = counter();
        create_effect(move || {
            untrack(|| read.get());
            read.get_untracked();
            runs.set(runs.get() + 1);
        });
        write.set(1);
        assert_eq!(count(), 1);
    }

    #[test]
    fn dispose_stops_effect() {
        reset_runtime();
        let (read, write) = create_signal(0);
        let (runs, count) = counter();
        let eid = create_effect(move || {
            read.get();
            runs.set(runs.get() + 1);
        });
        dispose_effect(eid);
        write.set(1);
        assert_eq!(count(), 1);
        dispose_effect(eid);
    }

    #[test]
    fn dispose_signal_frees_slot_and_edges() {
        reset_runtime();
        let (read, write) = create_signal(0);
        let (runs, count) = counter();
        let eid = create_effect(move || {
            read.get();
            runs.set(runs.get() + 1);
        });
        assert_eq!(live_signals(), 1);

        dispose_signal(read.id());
        assert_eq!(live_signals(), 0);
        assert!(with_runtime(|rt| rt.effects[eid].dependencies.is_empty()));
        write.set(1);
        assert_eq!(count(), 1);
        dispose_signal(write.id());
    }

    #[test]
    fn batch_coalesces_writes() {
        reset_runtime();
        let (a, set_a) = create_signal(0);
        let (b, set_b) = create_signal(0);
        let (runs, count) = counter();
        create_effect(move || {
            a.get();
            b.get();
            runs.set(runs.get() + 1);
        });
        batch(|| {
            set_a.set(1);
            set_b.set(2);
        });
        assert_eq!(count(), 2);
    }

    #[test]
    fn nested_write_inside_effect_is_delivered() {
        reset_runtime();
        let (source, set_source) = create_signal(0);
        let (mirror, set_mirror) = create_signal(0);
        create_effect(move || set_mirror.set(source.get() * 10));
        let seen = Rc::new(Cell::new(0));
        let s = seen.clone();
        create_effect(move || s.set(mirror.get()));
        set_source.set(3);
        assert_eq!(mirror.get_untracked(), 30);
        assert_eq!(seen.get(), 30);
    }

    #[test]
    fn dependencies_are_dynamic() {
        reset_runtime();
        let (flag, set_flag) = create_signal(true);
        let (a, set_a) = create_signal(0);
        let (runs, count) = counter();
        create_effect(move || {
            if flag.get() {
                a.get();
            }
            runs.set(runs.get() + 1);
        });
        set_flag.set(false);
        assert_eq!(count(), 2);
        set_a.set(1);
        assert_eq!(count(), 2);
    }
}
