//! Field binding: the read / write / subscribe capability behind every control.
//!
//! Controls depend only on the [`FieldBinding`] trait. [`FormStore`] is the
//! implementation the form engine uses: one reactive signal per field plus a
//! store-wide "last changed" signal for whole-form observers.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use crate::reactive::{batch, create_effect, create_signal, dispose_effect, dispose_signal, untrack};
use crate::reactive::{EffectId, ReadSignal, WriteSignal};
use crate::value::{FieldValue, FormValues};

// ---------------------------------------------------------------------------
// FieldBinding
// ---------------------------------------------------------------------------

/// Named value storage with change notification.
///
/// Object-safe: controls receive it as `Rc<dyn FieldBinding>`.
pub trait FieldBinding {
    /// Current value of `name`; `Value::Null` if never set.
    fn get(&self, name: &str) -> FieldValue;

    /// Replace the value of `name` and notify its subscribers.
    fn set(&self, name: &str, value: FieldValue);

    /// Call `callback` after every change to `name`. Not called on subscription.
    fn subscribe(&self, name: &str, callback: Box<dyn Fn(&FieldValue)>) -> Subscription;

    /// Call `callback` with the field name after every change to any field.
    fn subscribe_all(&self, callback: Box<dyn Fn(&str)>) -> Subscription;
}

// ---------------------------------------------------------------------------
// Subscription
// ---------------------------------------------------------------------------

/// Keeps a change callback alive. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    effect: Option<EffectId>,
}

impl Subscription {
    fn new(effect: EffectId) -> Self {
        Self { effect: Some(effect) }
    }

    /// A subscription that was never attached to anything.
    pub fn detached() -> Self {
        Self { effect: None }
    }

    /// Unsubscribe now.
    pub fn cancel(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(eid) = self.effect.take() {
            dispose_effect(eid);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.effect.is_some())
            .finish()
    }
}

/// Turn an effect that re-runs on every write into a change-only callback.
fn on_change<T: Clone + 'static>(signal: ReadSignal<T>, callback: impl Fn(&T) + 'static) -> EffectId {
    let mut primed = false;
    create_effect(move || {
        let value = signal.get();
        if !primed {
            primed = true;
            return;
        }
        untrack(|| callback(&value));
    })
}

// ---------------------------------------------------------------------------
// FormStore
// ---------------------------------------------------------------------------

#[derive(Clone, Copy)]
struct FieldSignal {
    read: ReadSignal<FieldValue>,
    write: WriteSignal<FieldValue>,
}

/// Signal-backed [`FieldBinding`] holding all values of one form instance.
///
/// Fields are created lazily on first access and remembered in first-access
/// order.
pub struct FormStore {
    fields: RefCell<HashMap<String, FieldSignal>>,
    order: RefCell<Vec<String>>,
    changed: (ReadSignal<Option<String>>, WriteSignal<Option<String>>),
}

impl FormStore {
    /// An empty store.
    pub fn new() -> Self {
        Self {
            fields: RefCell::new(HashMap::new()),
            order: RefCell::new(Vec::new()),
            changed: create_signal(None),
        }
    }

    /// A store seeded with `initial` values.
    pub fn with_values(initial: &FormValues) -> Self {
        let store = Self::new();
        for (name, value) in initial {
            store.field(name).write.set(value.clone());
        }
        store
    }

    /// Snapshot of every known field, in first-access order.
    pub fn values(&self) -> FormValues {
        let order = self.order.borrow().clone();
        order
            .into_iter()
            .map(|name| {
                let value = self.get_untracked(&name);
                (name, value)
            })
            .collect()
    }

    /// Snapshot of the given fields, in the given order. Unset fields are `null`.
    pub fn values_for<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> FormValues {
        names
            .into_iter()
            .map(|name| (name.to_owned(), self.get_untracked(name)))
            .collect()
    }

    /// Replace every value: known fields not in `values` become `null`.
    ///
    /// Subscribers see one notification pass.
    pub fn reset(&self, values: &FormValues) {
        let known = self.order.borrow().clone();
        batch(|| {
            for name in known.iter().filter(|n| !values.contains_key(n.as_str())) {
                self.set(name, Value::Null);
            }
            for (name, value) in values {
                self.set(name, value.clone());
            }
        });
    }

    /// Read without subscribing the running effect.
    pub fn get_untracked(&self, name: &str) -> FieldValue {
        let signal = self.fields.borrow().get(name).copied();
        signal
            .map(|s| s.read.get_untracked())
            .unwrap_or(Value::Null)
    }

    fn field(&self, name: &str) -> FieldSignal {
        if let Some(signal) = self.fields.borrow().get(name).copied() {
            return signal;
        }
        let (read, write) = create_signal(Value::Null);
        let signal = FieldSignal { read, write };
        self.fields.borrow_mut().insert(name.to_owned(), signal);
        self.order.borrow_mut().push(name.to_owned());
        signal
    }
}

impl Default for FormStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for FormStore {
    fn drop(&mut self) {
        for signal in self.fields.get_mut().values() {
            dispose_signal(signal.read.id());
        }
        dispose_signal(self.changed.0.id());
    }
}

impl fmt::Debug for FormStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormStore")
            .field("values", &self.values())
            .finish()
    }
}

impl FieldBinding for FormStore {
    fn get(&self, name: &str) -> FieldValue {
        let signal = self.fields.borrow().get(name).copied();
        match signal {
            Some(s) => s.read.get(),
            None => Value::Null,
        }
    }

    fn set(&self, name: &str, value: FieldValue) {
        let signal = self.field(name);
        let (_, mark_changed) = self.changed;
        batch(|| {
            signal.write.set(value);
            mark_changed.set(Some(name.to_owned()));
        });
    }

    fn subscribe(&self, name: &str, callback: Box<dyn Fn(&FieldValue)>) -> Subscription {
        let signal = self.field(name);
        Subscription::new(on_change(signal.read, move |value| callback(value)))
    }

    fn subscribe_all(&self, callback: Box<dyn Fn(&str)>) -> Subscription {
        let (changed, _) = self.changed;
        Subscription::new(on_change(changed, move |name: &Option<String>| {
            if let Some(name) = name {
                callback(name);
            }
        }))
    }
}

// ===========================================================================
// Tests
// ===========================================================================
