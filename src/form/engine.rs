//! DynamicForm: assembles sections, fields, validation and submission.
//!
//! # Submit flow
//!
//! ```text
//! Idle ──press──▶ Validating ──fail──▶ Idle (errors set)
//!                     │
//!                     └──pass──▶ Submitting ──settle──▶ Idle (ok, or submit error set)
//! ```
//!
//! [`DynamicForm::press_submit`] runs validation synchronously and, when it
//! passes, starts the handler. A sync handler finishes within the press; an
//! async one is parked and [`DynamicForm::settle`] drives it to completion.
//! Presses while submitting are ignored, so a second press can never start a
//! second handler.

use std::cell::{Ref, RefCell};
use std::fmt;
use std::future::Future;
use std::rc::{Rc, Weak};

use futures::FutureExt;
use tracing::{debug, trace, warn};

use super::config::{FieldConfig, FormConfig, SectionConfig};
use super::submit::{
    Dispatch, LocalBoxFuture, Outcome, SubmitError, SubmitHandler, SubmitResult, SubmitState,
};
use crate::binding::{FieldBinding, FormStore, Subscription};
use crate::controls::{ControlContext, ControlProps, ControlRegistry};
use crate::error::Result;
use crate::layout::LayoutRegistry;
use crate::style::{merge_styles, Align, FontWeight, Justify, Position, Style};
use crate::validate::{validate_fields, DerivedSchema, FieldErrors, Validator};
use crate::value::FormValues;
use crate::view::{ids, Element, PressHandler, Role};
use crate::widgets::ButtonPair;

/// Submit label while a submission is in flight.
pub const SUBMITTING_LABEL: &str = "Submitting...";

/// Accessibility label of an untitled section.
pub const UNTITLED_SECTION: &str = "Form section";

// ---------------------------------------------------------------------------
// Runtime state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
struct RuntimeState {
    phase: SubmitState,
    errors: FieldErrors,
    submit_error: Option<String>,
    /// Some field changed since the last failed validation.
    edited: bool,
}

impl RuntimeState {
    fn submit_disabled(&self) -> bool {
        self.phase == SubmitState::Submitting || (!self.errors.is_empty() && !self.edited)
    }
}

/// Runs a submission started from the rendered Submit button.
type Spawner = Rc<dyn Fn(LocalBoxFuture<'static, ()>)>;

struct FormInner {
    config: RefCell<FormConfig>,
    schema: RefCell<DerivedSchema>,
    validator: RefCell<Option<Rc<dyn Validator>>>,
    controls: RefCell<ControlRegistry>,
    layouts: RefCell<LayoutRegistry>,
    on_submit: RefCell<Option<SubmitHandler>>,
    on_cancel: RefCell<Option<PressHandler>>,
    store: Rc<FormStore>,
    ctx: ControlContext,
    state: Rc<RefCell<RuntimeState>>,
    pending: RefCell<Option<LocalBoxFuture<'static, SubmitResult>>>,
    spawner: RefCell<Option<Spawner>>,
    _edits: Subscription,
}

// ---------------------------------------------------------------------------
// DynamicForm
// ---------------------------------------------------------------------------

/// A configured form instance.
///
/// Cheap to clone; clones share the same state.
///
/// # Examples
///
/// ```ignore
/// let form = DynamicForm::new(config)?
///     .on_submit(|values| async move {
///         api::save(values).await.map_err(|e| SubmitError::from_error(&e))
///     })
///     .on_cancel(|| router.back());
///
/// let tree = form.render();
/// ```
#[derive(Clone)]
pub struct DynamicForm {
    inner: Rc<FormInner>,
}

impl DynamicForm {
    /// Build a form from `config`, seeding values from `config.initial_values`.
    ///
    /// Fails if two fields share a name.
    pub fn new(config: FormConfig) -> Result<Self> {
        let schema = DerivedSchema::derive(&config.sections)?;
        let store = Rc::new(FormStore::with_values(&config.initial_values));
        let ctx = ControlContext::new(store.clone());
        let state = Rc::new(RefCell::new(RuntimeState::default()));

        let edits = {
            let state = state.clone();
            store.subscribe_all(Box::new(move |name: &str| {
                trace!(field = name, "field edited");
                state.borrow_mut().edited = true;
            }))
        };

        debug!(fields = schema.len(), sections = config.sections.len(), "form created");
        Ok(Self {
            inner: Rc::new(FormInner {
                config: RefCell::new(config),
                schema: RefCell::new(schema),
                validator: RefCell::new(None),
                controls: RefCell::new(ControlRegistry::with_defaults()),
                layouts: RefCell::new(LayoutRegistry::with_defaults()),
                on_submit: RefCell::new(None),
                on_cancel: RefCell::new(None),
                store,
                ctx,
                state,
                pending: RefCell::new(None),
                spawner: RefCell::new(None),
                _edits: edits,
            }),
        })
    }

    // -- builders ----------------------------------------------------------

    /// Set an async submit handler (builder pattern).
    pub fn on_submit<F, Fut>(self, f: F) -> Self
    where
        F: Fn(FormValues) -> Fut + 'static,
        Fut: Future<Output = SubmitResult> + 'static,
    {
        self.inner.on_submit.replace(Some(SubmitHandler::new(f)));
        self
    }

    /// Set a synchronous submit handler (builder pattern).
    pub fn on_submit_sync(self, f: impl Fn(FormValues) -> SubmitResult + 'static) -> Self {
        self.inner.on_submit.replace(Some(SubmitHandler::sync(f)));
        self
    }

    /// Set the cancel handler (builder pattern).
    pub fn on_cancel(self, f: impl Fn() + 'static) -> Self {
        self.inner.on_cancel.replace(Some(PressHandler::new(f)));
        self
    }

    /// Replace the control registry (builder pattern).
    pub fn with_controls(self, controls: ControlRegistry) -> Self {
        self.inner.controls.replace(controls);
        self
    }

    /// Replace the layout registry (builder pattern).
    pub fn with_layouts(self, layouts: LayoutRegistry) -> Self {
        self.inner.layouts.replace(layouts);
        self
    }

    /// Validate with `validator` instead of the derived schema (builder pattern).
    pub fn with_validator(self, validator: impl Validator + 'static) -> Self {
        self.inner.validator.replace(Some(Rc::new(validator)));
        self
    }

    /// Hand submissions started by the rendered Submit button to `spawn`,
    /// e.g. `tokio::task::spawn_local` (builder pattern).
    ///
    /// Without a spawner they stay parked until [`settle`](Self::settle).
    pub fn with_spawner(self, spawn: impl Fn(LocalBoxFuture<'static, ()>) + 'static) -> Self {
        self.inner.spawner.replace(Some(Rc::new(spawn)));
        self
    }

    // -- accessors ---------------------------------------------------------

    pub fn config(&self) -> Ref<'_, FormConfig> {
        self.inner.config.borrow()
    }

    /// The value storage controls read and write through.
    pub fn binding(&self) -> Rc<dyn FieldBinding> {
        self.inner.store.clone()
    }

    pub fn state(&self) -> SubmitState {
        self.inner.state.borrow().phase
    }

    pub fn is_submitting(&self) -> bool {
        self.state() == SubmitState::Submitting
    }

    /// A started submission is waiting for [`settle`](Self::settle).
    pub fn has_pending(&self) -> bool {
        self.inner.pending.borrow().is_some()
    }

    /// Whether a Submit press would be ignored right now.
    pub fn is_submit_disabled(&self) -> bool {
        self.inner.state.borrow().submit_disabled()
    }

    /// Field errors from the last failed validation.
    pub fn errors(&self) -> FieldErrors {
        self.inner.state.borrow().errors.clone()
    }

    pub fn error(&self, field: &str) -> Option<String> {
        self.inner.state.borrow().errors.get(field).map(str::to_owned)
    }

    /// Message of the last failed submission.
    pub fn submit_error(&self) -> Option<String> {
        self.inner.state.borrow().submit_error.clone()
    }

    /// Current values of every declared field, in declaration order.
    pub fn values(&self) -> FormValues {
        let schema = self.inner.schema.borrow();
        self.inner.store.values_for(schema.field_names())
    }

    /// Call `f` with the field name after every value change.
    pub fn on_change(&self, f: impl Fn(&str) + 'static) -> Subscription {
        self.inner.store.subscribe_all(Box::new(f))
    }

    // -- operations --------------------------------------------------------

    /// Replace the sections. The schema is re-derived only if the field set
    /// or a rule changed.
    pub fn set_sections(&self, sections: Vec<SectionConfig>) -> Result<()> {
        let schema = DerivedSchema::derive(&sections)?;
        if schema.fingerprint() != self.inner.schema.borrow().fingerprint() {
            debug!(fields = schema.len(), "schema re-derived");
            self.inner.schema.replace(schema);
        }
        self.inner.config.borrow_mut().sections = sections;
        Ok(())
    }

    /// Handle a Submit press.
    ///
    /// Returns [`Outcome::Pending`] when the handler was started; call
    /// [`settle`](Self::settle) to finish it.
    pub fn press_submit(&self) -> Outcome {
        if self.is_submit_disabled() {
            debug!("submit press ignored");
            return Outcome::Ignored;
        }
        {
            let mut state = self.inner.state.borrow_mut();
            state.phase = SubmitState::Validating;
            state.submit_error = None;
        }
        debug!("validating");

        let values = self.values();
        let errors = {
            let schema = self.inner.schema.borrow();
            match self.inner.validator.borrow().as_ref() {
                Some(validator) => validate_fields(validator.as_ref(), schema.field_names(), &values),
                None => schema.validate_all(&values),
            }
        };

        if !errors.is_empty() {
            debug!(fields = errors.len(), "validation failed");
            let mut state = self.inner.state.borrow_mut();
            state.phase = SubmitState::Idle;
            state.errors = errors.clone();
            state.edited = false;
            return Outcome::Invalid(errors);
        }

        {
            let mut state = self.inner.state.borrow_mut();
            state.errors.clear();
            state.phase = SubmitState::Submitting;
        }
        let handler = self.inner.on_submit.borrow().clone();
        let Some(handler) = handler else {
            debug!("no submit handler, submitted");
            self.inner.state.borrow_mut().phase = SubmitState::Idle;
            return Outcome::Submitted;
        };
        debug!("submitting");
        match handler.dispatch(values) {
            Dispatch::Done(result) => self.finish(result),
            Dispatch::Pending(future) => {
                self.inner.pending.replace(Some(future));
                Outcome::Pending
            }
        }
    }

    /// Drive the in-flight submission to completion.
    ///
    /// `None` if nothing is in flight.
    pub async fn settle(&self) -> Option<Outcome> {
        let future = self.inner.pending.borrow_mut().take()?;
        let result = future.await;
        Some(self.finish(result))
    }

    fn finish(&self, result: SubmitResult) -> Outcome {
        let mut state = self.inner.state.borrow_mut();
        state.phase = SubmitState::Idle;
        match result {
            Ok(()) => {
                debug!("submit succeeded");
                Outcome::Submitted
            }
            Err(err) => {
                let message = err.message().to_owned();
                warn!(error = %message, "submit failed");
                state.submit_error = Some(message.clone());
                Outcome::Failed(message)
            }
        }
    }

    /// Press Submit and, if the handler started, wait for it.
    pub async fn submit(&self) -> Outcome {
        match self.press_submit() {
            Outcome::Pending => self.settle().await.unwrap_or(Outcome::Pending),
            other => other,
        }
    }

    fn hand_off_pending(&self) {
        let spawner = self.inner.spawner.borrow().clone();
        match spawner {
            Some(spawn) => {
                let form = self.clone();
                spawn(
                    async move {
                        form.settle().await;
                    }
                    .boxed_local(),
                );
            }
            None => debug!("submission parked until settled"),
        }
    }

    /// Handle a Cancel press: calls `on_cancel` and nothing else.
    pub fn cancel(&self) {
        debug!("cancel pressed");
        let handler = self.inner.on_cancel.borrow().clone();
        if let Some(handler) = handler {
            handler.call();
        }
    }

    /// Restore the initial values and clear all errors.
    pub fn reset(&self) {
        let initial = self.inner.config.borrow().initial_values.clone();
        self.inner.store.reset(&initial);
        self.inner.ctx.overlays().close_all();
        let mut state = self.inner.state.borrow_mut();
        state.errors.clear();
        state.submit_error = None;
        state.edited = false;
        debug!("form reset");
    }

    // -- rendering ---------------------------------------------------------

    /// Build the element tree for the current state.
    ///
    /// An async submission started by the tree's Submit button goes to the
    /// [spawner](Self::with_spawner) if one is set; otherwise the host must
    /// drive [`settle`](Self::settle) while [`has_pending`](Self::has_pending).
    pub fn render(&self) -> Element {
        let config = self.inner.config.borrow();
        let state = self.inner.state.borrow().clone();
        let submitting = state.phase == SubmitState::Submitting;
        let styles = &config.styles;

        let header = (!config.title.is_empty()).then(|| {
            Element::view()
                .with_test_id(ids::FORM_HEADER)
                .with_role(Role::Header)
                .with_accessibility_label(config.title.clone())
                .with_styles(merge_styles(
                    Style::new()
                        .padding(16.0)
                        .background_color("#f2f2f2")
                        .align_items(Align::Center)
                        .justify_content(Justify::Center),
                    styles.header_container.as_ref(),
                ))
                .with_child(Element::text(config.title.clone()).with_styles(merge_styles(
                    Style::new().font_size(20.0).font_weight(FontWeight::Bold),
                    styles.header_text.as_ref(),
                )))
        });

        let submit_error = state.submit_error.as_ref().map(|message| {
            Element::text(message.clone())
                .with_test_id(ids::SUBMIT_ERROR)
                .with_role(Role::Alert)
                .with_style(Style::new().color("red").font_size(14.0).margin_top(5.0))
        });

        let body = Element::scroll_view()
            .with_styles(merge_styles(
                Style::new().flex_grow(1.0).padding(16.0),
                styles.form_container.as_ref(),
            ))
            .with_children(
                config
                    .sections
                    .iter()
                    .map(|section| self.render_section(section, &state.errors, submitting)),
            )
            .with_child_opt(submit_error);

        let submit_label = if submitting {
            SUBMITTING_LABEL.to_owned()
        } else {
            config.submit_label.clone()
        };
        let buttons = ButtonPair::new(submit_label, config.cancel_label.clone())
            .disabled(state.submit_disabled())
            .with_styles(styles.buttons.clone())
            .on_submit(self.weak_action(|form| {
                if form.press_submit() == Outcome::Pending {
                    form.hand_off_pending();
                }
            }))
            .on_cancel(self.weak_action(DynamicForm::cancel));

        let loading = submitting.then(|| {
            Element::view()
                .with_test_id(ids::LOADING_INDICATOR)
                .with_style(
                    Style::new()
                        .position(Position::AbsoluteFill)
                        .background_color("rgba(255, 255, 255, 0.7)")
                        .justify_content(Justify::Center)
                        .align_items(Align::Center),
                )
                .with_child(Element::activity_indicator().with_style(Style::new().color("#0000ff")))
        });

        Element::keyboard_avoiding(config.platform.keyboard_behavior())
            .with_style(Style::new().flex(1.0))
            .with_child_opt(header)
            .with_child(body)
            .with_child(buttons.render())
            .with_child_opt(loading)
    }

    fn render_section(&self, section: &SectionConfig, errors: &FieldErrors, submitting: bool) -> Element {
        let fields: Vec<Element> = section
            .fields
            .iter()
            .filter_map(|field| self.render_field(field, errors, submitting))
            .collect();

        let layout = self
            .inner
            .layouts
            .borrow()
            .resolve(section.layout_component.as_ref(), section.layout.as_deref());
        let arranged = match layout {
            Some(layout) => layout.arrange(fields, &section.layout_props),
            None => Element::view().with_children(fields),
        };

        let title = section.title.as_ref().map(|title| {
            Element::text(title.clone()).with_style(
                Style::new()
                    .font_size(18.0)
                    .font_weight(FontWeight::Bold)
                    .margin_bottom(16.0)
                    .margin_top(24.0),
            )
        });

        Element::view()
            .with_accessibility_label(section.title.as_deref().unwrap_or(UNTITLED_SECTION))
            .with_role(Role::None)
            .with_child_opt(title)
            .with_child(arranged)
    }

    fn render_field(&self, field: &FieldConfig, errors: &FieldErrors, submitting: bool) -> Option<Element> {
        let control = match &field.component {
            Some(control) => control.clone(),
            None => match self.inner.controls.borrow().get(&field.field_type) {
                Some(control) => control,
                None => {
                    trace!(field = %field.name, tag = %field.field_type, "no control registered, field omitted");
                    return None;
                }
            },
        };

        let props = ControlProps::from_field(field)
            .with_error(errors.get(&field.name))
            .disabled(field.disabled || submitting);
        Some(
            Element::view()
                .with_test_id(ids::field(&field.name))
                .with_accessibility_label(field.label.clone())
                .with_role(Role::None)
                .with_child(control.render(&props, &self.inner.ctx)),
        )
    }

    /// A press callback that holds the form weakly.
    fn weak_action(&self, action: impl Fn(&DynamicForm) + 'static) -> impl Fn() + 'static {
        let weak: Weak<FormInner> = Rc::downgrade(&self.inner);
        move || {
            if let Some(inner) = weak.upgrade() {
                action(&DynamicForm { inner });
            }
        }
    }
}

impl fmt::Debug for DynamicForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.borrow();
        f.debug_struct("DynamicForm")
            .field("phase", &state.phase)
            .field("errors", &state.errors)
            .field("submit_error", &state.submit_error)
            .field("values", &self.values())
            .finish_non_exhaustive()
    }
}

/// Convenience for handlers that fail with a plain message.
pub fn fail(message: impl Into<String>) -> SubmitResult {
    Err(SubmitError::new(message))
}

// ===========================================================================
// Tests
// ===========================================================================
