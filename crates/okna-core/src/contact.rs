//! Contact form: intercepted submit, one request at a time, transient
//! status message.

use std::cell::Cell;
use std::collections::BTreeMap;
use std::future::Future;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::config::ContactConfig;
use crate::ui::{Control, EventFlow, EventKind, Scheduler, Spawn, Subscription, UiEvent};

pub trait ContactView {
    /// Disable (or re-enable) the submit button and set its label.
    fn set_submitting(&self, submitting: bool, label: &str);
    fn submit_label(&self) -> String;
    /// Replace whatever message is showing with `message`.
    fn show_message(&self, message: &FormMessage);
    fn clear_message(&self);
    /// Clear every field.
    fn reset(&self);
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub phone: String,
    pub message: String,
}

impl ContactRequest {
    /// Pick the known fields out of a submitted form. Missing ones are empty.
    pub fn from_fields(fields: &BTreeMap<String, String>) -> Self {
        let field = |key: &str| fields.get(key).cloned().unwrap_or_default();
        Self {
            name: field("name"),
            phone: field("phone"),
            message: field("message"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("request rejected: {0}")]
    Rejected(String),
}

/// Delivers a contact request somewhere.
pub trait Submitter {
    fn submit(&self, request: &ContactRequest) -> impl Future<Output = Result<(), SubmitError>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

impl MessageKind {
    /// Suffix of the `contact-form__message--*` modifier class.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormMessage {
    pub id: u64,
    pub kind: MessageKind,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Sent,
    Failed,
    /// Another submission was still in flight.
    Busy,
}

pub struct ContactForm<S> {
    submitter: S,
    view: Rc<dyn ContactView>,
    scheduler: Rc<dyn Scheduler>,
    config: ContactConfig,
    in_flight: Cell<bool>,
    next_message_id: Cell<u64>,
    current_message: Rc<Cell<Option<u64>>>,
}

/// Keeps the submit button disabled while alive.
struct SubmitGuard<'a> {
    view: &'a dyn ContactView,
    in_flight: &'a Cell<bool>,
    original_label: String,
}

impl<'a> SubmitGuard<'a> {
    fn acquire(view: &'a dyn ContactView, in_flight: &'a Cell<bool>, sending_label: &str) -> Self {
        in_flight.set(true);
        let original_label = view.submit_label();
        view.set_submitting(true, sending_label);
        Self {
            view,
            in_flight,
            original_label,
        }
    }
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.view.set_submitting(false, &self.original_label);
        self.in_flight.set(false);
    }
}

impl<S: Submitter> ContactForm<S> {
    pub fn new(submitter: S, view: Rc<dyn ContactView>, scheduler: Rc<dyn Scheduler>, config: ContactConfig) -> Self {
        Self {
            submitter,
            view,
            scheduler,
            config,
            in_flight: Cell::new(false),
            next_message_id: Cell::new(0),
            current_message: Rc::new(Cell::new(None)),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.get()
    }

    /// Id of the message on screen, if any.
    pub fn current_message(&self) -> Option<u64> {
        self.current_message.get()
    }

    pub async fn submit(&self, request: ContactRequest) -> SubmitOutcome {
        if self.is_busy() {
            tracing::debug!("Submission already in flight");
            return SubmitOutcome::Busy;
        }
        let _guard = SubmitGuard::acquire(self.view.as_ref(), &self.in_flight, &self.config.sending_label);

        match self.submitter.submit(&request).await {
            Ok(()) => {
                tracing::info!("Contact request sent");
                self.show(MessageKind::Success, self.config.success_text.clone());
                self.view.reset();
                SubmitOutcome::Sent
            }
            Err(e) => {
                tracing::warn!("Contact request failed: {e}");
                self.show(MessageKind::Error, self.config.error_text.clone());
                SubmitOutcome::Failed
            }
        }
    }

    fn show(&self, kind: MessageKind, text: String) {
        let id = self.next_message_id.get();
        self.next_message_id.set(id + 1);
        self.current_message.set(Some(id));
        self.view.show_message(&FormMessage { id, kind, text });

        let current = self.current_message.clone();
        let view = self.view.clone();
        self.scheduler.schedule(
            self.config.message_ttl(),
            Box::new(move || {
                if current.get() == Some(id) {
                    current.set(None);
                    view.clear_message();
                }
            }),
        );
    }
}

/// Intercept `form`'s submit and run the submission on `spawner`.
pub fn attach<S, C>(form: Rc<ContactForm<S>>, control: &C, spawner: Rc<dyn Spawn>) -> Subscription
where
    S: Submitter + 'static,
    C: Control,
{
    control.listen(
        EventKind::Submit,
        Box::new(move |event| {
            let UiEvent::Submit { fields } = event else {
                return EventFlow::Continue;
            };
            if form.is_busy() {
                return EventFlow::PreventDefault;
            }
            let request = ContactRequest::from_fields(fields);
            let form = form.clone();
            spawner.spawn_local(Box::pin(async move {
                form.submit(request).await;
            }));
            EventFlow::PreventDefault
        }),
    )
}
