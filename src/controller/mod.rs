//! Form controller: validate, transform, submit, reset
//!
//! ```text
//!            submit (valid)             Sent / TransportFailed
//!   Idle ───────────────────▶ Submitting ───────────────────────▶ Idle
//!    │  ▲
//!    └──┘ submit (invalid): errors stored, nothing sent
//! ```
//!
//! Session state sits behind a mutex that is released before the
//! submission is awaited, so a controller can be shared and a second submit
//! made while one is in flight sees `Submitting` and is ignored. A submit
//! dropped before the client answers (timeout, `select!`, disconnect) puts the
//! session back to `Idle` with its values kept.

use crate::client::{Outcome, SubmissionClient};
use crate::core::{
    FieldErrors, FormValues, Notification, NotificationBus, RawFormValues, Role,
    SubmissionPayload,
};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Whether a submission is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
}

/// What a call to [`FormController::submit`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitResult {
    /// Validation failed; the client was not contacted
    Invalid(FieldErrors),
    /// The client was called and reported this outcome
    Submitted(Outcome),
    /// Another submission was already in flight
    Ignored,
}

impl SubmitResult {
    /// Notification the host should show for this result
    pub fn notification(&self) -> Option<Notification> {
        match self {
            SubmitResult::Invalid(_) => Some(Notification::validation_failed()),
            SubmitResult::Submitted(Outcome::Sent) => Some(Notification::submitted()),
            SubmitResult::Submitted(Outcome::TransportFailed) => {
                Some(Notification::submission_failed())
            }
            SubmitResult::Ignored => None,
        }
    }
}

#[derive(Debug)]
struct FormSession {
    role: Role,
    values: RawFormValues,
    errors: FieldErrors,
    state: SubmissionState,
}

/// Owns one lead form session
#[derive(Debug)]
pub struct FormController {
    client: SubmissionClient,
    notifications: NotificationBus,
    session: Mutex<FormSession>,
}

impl FormController {
    pub fn new(role: Role, client: SubmissionClient, notifications: NotificationBus) -> Self {
        Self {
            client,
            notifications,
            session: Mutex::new(FormSession {
                role,
                values: RawFormValues::new(),
                errors: FieldErrors::new(),
                state: SubmissionState::Idle,
            }),
        }
    }

    // Session updates never panic midway, so a poisoned lock is still consistent.
    fn session(&self) -> MutexGuard<'_, FormSession> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn role(&self) -> Role {
        self.session().role
    }

    pub fn state(&self) -> SubmissionState {
        self.session().state
    }

    pub fn is_submitting(&self) -> bool {
        self.state() == SubmissionState::Submitting
    }

    /// Snapshot of the current control values
    pub fn values(&self) -> RawFormValues {
        self.session().values.clone()
    }

    /// Errors from the last submit attempt
    pub fn errors(&self) -> FieldErrors {
        self.session().errors.clone()
    }

    /// Update one control
    pub fn set_field(&self, name: impl Into<String>, value: impl Into<String>) {
        self.session().values.set(name, value);
    }

    /// Replace every control value at once, as a form post does
    pub fn load(&self, values: RawFormValues) {
        self.session().values = values;
    }

    /// Switch the session to `role`
    ///
    /// Discards all values and errors, even when the role is unchanged.
    /// Refused (returns `false`) while a submission is in flight.
    pub fn select_role(&self, role: Role) -> bool {
        let mut session = self.session();
        if session.state == SubmissionState::Submitting {
            tracing::debug!(role = %role, "Role change refused during submission");
            return false;
        }
        session.role = role;
        session.values.clear();
        session.errors = FieldErrors::new();
        true
    }

    /// Validate the current values and, if they pass, submit them
    pub async fn submit(&self) -> SubmitResult {
        let prepared = {
            let mut session = self.session();
            if session.state == SubmissionState::Submitting {
                tracing::debug!(role = %session.role, "Submit ignored, already submitting");
                return SubmitResult::Ignored;
            }

            let role = session.role;
            match FormValues::parse(&session.values, role) {
                Ok(values) => {
                    session.errors = FieldErrors::new();
                    session.state = SubmissionState::Submitting;
                    Ok((role, SubmissionPayload::from(&values)))
                }
                Err(errors) => {
                    session.errors = errors.clone();
                    Err((role, errors))
                }
            }
        };

        let (role, payload) = match prepared {
            Ok(prepared) => prepared,
            Err((role, errors)) => {
                tracing::info!(role = %role, fields = errors.len(), "Lead form failed validation");
                return self.finish(role, SubmitResult::Invalid(errors));
            }
        };

        let mut in_flight = InFlight {
            form: self,
            armed: true,
        };
        let outcome = self.client.submit(&payload, role).await;

        {
            let mut session = self.session();
            if outcome == Outcome::Sent {
                session.values.clear();
                session.errors = FieldErrors::new();
            }
            session.state = SubmissionState::Idle;
            in_flight.armed = false;
        }

        self.finish(role, SubmitResult::Submitted(outcome))
    }

    fn finish(&self, role: Role, result: SubmitResult) -> SubmitResult {
        if let Some(notification) = result.notification() {
            self.notifications.publish(role, notification);
        }
        result
    }
}

/// Returns the session to `Idle` if a submit is dropped mid-await
struct InFlight<'a> {
    form: &'a FormController,
    armed: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.armed {
            let mut session = self.form.session();
            session.state = SubmissionState::Idle;
            tracing::warn!(role = %session.role, "Submission cancelled before completion");
        }
    }
}
