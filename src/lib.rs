//! # BlueCycle
//!
//! Lead capture for the BlueCycle treated-water marketplace: a landing page,
//! a buyer/seller role selector, a role-specific form and a static About page.
//!
//! ## Features
//!
//! - **Typed Validation**: required fields per role, 10-digit phone, 6-digit PIN code
//! - **Role-Tagged Payloads**: validated values become a JSON body shaped for the lead sheets
//! - **Fire-and-Forget Submission**: the client reports whether a request left, nothing more
//! - **Form Controller**: `Idle -> Submitting -> Idle`, duplicate submits ignored
//! - **Notifications**: success and failure messages broadcast to any subscriber
//! - **Configuration-Based**: endpoints, timeout and listener from YAML
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bluecycle::prelude::*;
//!
//! let config = SiteConfig::default();
//! let form = FormController::new(
//!     Role::Buyer,
//!     SubmissionClient::from_config(&config),
//!     NotificationBus::default(),
//! );
//!
//! form.set_field("name", "Asha");
//! form.set_field("phone", "9876543210");
//! // ...
//! match form.submit().await {
//!     SubmitResult::Submitted(Outcome::Sent) => println!("sent"),
//!     SubmitResult::Invalid(errors) => println!("{:?}", errors),
//!     other => println!("{:?}", other),
//! }
//! ```

pub mod client;
pub mod config;
pub mod controller;
pub mod core;
pub mod render;
pub mod server;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Types ===
    pub use crate::core::{
        BuyerFormValues, ContactDetails, Field, FieldErrors, FieldFormat, FormValues,
        RawFormValues, Role, SellerFormValues, SubmissionPayload, UnknownRole, validate,
    };

    // === Notifications ===
    pub use crate::core::{
        Notification, NotificationBus, NotificationEnvelope, NotificationKind, Severity,
    };

    // === Errors ===
    pub use crate::core::{ConfigError, ErrorResponse, SiteError, TransportError};

    // === Submission ===
    pub use crate::client::{HttpTransport, Outcome, SubmissionClient, SubmissionTransport};
    pub use crate::controller::{FormController, SubmissionState, SubmitResult};

    // === Configuration ===
    pub use crate::config::{
        DEFAULT_BUYER_ENDPOINT, DEFAULT_SELLER_ENDPOINT, EndpointsConfig, SiteConfig,
    };

    // === Rendering & Server ===
    pub use crate::render::{FieldSpec, FormView, PageRenderer, fields_for, role_choices};
    pub use crate::server::{AppState, SiteBuilder};

    // === External re-exports ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
}
