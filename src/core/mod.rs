//! Core domain of the lead form: roles, fields, validation, payloads

pub mod error;
pub mod events;
pub mod field;
pub mod form;
pub mod payload;
pub mod role;
pub mod validation;

pub use error::{ConfigError, ErrorResponse, SiteError, TransportError};
pub use events::{Notification, NotificationBus, NotificationEnvelope, NotificationKind, Severity};
pub use field::{Field, FieldFormat};
pub use form::{BuyerFormValues, ContactDetails, FormValues, RawFormValues, SellerFormValues};
pub use payload::SubmissionPayload;
pub use role::{Role, UnknownRole};
pub use validation::{FieldErrors, validate};
