//! HTTP server hosting the landing page, forms and lead API
//!
//! [`SiteBuilder`] wires configuration, the submission client and the
//! notification bus into an axum `Router`. Each form post gets its own
//! [`FormController`](crate::controller::FormController).

pub mod builder;
pub mod handlers;
pub mod router;

pub use builder::SiteBuilder;
pub use handlers::AppState;
