//! Error classification
//!
//! Turns heterogeneous backend error payloads into user-facing sentences.
//!
//! Backend errors arrive as `{ type, title, detail?, rootCause? }`, but the
//! HTTP wrapper decides where that body sits: `response._data`,
//! `response.data` or a bare `data`. Each carrier may further nest the real
//! cause one level down under `rootCause`. The extractors search every
//! location in a fixed order and never fail.
//!
//! Resolution order for a message:
//! 1. the backend's own `title`
//! 2. the domain taxonomy entry for the `type` code
//! 3. `"An error occurred: <type>"`
//! 4. [`GENERIC_ERROR_MESSAGE`]

pub mod classifier;
pub mod payload;
pub mod taxonomy;

pub use classifier::{
    GENERIC_ERROR_MESSAGE, extract_error_message, extract_error_type, get_domain_error_message,
    user_message,
};
pub use payload::ApiErrorPayload;
pub use taxonomy::Taxonomy;
