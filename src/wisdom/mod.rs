// Wisdom request/response core
// Public interface for the dispatch layer and its types

pub mod service;
pub mod types;

pub use service::{dispatch, get_wisdom};
pub use types::{Version, Wisdom, WisdomFields};
pub use types::{FALLBACK_ANSWER, FALLBACK_EXPLANATION, FALLBACK_REFERENCE, FALLBACK_TOPIC};
