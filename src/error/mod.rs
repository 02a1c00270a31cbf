mod itemdesk;

pub use itemdesk::{ApiErrorBody, ApiErrorObject, ItemdeskError};
