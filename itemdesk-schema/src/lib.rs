pub mod item;
pub mod request;
pub mod response;

pub use item::{Item, ItemStatus};
pub use request::{CreateItemRequest, ItemChanges, NewItem, PatchField, UpdateItemRequest};
pub use response::{DeleteItemResponse, HealthResponse, HealthStatus};
