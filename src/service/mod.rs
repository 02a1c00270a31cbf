pub mod items;

pub use items::{ItemService, parse_item_id};
