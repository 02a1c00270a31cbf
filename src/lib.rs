pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod server;
pub mod service;

mod utils;

pub use client::ItemsClient;
pub use error::ItemdeskError;
pub use itemdesk_schema as schema;
