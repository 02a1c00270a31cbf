//! Database module: models and schema for persistent storage.
//!
//! Layout:
//! - `actor.rs`: the actor that owns the SQLite pool and serves every statement
//! - `models.rs`: Rust structs mirroring DB rows
//! - `patch.rs`: partial-update envelope and its closed column set
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)

pub mod actor;
pub mod models;
pub mod patch;
pub mod schema;

mod patch_impl;

pub use actor::{DbActorHandle, spawn};
pub use models::DbItem;
pub use patch::{DbPatchable, ItemColumn, ItemPatch};
pub use schema::SQLITE_INIT;
