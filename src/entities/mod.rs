//! Entity module - Contains all SeaORM entity definitions for the database.
//! The persistence model is a key-value namespace of JSON documents, so a
//! single entity covers every store in the crate.

pub mod document;

// Re-export specific types to avoid conflicts
pub use document::{Column as DocumentColumn, Entity as Document, Model as DocumentModel};
