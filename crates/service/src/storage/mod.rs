//! Storage for the service layer
//!
//! Contains the file-backed store that persists one JSON configuration
//! document per user id.

pub mod config_store;
