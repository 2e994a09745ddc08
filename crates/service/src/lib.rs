//! Service layer providing the file-backed per-user configuration store.
//! - One JSON document per user id; the filesystem is the only state.
//! - Provides clear error types for the HTTP boundary to map onto statuses.

pub mod errors;
pub mod runtime;
pub mod storage;
