//! Domain logic for the Quill blogging service.
//!
//! Everything here is free of I/O so it can be shared by the persistence
//! layer (`quill-db`) and the HTTP layer (`quill-api`) and tested in
//! isolation.

pub mod access;
pub mod article;
pub mod error;
pub mod types;
pub mod upload;
