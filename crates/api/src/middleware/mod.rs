//! Request extractors for identity and origin.
//!
//! - [`auth::AuthUser`] -- requires a valid Bearer token.
//! - [`auth::Viewer`] -- optional identity for publicly readable resources.
//! - [`origin::ClientOrigin`] -- caller IP and user agent for the login log.

pub mod auth;
pub mod origin;
