//! Request extractors guarding staff-only routes.
//!
//! - [`admin::RequireAdmin`] -- Requires a matching `x-admin-password` header.

pub mod admin;
