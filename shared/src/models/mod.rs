//! Data models
//!
//! Records mirror the backend's tRPC payloads (camelCase on the wire).
//! All IDs are `i64`. The backend owns every record; these are read copies.

pub mod action_log;
pub mod client;
pub mod establishment;
pub mod sales_rep;
pub mod stats;
pub mod territories;

// Re-exports
pub use action_log::*;
pub use client::*;
pub use establishment::*;
pub use sales_rep::*;
pub use stats::*;
pub use territories::*;

/// A partial update that can be merged into a cached record.
///
/// Only the fields present in the payload are written; absent fields leave
/// the record untouched.
pub trait Patch<T> {
    fn apply(&self, target: &mut T);

    /// Whether the payload carries no field at all
    fn is_empty(&self) -> bool;
}

/// Copy `Some` values over the matching record fields.
macro_rules! patch_fields {
    ($patch:expr, $target:expr, [$($field:ident),* $(,)?]) => {
        $(
            if let Some(value) = &$patch.$field {
                $target.$field = value.clone();
            }
        )*
    };
}

pub(crate) use patch_fields;
