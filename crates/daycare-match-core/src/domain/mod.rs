//! Raw entity model.
//!
//! Entities are built once from [`crate::records`] with every optional field
//! normalized to its sentinel. They are never mutated afterwards; derived
//! attributes live in [`crate::context`].

mod child;
mod daycare;
mod family;

pub use child::Child;
pub use daycare::Daycare;
pub use family::{Family, PreferenceTuple};
