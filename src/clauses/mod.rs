//! Clause builders: condition, data, and modifier fragments.
//!
//! Three independent builders with the same shape: validate structured input
//! value by value, escape through the driver handle passed in explicitly,
//! and emit one SQL fragment. All validation happens here, before any SQL is
//! sent.

mod conditions;
mod data;
mod modifiers;

pub use conditions::Conditions;
pub use data::DataSet;
pub use modifiers::Modifiers;

pub(crate) use conditions::build_where;
pub(crate) use data::build_data;
pub(crate) use modifiers::build_modifiers;
