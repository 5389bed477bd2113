//! Document tree for conflang configuration files.
//!
//! The parser produces a [`Mapping`] of [`Value`]s; the XML serializer
//! consumes one. This crate holds only the data model and accessors.

mod value;

pub use value::{Entry, Mapping, Value};
