//! Data structures owned by the daemon

pub mod field;

pub use field::{BoundedBuf, Field, FieldBuf, FieldStore, FIELD_CAPACITY};
