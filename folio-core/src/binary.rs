//! Little-endian binary serialization used for persisted content envelopes.

mod blob;
mod deserialization;
mod error;
mod serialization;

pub use blob::*;
pub use deserialization::*;
pub use error::*;
pub use serialization::*;
