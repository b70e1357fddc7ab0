pub mod binary;
pub mod primitive;

pub use folio_core_derive::*;
