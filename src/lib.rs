#![warn(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

mod channel;
mod errors;
mod parse;
mod problems;
mod profile;

// only inherent impls on the public types, nothing to re-export
mod serialize;

pub use channel::*;
pub use errors::*;
pub use parse::*;
pub use problems::*;
pub use profile::*;
