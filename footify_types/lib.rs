pub mod errors;
pub mod player;
pub mod position;

pub use errors::Result;
