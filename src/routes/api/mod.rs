pub mod lists;
pub mod public;
mod router;
pub mod tasks;

pub use router::router;
