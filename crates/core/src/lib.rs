//! Core data types for the price watcher.

pub mod change;
pub mod item;
pub mod price;

pub use change::*;
pub use item::*;
pub use price::*;
