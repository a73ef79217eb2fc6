#![warn(clippy::pedantic)]

#[macro_use]
mod macros;

pub mod error;
pub mod item_type;
pub mod reason;
pub mod tag;

pub use error::TypeError;
pub use item_type::ItemType;
pub use reason::ResultReason;
pub use tag::Tag;
