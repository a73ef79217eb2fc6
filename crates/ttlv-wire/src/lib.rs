#![warn(clippy::pedantic)]

pub mod config;
pub mod decoder;
pub mod encoder;
pub mod header;
pub mod hex;
pub mod value;

pub use config::DecoderConfig;
pub use decoder::{decode, decode_with};
pub use encoder::{encode, encode_into};
pub use header::{HEADER_SIZE, ItemHeader};
pub use self::hex::{decode_hex, encode_hex};
pub use value::{FromValue, Item, Value};
