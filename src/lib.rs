#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]

mod error;
mod map;
mod raw;

pub use error::ConfigError;
pub use map::{HashMap, HashMapBuilder};
