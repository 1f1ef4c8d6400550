// src/lib.rs

pub mod commands;
pub mod config;
pub mod core;
pub mod error;
pub mod persistence;

pub use crate::config::Config;
pub use crate::core::converter::{encode, PhoneticEncoder};
pub use crate::core::engine::{IndexOrigin, LoadReport, MajorEngine};
pub use crate::core::index::LexiconIndex;
pub use crate::core::types::{Digit, Encoding, Segment};
pub use crate::error::{CacheError, CommandError, EngineError, InvalidEncoding};
