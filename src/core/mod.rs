// src/core/mod.rs

pub mod converter;
pub mod engine;
pub mod index;
pub mod rules;
pub mod types;
