#![doc = include_str!("RUSTDOC.md")]

pub mod analytics;
pub mod logger;
