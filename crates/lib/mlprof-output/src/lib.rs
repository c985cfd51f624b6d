#![forbid(unsafe_code)]

pub mod error;
pub mod logger;
pub mod render;
pub mod scene;
pub mod style;
pub mod tables;
pub mod writer;
