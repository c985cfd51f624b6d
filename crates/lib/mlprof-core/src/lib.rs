#![forbid(unsafe_code)]

pub use indexmap;

pub mod batch;
pub mod customize;
pub mod error;
pub mod label;
pub mod series;
pub mod stats;
pub mod table;
