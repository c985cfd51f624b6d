#![forbid(unsafe_code)]

pub mod batch;
pub mod columns;
pub mod error;
pub mod runtimes;
