// Crate root library declaration and module exports.
pub mod cli;
pub mod config;
pub mod context;
pub mod convert;
pub mod model;
pub mod reader;
pub mod storage;

pub use convert::convert_ticktick_tasks;
