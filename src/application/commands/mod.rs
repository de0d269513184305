//! 应用层 - 命令
//!
//! 每个命令驱动一次完整的上游生成流程

mod book_commands;

pub mod handlers;

pub use book_commands::*;
