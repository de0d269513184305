//! Command Handlers 实现
//!
//! 所有 CommandHandler 的具体实现

mod book_handlers;
mod image_handlers;
mod story_handlers;

pub use book_handlers::*;
pub use image_handlers::*;
pub use story_handlers::*;
