//! HTTP Handlers

mod book;
mod image;
mod ping;
mod story;

pub use book::*;
pub use image::*;
pub use ping::*;
pub use story::*;
