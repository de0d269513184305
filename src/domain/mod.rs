//! Domain Layer - 领域层
//!
//! 包含:
//! - Book Context: 故事书、书页与组装状态机
//! - 段落分割器

pub mod book;

mod paragraph_segmenter;

pub use paragraph_segmenter::{join_paragraphs, segment_paragraphs, PARAGRAPH_SEPARATOR};
