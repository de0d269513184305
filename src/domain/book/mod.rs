//! Book Context - 故事书限界上下文
//!
//! 职责:
//! - 生成请求值对象
//! - 段落与书页实体
//! - 故事书聚合与组装状态机

mod aggregate;
mod entities;
mod errors;
mod stage;
mod value_objects;

pub use aggregate::Book;
pub use entities::{Page, Paragraph};
pub use errors::BookError;
pub use stage::AssemblyStage;
pub use value_objects::{GenerationRequest, ImageRef, StoryLength, DEFAULT_GENRE};
