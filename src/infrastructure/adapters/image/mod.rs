//! Image Adapter - 插图生成客户端实现

mod fake_image_client;
mod hf_image_client;

pub use fake_image_client::FakeImageClient;
pub use hf_image_client::*;
