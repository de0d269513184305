//! Storage Adapter - 插图文件存储

mod file_storage;

pub use file_storage::FileImageStorage;
