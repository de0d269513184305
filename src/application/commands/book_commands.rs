//! Book Commands

use crate::domain::book::StoryLength;

/// 生成整本故事书
#[derive(Debug, Clone)]
pub struct GenerateBook {
    pub prompt: String,
    pub genre: Option<String>,
    /// 未指定时使用配置中的默认篇幅
    pub length: Option<StoryLength>,
}

/// 只生成故事正文
#[derive(Debug, Clone)]
pub struct GenerateStory {
    pub prompt: String,
    pub genre: Option<String>,
    pub length: StoryLength,
}

/// 只生成一张插图
#[derive(Debug, Clone)]
pub struct GenerateImage {
    pub prompt: String,
}
