//! Book Context - 组装状态机

use serde::{Deserialize, Serialize};

use super::BookError;

/// 组装阶段
///
/// ```text
/// Idle -> GeneratingStory -> Segmenting -> GeneratingImages -> Assembled
///               |                |
///               +----> Errored <-+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssemblyStage {
    Idle,
    GeneratingStory,
    Segmenting,
    GeneratingImages,
    Assembled,
    Errored,
}

impl AssemblyStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssemblyStage::Idle => "idle",
            AssemblyStage::GeneratingStory => "generating_story",
            AssemblyStage::Segmenting => "segmenting",
            AssemblyStage::GeneratingImages => "generating_images",
            AssemblyStage::Assembled => "assembled",
            AssemblyStage::Errored => "errored",
        }
    }

    /// 终止状态
    pub fn is_terminal(&self) -> bool {
        matches!(self, AssemblyStage::Assembled | AssemblyStage::Errored)
    }

    /// 检查转换是否合法
    ///
    /// GeneratingImages 不会进入 Errored：插图失败只降级单页
    pub fn can_transition_to(&self, next: AssemblyStage) -> bool {
        use AssemblyStage::*;
        matches!(
            (self, next),
            (Idle, GeneratingStory)
                | (Idle, Errored)
                | (GeneratingStory, Segmenting)
                | (GeneratingStory, Errored)
                | (Segmenting, GeneratingImages)
                | (Segmenting, Errored)
                | (GeneratingImages, Assembled)
        )
    }

    /// 执行转换
    pub fn transition(&mut self, next: AssemblyStage) -> Result<(), BookError> {
        if !self.can_transition_to(next) {
            return Err(BookError::InvalidTransition { from: *self, to: next });
        }
        *self = next;
        Ok(())
    }
}

impl Default for AssemblyStage {
    fn default() -> Self {
        AssemblyStage::Idle
    }
}

impl std::fmt::Display for AssemblyStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
