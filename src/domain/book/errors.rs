//! Book Context - Errors

use thiserror::Error;

use super::AssemblyStage;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BookError {
    #[error("提示词不能为空")]
    EmptyPrompt,

    #[error("故事没有可用的段落")]
    NoParagraphs,

    #[error("无效的状态转换: {from} -> {to}")]
    InvalidTransition {
        from: AssemblyStage,
        to: AssemblyStage,
    },
}
