//! Book Context - Aggregate Root

use serde::{Deserialize, Serialize};

use super::{BookError, Page};
use crate::domain::PARAGRAPH_SEPARATOR;

/// 故事书聚合根
///
/// 不变量：
/// - 至少一页
/// - 页序与段落序一致（按 ordinal 升序）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pages: Vec<Page>,
}

impl Book {
    /// 由书页组装，空集合返回 `BookError::NoParagraphs`
    pub fn assemble(mut pages: Vec<Page>) -> Result<Self, BookError> {
        if pages.is_empty() {
            return Err(BookError::NoParagraphs);
        }
        pages.sort_by_key(|p| p.ordinal);
        Ok(Self { pages })
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn into_pages(self) -> Vec<Page> {
        self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// 缺少插图的页数
    pub fn degraded_count(&self) -> usize {
        self.pages.iter().filter(|p| p.is_degraded()).count()
    }

    /// 全文，段落之间以空行分隔
    pub fn full_text(&self) -> String {
        self.pages
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join(PARAGRAPH_SEPARATOR)
    }
}
