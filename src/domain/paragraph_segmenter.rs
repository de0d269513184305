//! 段落分割器
//!
//! 以空行为界把故事正文切分为有序段落

use super::book::Paragraph;

/// 段落之间的分隔符（与分割规则互逆）
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// 检查是否为空行（只包含空白字符）
#[inline]
fn is_blank_line(line: &str) -> bool {
    line.trim().is_empty()
}

/// 把 `text[start..end]` 去除首尾空白后追加为段落
fn push_paragraph(paragraphs: &mut Vec<Paragraph>, segment: &str) {
    let trimmed = segment.trim();
    if trimmed.is_empty() {
        return;
    }
    paragraphs.push(Paragraph {
        ordinal: paragraphs.len(),
        text: trimmed.to_string(),
    });
}

/// 对故事正文进行分段
///
/// 分段策略：
/// 1. 按行扫描（支持 \n 和 \r\n）
/// 2. 只含空白的行视为段落分隔
/// 3. 去除每段首尾空白，丢弃空段，保持原有顺序，不去重
///
/// 不会失败；返回空序列表示正文没有可用内容
pub fn segment_paragraphs(text: &str) -> Vec<Paragraph> {
    let mut paragraphs = Vec::new();
    let mut start = 0;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        let line_end = offset + line.len();
        if is_blank_line(line) {
            push_paragraph(&mut paragraphs, &text[start..offset]);
            start = line_end;
        }
        offset = line_end;
    }

    // 剩余内容
    push_paragraph(&mut paragraphs, &text[start..]);

    paragraphs
}

/// 以空行重新拼接段落
pub fn join_paragraphs(paragraphs: &[Paragraph]) -> String {
    paragraphs
        .iter()
        .map(|p| p.text.as_str())
        .collect::<Vec<_>>()
        .join(PARAGRAPH_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(paragraphs: &[Paragraph]) -> Vec<&str> {
        paragraphs.iter().map(|p| p.text.as_str()).collect()
    }

    #[test]
    fn test_blank_line_splits() {
        let text = "Once upon a time.\n\nThe dragon woke.\n\nThe end.";
        let paragraphs = segment_paragraphs(text);

        assert_eq!(
            texts(&paragraphs),
            vec!["Once upon a time.", "The dragon woke.", "The end."]
        );
        let ordinals: Vec<usize> = paragraphs.iter().map(|p| p.ordinal).collect();
        assert_eq!(ordinals, vec![0, 1, 2]);
    }

    #[test]
    fn test_whitespace_only_line_is_delimiter() {
        let text = "First.\n   \t\nSecond.";
        assert_eq!(texts(&segment_paragraphs(text)), vec!["First.", "Second."]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let text = "First line\r\nstill first.\r\n\r\nSecond.\r\n";
        assert_eq!(
            texts(&segment_paragraphs(text)),
            vec!["First line\r\nstill first.", "Second."]
        );
    }

    #[test]
    fn test_single_newline_does_not_split() {
        let text = "  line one\nline two  ";
        assert_eq!(texts(&segment_paragraphs(text)), vec!["line one\nline two"]);
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert!(segment_paragraphs("").is_empty());
        assert!(segment_paragraphs("   ").is_empty());
        assert!(segment_paragraphs("\n\n \n\t\n\n").is_empty());
    }

    #[test]
    fn test_runs_of_blank_lines_collapse() {
        let text = "\n\n\nA\n\n\n\n\nB\n\n\n";
        assert_eq!(texts(&segment_paragraphs(text)), vec!["A", "B"]);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let text = "Same.\n\nSame.\n\nSame.";
        assert_eq!(segment_paragraphs(text).len(), 3);
    }

    #[test]
    fn test_segmentation_is_idempotent() {
        let samples = [
            "A.\n\nB.\n\nC.",
            "  lead\n\n\n  \n middle\nwith break \r\n\r\ntail  ",
            "only one paragraph",
            "第一段。\n\n第二段，\n仍是第二段。",
        ];

        for text in samples {
            let once = segment_paragraphs(text);
            let twice = segment_paragraphs(&join_paragraphs(&once));
            assert_eq!(once, twice, "not idempotent for {:?}", text);
        }
    }
}
