//! arXiv 编号识别 - 业务能力层

use regex::Regex;
use std::sync::LazyLock;

/// 新式 arXiv 编号：`YYMM.NNNN(N)`，可带版本后缀 `vN`
static ARXIV_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{4}\.\d{4,5}(v\d+)?\b").expect("arXiv 编号正则无效"));

/// 返回文本中第一个 arXiv 编号，找不到时返回空字符串
///
/// 不校验编号是否真实存在
pub fn find_arxiv_id(text: &str) -> String {
    ARXIV_ID_RE
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_id_inside_text() {
        assert_eq!(find_arxiv_id("see arXiv:2310.12345 for details"), "2310.12345");
        assert_eq!(find_arxiv_id("https://arxiv.org/abs/1706.03762v7"), "1706.03762v7");
        assert_eq!(find_arxiv_id("2301.00001: Example Paper"), "2301.00001");
    }

    #[test]
    fn test_first_match_wins() {
        assert_eq!(find_arxiv_id("2401.11111 and 2402.22222"), "2401.11111");
    }

    #[test]
    fn test_no_match() {
        assert_eq!(find_arxiv_id("Attention Is All You Need"), "");
        assert_eq!(find_arxiv_id("version 12.3456"), "");
        assert_eq!(find_arxiv_id(""), "");
    }
}
