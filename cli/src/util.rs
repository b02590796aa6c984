// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use clap::{Arg, ArgMatches, arg, value_parser};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// The output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ArgOutputFormat {
    Json,
    Table,
}

impl ArgOutputFormat {
    pub fn arg() -> Arg {
        arg!(--"output-format" <FORMAT> "Output format")
            .value_parser(value_parser!(ArgOutputFormat))
            .default_value("table")
    }

    pub fn from(matches: &ArgMatches) -> Self {
        matches
            .get_one("output-format")
            .copied()
            .unwrap_or(ArgOutputFormat::Table)
    }
}

pub fn grapheme_count(s: &str) -> usize {
    s.graphemes(true).count()
}

/// Display width of the first `n` grapheme clusters of `s`.
pub fn width_of_graphemes(s: &str, n: usize) -> usize {
    s[..byte_index_of_grapheme(s, n)].width()
}

/// Byte offset where the grapheme at index `g_idx` starts, or `s.len()` past the end.
pub fn byte_index_of_grapheme(s: &str, g_idx: usize) -> usize {
    s.grapheme_indices(true)
        .nth(g_idx)
        .map_or(s.len(), |(i, _)| i)
}

/// Return the byte range of the grapheme cluster at index `g_idx` in `s`.
pub fn byte_range_of_grapheme_at(s: &str, g_idx: usize) -> Option<std::ops::Range<usize>> {
    s.grapheme_indices(true)
        .nth(g_idx)
        .map(|(start, g)| start..start + g.len())
}

/// Cuts `s` to at most `max` columns, marking the cut with an ellipsis.
pub fn truncate_width(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }

    let mut out = String::new();
    let mut width = 0;
    for g in s.graphemes(true) {
        let w = g.width();
        if width + w + 1 > max {
            break;
        }
        out.push_str(g);
        width += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_of_graphemes_ascii() {
        let s = "hello world";
        assert_eq!(width_of_graphemes(s, 100), 11);
        assert_eq!(width_of_graphemes(s, 5), 5);
        assert_eq!(width_of_graphemes(s, 0), 0);
    }

    #[test]
    fn test_width_of_graphemes_wide_characters() {
        let s = "abc中文def";
        assert_eq!(width_of_graphemes(s, 4), "abc中".width());
        assert_eq!(width_of_graphemes(s, 8), s.width());
        assert_eq!(width_of_graphemes("ＡＢＣ", 2), 4);
    }

    #[test]
    fn test_width_of_graphemes_emoji_cluster() {
        // "👍🏻" is one cluster of two code points
        assert_eq!(width_of_graphemes("👍🏻a", 1), "👍🏻".width());
        assert_eq!(grapheme_count("👍🏻a"), 2);
    }

    #[test]
    fn test_byte_index_of_grapheme() {
        assert_eq!(byte_index_of_grapheme("a中b", 1), 1);
        assert_eq!(byte_index_of_grapheme("a中b", 2), 4);
        assert_eq!(byte_index_of_grapheme("a中b", 3), 5);
        assert_eq!(byte_index_of_grapheme("", 0), 0);
    }

    #[test]
    fn test_byte_range_chinese_multibyte() {
        let s = "a中b";
        assert_eq!(byte_range_of_grapheme_at(s, 0), Some(0..1));
        assert_eq!(byte_range_of_grapheme_at(s, 1), Some(1..4));
        assert_eq!(byte_range_of_grapheme_at(s, 2), Some(4..5));
        assert_eq!(byte_range_of_grapheme_at(s, 3), None);
    }

    #[test]
    fn test_byte_range_combining_mark() {
        // 'e' + combining acute accent is a single cluster of three bytes
        let s = "e\u{0301}b";
        assert_eq!(byte_range_of_grapheme_at(s, 0), Some(0..3));
        assert_eq!(byte_range_of_grapheme_at(s, 1), Some(3..4));
        assert_eq!(byte_range_of_grapheme_at("", 0), None);
    }

    #[test]
    fn test_truncate_width() {
        assert_eq!(truncate_width("Taste Town", 20), "Taste Town");
        assert_eq!(truncate_width("Taste Town", 6), "Taste…");
        assert_eq!(truncate_width("中文中文", 5), "中文…");
    }
}
