// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Paragraph chunking for uploaded documents

use std::sync::OnceLock;

use regex::Regex;

/// Paragraphs at or below this many UTF-16 code units are dropped
pub const DEFAULT_MIN_CHUNK_LEN: usize = 20;

fn blank_line() -> &'static Regex {
    static BLANK_LINE: OnceLock<Regex> = OnceLock::new();
    BLANK_LINE.get_or_init(|| Regex::new(r"\n\s*\n").expect("valid blank-line regex"))
}

/// Split `text` on blank lines, trim each paragraph and keep those longer
/// than `min_len` UTF-16 code units.
pub fn split_paragraphs(text: &str, min_len: usize) -> Vec<String> {
    let normalized = text.replace("\r\n", "\n");
    blank_line()
        .split(&normalized)
        .map(str::trim)
        .filter(|p| p.encode_utf16().count() > min_len)
        .map(str::to_string)
        .collect()
}
