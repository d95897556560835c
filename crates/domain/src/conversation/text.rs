//! Small text helpers shared by the extractor and the classifier.

use regex_lite::Regex;

/// A message with at least this many whitespace-separated tokens is a description.
pub const DESCRIPTION_MIN_WORDS: usize = 12;

/// Whitespace-separated token count.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Title-case a keyword, turning hyphens into spaces: "post-apocalyptic" -> "Post Apocalyptic".
pub fn title_case(raw: &str) -> String {
    raw.replace('-', " ")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

pub(crate) fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid regex")
}

pub(crate) fn compile_all(patterns: &[&str]) -> Vec<Regex> {
    patterns.iter().map(|p| compile(p)).collect()
}

/// Word-boundary anchored literal, so "car" never matches inside "cartoon".
pub(crate) fn keyword_regex(keyword: &str) -> Regex {
    compile(&format!(r"\b{}\b", regex_lite::escape(keyword)))
}

pub(crate) fn any_match(patterns: &[Regex], text: &str) -> bool {
    patterns.iter().any(|re| re.is_match(text))
}
