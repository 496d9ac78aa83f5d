//! Coarse "looks like source code" detection for plain text.
//!
//! False positives and negatives are acceptable: this only decides between the
//! source-code and plain-text categories when no typed payload says otherwise.

use once_cell::sync::Lazy;
use regex::RegexSet;

const MIN_LINES: usize = 3;
const SCANNED_LINES: usize = 20;
const MIN_MATCHING_LINES: usize = 2;

static CODE_PATTERNS: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new([
        // Statement and declaration keywords at line start
        r"^\s*(func|fn|def|class|struct|enum|impl|trait|interface|import|package|public|private|protected|static|const|let|var|val|return|elif|else|switch|case|try|catch|using|namespace|module|export|async|await)\b",
        r"^\s*(if|for|while)\s*[(\[]",
        // Preprocessor and query keywords
        r"^\s*#(include|import|define|pragma)\b",
        r"^\s*(SELECT|INSERT|UPDATE|DELETE|CREATE|ALTER)\s",
        // Lines ending in an opening brace or a semicolon
        r"[{;]\s*$",
        // Lines made only of closing brackets
        r"^\s*[})\]]+[;,]?\s*$",
        // Arrow and scope operators
        r"=>|->|::|:=",
        // Comment markers
        r"^\s*(//|/\*|\*/)",
        // Shebang
        r"^#!",
    ])
    .expect("code heuristic patterns are valid")
});

/// Whether `text` has at least three lines and at least two of its first
/// twenty lines match one of the code patterns.
pub fn looks_like_source_code(text: &str) -> bool {
    let lines: Vec<&str> = text.lines().collect();
    if lines.len() < MIN_LINES {
        return false;
    }

    lines
        .iter()
        .take(SCANNED_LINES)
        .filter(|line| CODE_PATTERNS.is_match(line))
        .count()
        >= MIN_MATCHING_LINES
}
