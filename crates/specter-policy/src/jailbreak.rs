//! Jailbreak heuristic detection.
//!
//! A fixed set of patterns catching attempts to subvert
//! instruction-following behavior. Terms from the policy document are
//! plain substrings; these are the only real regex matches in the
//! engine, including a word-boundary anchor on the bare `jailbreak`
//! term.

use regex::Regex;

/// The fixed heuristic pattern set. Matched against lowercased text.
const JAILBREAK_PATTERNS: &[&str] = &[
    r"ignore (all )?previous instructions",
    r"\bjailbreak\b",
    r"you are no longer bound by",
    r"bypass .*safety",
];

/// Detects jailbreak-like prompts via the fixed pattern set.
pub struct JailbreakDetector {
    patterns: Vec<Regex>,
}

impl JailbreakDetector {
    /// Compile the fixed pattern set.
    pub fn new() -> Self {
        let patterns = JAILBREAK_PATTERNS
            .iter()
            .map(|pat| Regex::new(pat).expect("fixed jailbreak pattern must compile"))
            .collect();
        Self { patterns }
    }

    /// Whether the text looks like a jailbreak attempt.
    ///
    /// Case-insensitive: the input is lowercased before matching.
    pub fn is_match(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.patterns.iter().any(|re| re.is_match(&lower))
    }
}

impl Default for JailbreakDetector {
    fn default() -> Self {
        Self::new()
    }
}
