//! Rule extraction from raw hosts-list text.

use crate::target::Target;

/// Validated rule lines extracted for one target from one fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    pub lines: Vec<String>,
}

impl RuleSet {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Rule text for display and merging: one rule per line, or the
    /// not-found marker when no rules were extracted.
    pub fn to_text(&self, target: Target) -> String {
        if self.lines.is_empty() {
            target.not_found_marker()
        } else {
            self.lines.join("\n")
        }
    }
}

/// Check for a strictly valid IPv4 dotted quad: exactly four dot-separated
/// parts, each a bare base-10 integer in 0-255, no sign, no extra characters.
pub fn is_valid_ipv4(s: &str) -> bool {
    let parts: Vec<&str> = s.split('.').collect();
    if parts.len() != 4 {
        return false;
    }
    parts.iter().all(|part| {
        !part.is_empty()
            && part.len() <= 3
            && part.bytes().all(|b| b.is_ascii_digit())
            && part.parse::<u16>().map(|n| n <= 255).unwrap_or(false)
    })
}

/// Extract the rule lines for `target` from raw hosts-list text.
///
/// A line survives when it is non-blank, not a comment, contains one of the
/// target's domains as a substring anywhere in the line, and its first
/// whitespace-delimited token is a valid IPv4 address. The substring match is
/// deliberately coarse (whole line, case-sensitive) for parity with upstream
/// rule lists. Order is preserved and duplicates pass through.
pub fn extract_rules(content: &str, target: Target) -> RuleSet {
    let domains = target.domains();
    let mut lines = Vec::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if !domains.iter().any(|d| line.contains(d)) {
            continue;
        }
        let first = match line.split_whitespace().next() {
            Some(t) => t,
            None => continue,
        };
        if !is_valid_ipv4(first) {
            continue;
        }
        lines.push(line.to_string());
    }

    RuleSet { lines }
}

/// Validate a caller-supplied rules file for `target`.
///
/// Returns the validated rule set, or an empty set if the file holds only
/// comments/blanks. Lines that fail extraction are reported back so the
/// caller can reject malformed input.
pub fn validate_rules_text(content: &str, target: Target) -> (RuleSet, Vec<String>) {
    let rules = extract_rules(content, target);
    let rejected = content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .filter(|l| !rules.lines.iter().any(|r| r == l))
        .map(String::from)
        .collect();
    (rules, rejected)
}
