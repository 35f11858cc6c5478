//! Managed-block merge into hosts-file text. Pure, no I/O.

use crate::target::Target;

/// Is this line a managed-block start marker for any target?
fn is_any_block_start(line: &str) -> bool {
    let t = line.trim_start();
    t.starts_with("# ") && t.contains(" Hosts Start")
}

/// Is this line a managed-block end marker for any target?
fn is_any_block_end(line: &str) -> bool {
    let t = line.trim_start();
    t.starts_with("# ") && t.contains(" Hosts End")
}

/// Merge `rules_text` into `hosts_text` as the managed block for `target`.
///
/// The previous block for `target` (prefix-matched markers, tolerating the
/// trailing timestamp on the start marker) is dropped, as are stray
/// unmanaged lines that mention a target domain. Everything else - including
/// other targets' managed blocks - is copied verbatim in original order.
/// The timestamp is injected by the caller so that identical inputs produce
/// byte-identical output.
pub fn merge_rules(hosts_text: &str, rules_text: &str, target: Target, timestamp: &str) -> String {
    let retained = strip_target_content(hosts_text, target);

    format!(
        "{}\n\n{} - Updated at {}\n{}\n{}\n",
        retained.trim_end(),
        target.start_marker(),
        timestamp,
        rules_text,
        target.end_marker(),
    )
}

/// Remove the target's managed block and stray target-domain lines,
/// preserving all other content (foreign managed blocks included) verbatim.
fn strip_target_content(hosts_text: &str, target: Target) -> String {
    let start_marker = target.start_marker();
    let end_marker = target.end_marker();
    let domains = target.domains();

    let mut retained: Vec<&str> = Vec::new();
    let mut in_target_block = false;
    let mut in_foreign_block = false;

    for line in hosts_text.lines() {
        let trimmed = line.trim();

        if in_target_block {
            if trimmed.starts_with(&end_marker) {
                in_target_block = false;
            }
            continue;
        }

        // Foreign managed blocks are preserved byte-for-byte, and their
        // interior is shielded from the stray-line cleanup below.
        if in_foreign_block {
            retained.push(line);
            if is_any_block_end(line) {
                in_foreign_block = false;
            }
            continue;
        }

        if trimmed.starts_with(&start_marker) {
            in_target_block = true;
            continue;
        }
        if trimmed.starts_with(&end_marker) {
            // A stray end marker without a start is dropped too.
            continue;
        }
        if is_any_block_start(line) {
            in_foreign_block = true;
            retained.push(line);
            continue;
        }

        // Stray entries for this target predating the managed-block
        // convention are cleaned up; other targets' lines are left alone.
        if !trimmed.is_empty()
            && !trimmed.starts_with('#')
            && domains.iter().any(|d| trimmed.contains(d))
        {
            continue;
        }

        retained.push(line);
    }

    retained.join("\n")
}

/// Extract the data lines of the target's managed block from merged text.
/// Marker lines are stripped; returns None when no block is present.
pub fn managed_block_lines(hosts_text: &str, target: Target) -> Option<Vec<String>> {
    let start_marker = target.start_marker();
    let end_marker = target.end_marker();

    let mut in_block = false;
    let mut found = false;
    let mut lines = Vec::new();

    for line in hosts_text.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with(&start_marker) {
            in_block = true;
            found = true;
            continue;
        }
        if trimmed.starts_with(&end_marker) {
            in_block = false;
            continue;
        }
        if in_block {
            lines.push(line.to_string());
        }
    }

    if found {
        Some(lines)
    } else {
        None
    }
}

/// Whether the hosts text currently contains a managed block for `target`.
pub fn has_managed_block(hosts_text: &str, target: Target) -> bool {
    managed_block_lines(hosts_text, target).is_some()
}
