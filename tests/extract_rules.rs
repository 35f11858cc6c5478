//! Rule extraction: filtering, validation, ordering.

use hostpatch::rules::extract_rules;
use hostpatch::target::Target;

#[test]
fn keeps_target_lines_and_drops_others() {
    let body = "1.2.3.4 github.com\n5.6.7.8 notarealsite.com\n";
    let rules = extract_rules(body, Target::Github);
    assert_eq!(rules.lines, vec!["1.2.3.4 github.com"]);
}

#[test]
fn skips_blank_and_comment_lines() {
    let body = "\n# 1.2.3.4 github.com\n   \n9.9.9.9 api.github.com\n";
    let rules = extract_rules(body, Target::Github);
    assert_eq!(rules.lines, vec!["9.9.9.9 api.github.com"]);
}

#[test]
fn requires_valid_ipv4_first_token() {
    let body = "\
999.0.0.1 github.com
github.com has moved
140.82.112.3 github.com
::1 github.com
";
    let rules = extract_rules(body, Target::Github);
    assert_eq!(rules.lines, vec!["140.82.112.3 github.com"]);
}

#[test]
fn substring_match_applies_to_whole_line() {
    // The domain filter is a whole-line substring check, so a match outside
    // the hostname column still qualifies the line.
    let body = "1.1.1.1 mirror.example # see raw.githubusercontent.com\n";
    let rules = extract_rules(body, Target::Github);
    assert_eq!(
        rules.lines,
        vec!["1.1.1.1 mirror.example # see raw.githubusercontent.com"]
    );
}

#[test]
fn match_is_case_sensitive() {
    let body = "1.2.3.4 GITHUB.COM\n";
    assert!(extract_rules(body, Target::Github).is_empty());
}

#[test]
fn preserves_order_and_duplicates() {
    let body = "\
2.2.2.2 gist.github.com
1.1.1.1 github.com
1.1.1.1 github.com
";
    let rules = extract_rules(body, Target::Github);
    assert_eq!(
        rules.lines,
        vec![
            "2.2.2.2 gist.github.com",
            "1.1.1.1 github.com",
            "1.1.1.1 github.com",
        ]
    );
}

#[test]
fn other_targets_domains_are_ignored() {
    let body = "1.2.3.4 replit.com\n5.6.7.8 github.com\n";
    let github = extract_rules(body, Target::Github);
    assert_eq!(github.lines, vec!["5.6.7.8 github.com"]);
    let replit = extract_rules(body, Target::Replit);
    assert_eq!(replit.lines, vec!["1.2.3.4 replit.com"]);
}
