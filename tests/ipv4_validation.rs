//! Strict IPv4 dotted-quad validation.

use hostpatch::rules::is_valid_ipv4;

#[test]
fn accepts_valid_quads() {
    for s in ["0.0.0.0", "1.2.3.4", "127.0.0.1", "255.255.255.255", "140.82.112.3"] {
        assert!(is_valid_ipv4(s), "{s} should be valid");
    }
}

#[test]
fn rejects_wrong_part_counts() {
    for s in ["", "1", "1.2", "1.2.3", "1.2.3.4.5", "...", "1.2.3."] {
        assert!(!is_valid_ipv4(s), "{s} should be invalid");
    }
}

#[test]
fn rejects_out_of_range_octets() {
    for s in ["256.0.0.1", "1.2.3.999", "300.300.300.300"] {
        assert!(!is_valid_ipv4(s), "{s} should be invalid");
    }
}

#[test]
fn rejects_extraneous_characters() {
    for s in [
        "1.2.3.4 ",
        " 1.2.3.4",
        "+1.2.3.4",
        "1.2.3.-4",
        "a.b.c.d",
        "1.2.3.4a",
        "::1",
        "1.2.3.0x4",
        "1234.1.1.1",
    ] {
        assert!(!is_valid_ipv4(s), "{s:?} should be invalid");
    }
}

#[test]
fn empty_parts_are_invalid() {
    for s in ["1..2.3", ".1.2.3", "1.2.3..", "1.2..3"] {
        assert!(!is_valid_ipv4(s), "{s} should be invalid");
    }
}
