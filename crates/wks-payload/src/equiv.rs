//! Pluggable string-equivalence predicate used throughout matching.
//!
//! The relation is symmetric but NOT transitive: "alpha" equates to
//! "alpha build" and to "alpha build straight", but callers must not chain
//! results across candidates. The reconciler relies on this being a direct
//! pairwise check only.

/// Canonical text form: trimmed, lowercased, internal whitespace collapsed
/// to single spaces.
pub fn normalize(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// `true` iff the normalized forms are equal or either is a non-empty
/// substring of the other. Blank inputs never equate.
pub fn equivalent(a: &str, b: &str) -> bool {
    let left = normalize(a);
    let right = normalize(b);

    if left.is_empty() || right.is_empty() {
        return false;
    }
    if left == right {
        return true;
    }

    left.contains(&right) || right.contains(&left)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_collapses_whitespace_and_case() {
        assert_eq!(normalize("  Alpha\t  Project "), "alpha project");
    }

    #[test]
    fn equal_after_normalization() {
        assert!(equivalent("ALPHA  Project", "alpha project"));
    }

    #[test]
    fn substring_equates_both_directions() {
        assert!(equivalent("Alpha", "Alpha Project"));
        assert!(equivalent("Alpha Project", "Alpha"));
    }

    #[test]
    fn blank_never_equates() {
        assert!(!equivalent("", ""));
        assert!(!equivalent("   ", "Alpha"));
        assert!(!equivalent("Alpha", ""));
    }

    #[test]
    fn unrelated_labels_do_not_equate() {
        assert!(!equivalent("Alpha", "Beta"));
    }

    #[test]
    fn relation_is_not_transitive() {
        // a ~ b and b ~ c does not imply a ~ c.
        let a = "alpha";
        let b = "alpha beta";
        let c = "beta";
        assert!(equivalent(a, b));
        assert!(equivalent(b, c));
        assert!(!equivalent(a, c));
    }
}
