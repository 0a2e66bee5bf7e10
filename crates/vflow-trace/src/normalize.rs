//! Name normalization applied before target matching.

/// Removes every ASCII digit from `name`, preserving the order of the
/// remaining characters.
///
/// Compilers suffix SSA values derived from a source variable with
/// counters (`cfg_a1`, `cfg_a.2`), so matching strips digits wherever they
/// occur. Pure and idempotent; empty input yields empty output.
pub fn normalize(name: &str) -> String {
    name.chars().filter(|c| !c.is_ascii_digit()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn strips_suffix_digits() {
        assert_eq!(normalize("cfg_a1"), "cfg_a");
        assert_eq!(normalize("_terrain_alt42"), "_terrain_alt");
    }

    #[test]
    fn strips_digits_anywhere() {
        assert_eq!(normalize("v1x2"), "vx");
        assert_eq!(normalize("1a2b3"), "ab");
    }

    #[test]
    fn empty_and_digit_only_inputs() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("123"), "");
    }

    #[test]
    fn leaves_digit_free_names_alone() {
        assert_eq!(normalize("cfg_timeout"), "cfg_timeout");
    }

    proptest! {
        #[test]
        fn output_contains_no_digits(name in "\\PC*") {
            prop_assert!(!normalize(&name).chars().any(|c| c.is_ascii_digit()));
        }

        #[test]
        fn idempotent(name in "\\PC*") {
            let once = normalize(&name);
            prop_assert_eq!(normalize(&once), once);
        }

        #[test]
        fn preserves_non_digit_order(name in "\\PC*") {
            let expected: String = name.chars().filter(|c| !c.is_ascii_digit()).collect();
            prop_assert_eq!(normalize(&name), expected);
        }
    }
}
