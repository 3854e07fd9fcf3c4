//! Translation of obsolete license codes.
//!
//! Older manifests used short uppercase codes (`APACHE2`, `CC0`, ...) and, in
//! some releases, enum-style spellings such as `APACHE_2_0`. Both are mapped
//! to the current canonical key here. Every target is a seeded catalog key.

/// Legacy code → canonical key.
const LEGACY_CODES: &[(&str, &str)] = &[
    ("CC0", "cc0-1.0"),
    ("CC3", "cc-3.0"),
    ("LGPL3", "lgpl-3.0"),
    ("APACHE2", "apache-2.0"),
    ("BSD2", "bsd-2-clause"),
    ("BSD3", "bsd-3-clause"),
    ("APACHE_2_0", "apache-2.0"),
    ("BSD_2", "bsd-2-clause"),
    ("BSD_3", "bsd-3-clause"),
    ("CC0_1_0", "cc0-1.0"),
    ("CC_3_0", "cc-3.0"),
    ("LGPL_3_0", "lgpl-3.0"),
];

/// Return the canonical key for a legacy code, matching case-insensitively.
///
/// ```
/// use homage_license::translate_legacy_code;
///
/// assert_eq!(translate_legacy_code("apache2"), Some("apache-2.0"));
/// assert_eq!(translate_legacy_code("mit"), None);
/// ```
pub fn translate_legacy_code(code: &str) -> Option<&'static str> {
    LEGACY_CODES
        .iter()
        .find(|(legacy, _)| legacy.eq_ignore_ascii_case(code))
        .map(|(_, canonical)| *canonical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::SEEDS;

    #[test]
    fn short_codes_translate() {
        assert_eq!(translate_legacy_code("CC0"), Some("cc0-1.0"));
        assert_eq!(translate_legacy_code("CC3"), Some("cc-3.0"));
        assert_eq!(translate_legacy_code("LGPL3"), Some("lgpl-3.0"));
        assert_eq!(translate_legacy_code("APACHE2"), Some("apache-2.0"));
        assert_eq!(translate_legacy_code("BSD2"), Some("bsd-2-clause"));
        assert_eq!(translate_legacy_code("BSD3"), Some("bsd-3-clause"));
    }

    #[test]
    fn enum_spellings_translate() {
        assert_eq!(translate_legacy_code("APACHE_2_0"), Some("apache-2.0"));
        assert_eq!(translate_legacy_code("lgpl_3_0"), Some("lgpl-3.0"));
    }

    #[test]
    fn matching_ignores_case_but_not_spelling() {
        assert_eq!(translate_legacy_code("Bsd3"), Some("bsd-3-clause"));
        assert_eq!(translate_legacy_code("BSD-3"), None);
        assert_eq!(translate_legacy_code(" BSD3"), None);
        assert_eq!(translate_legacy_code(""), None);
    }

    #[test]
    fn every_target_is_seeded() {
        for (legacy, canonical) in LEGACY_CODES {
            assert!(
                SEEDS.iter().any(|seed| seed.key == *canonical),
                "{legacy} maps to unseeded key {canonical}"
            );
        }
    }
}
