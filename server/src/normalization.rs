use serde::{Deserialize, Deserializer};

/// Normalizes a text field by stripping surrounding whitespace. Inner
/// whitespace is preserved.
///
/// ```
/// use backend::normalization::normalize_field;
/// assert_eq!(normalize_field(" Acme Corp "), "Acme Corp");
/// ```
pub fn normalize_field(value: impl AsRef<str>) -> String {
    value.as_ref().trim().to_string()
}

/// Deserializes an optional `String` after running it through
/// `normalize_field`.
pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where D: Deserializer<'de> {
    let o: Option<String> = Deserialize::deserialize(deserializer)?;
    Ok(o.map(normalize_field))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::normalize_field;

    fn count_whitespace(s: impl AsRef<str>) -> usize {
        s.as_ref().chars().filter(|c| c.is_whitespace()).count()
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 10000, ..ProptestConfig::default()
        })]

        #[test]
        fn normalization_works(string in "(\\S.*\\S|\\S+)", space_before in "\\s*", space_after in "\\s*") {
            let normalized = normalize_field(format!("{}{}{}", space_before, string, space_after));

            prop_assert!(!normalized.starts_with(char::is_whitespace) && !normalized.ends_with(char::is_whitespace), "{:?} (normalized form of {:?}) has no leading or trailing whitespace", normalized, string);

            let trimmed = normalized.trim();

            prop_assert_eq!(count_whitespace(&normalized), count_whitespace(&trimmed), "{:?} (normalized form of {:?}) preserves inner whitespace", normalized, string);
        }

        #[test]
        fn blank_input_normalizes_to_empty(space in "\\s*") {
            prop_assert_eq!(normalize_field(space), "");
        }
    }
}
