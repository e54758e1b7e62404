/// Checks whether all bytes in the given slice are lowercase alphanumeric ASCII characters.
///
/// # Arguments
///
/// * `src` - A byte slice to check.
///
/// # Returns
///
/// `true` if all bytes are lowercase alphanumeric ASCII characters, otherwise `false`.
pub(super) fn is_lowercase_alpha_numeric(src: &[u8]) -> bool {
    src.iter()
        .all(|b| b.is_ascii_digit() || b.is_ascii_lowercase())
}

/// Returns the value of the first `KEY=VALUE` entry whose key is `key`.
///
/// The first match wins when the same key appears more than once. Returns an
/// empty string if no entry matches.
pub(super) fn find_value<'a>(env: &'a [String], key: &str) -> &'a str {
    env.iter()
        .find_map(|entry| {
            entry
                .strip_prefix(key)
                .and_then(|rest| rest.strip_prefix('='))
        })
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(entries: &[&str]) -> Vec<String> {
        entries.iter().map(|e| e.to_string()).collect()
    }

    #[test]
    fn test_is_lowercase_alpha_numeric() {
        let valid = b"abc123";
        assert!(is_lowercase_alpha_numeric(valid));

        let with_upper = b"abcXYZ123";
        assert!(!is_lowercase_alpha_numeric(with_upper));

        let with_symbol = b"abc/123";
        assert!(!is_lowercase_alpha_numeric(with_symbol));
    }

    #[test]
    fn test_find_value_first_match_wins() {
        let env = env(&["SERVICE_NAME=web", "SERVICE_NAME=api"]);
        assert_eq!(find_value(&env, "SERVICE_NAME"), "web");
    }

    #[test]
    fn test_find_value_requires_exact_key() {
        let env = env(&["SERVICE_NAME_OVERRIDE=x", "SERVICE_NAME=web"]);
        assert_eq!(find_value(&env, "SERVICE_NAME"), "web");
    }

    #[test]
    fn test_find_value_keeps_equals_in_value() {
        let env = env(&["OPTS=a=b"]);
        assert_eq!(find_value(&env, "OPTS"), "a=b");
    }

    #[test]
    fn test_find_value_missing() {
        let env = env(&["PATH=/usr/bin"]);
        assert_eq!(find_value(&env, "SERVICE_NAME"), "");
    }
}
