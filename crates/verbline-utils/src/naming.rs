//! Flag-name derivation
//!
//! Fields that do not declare an explicit long name are exposed under the
//! kebab-case form of their identifier (`noCache` → `no-cache`,
//! `BuildArgs` → `build-args`).

/// Convert a field identifier to its kebab-case flag name.
///
/// A hyphen is inserted before every uppercase letter that is not the first
/// character, then the whole string is lowercased. A hyphen is never inserted
/// directly after an existing `-`, so the result has no doubled, leading or
/// trailing hyphens that the input did not already carry.
///
/// The conversion is idempotent: the output contains no uppercase letters, so
/// a second pass returns it unchanged.
///
/// # Example
///
/// ```rust
/// use verbline_utils::naming::kebab;
///
/// assert_eq!(kebab("noCache"), "no-cache");
/// assert_eq!(kebab("RemoveIntermediateContainers"), "remove-intermediate-containers");
/// assert_eq!(kebab("log-file"), "log-file");
/// ```
#[must_use]
pub fn kebab(identifier: &str) -> String {
    let mut out = String::with_capacity(identifier.len() + 4);
    let mut prev: Option<char> = None;

    for ch in identifier.chars() {
        if ch.is_uppercase() && prev.is_some_and(|p| p != '-') {
            out.push('-');
        }
        out.extend(ch.to_lowercase());
        prev = Some(ch);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_camel_case() {
        assert_eq!(kebab("noCache"), "no-cache");
        assert_eq!(kebab("buildArgs"), "build-args");
        assert_eq!(kebab("healthCheckUrl"), "health-check-url");
    }

    #[test]
    fn test_pascal_case() {
        assert_eq!(kebab("Dockerfile"), "dockerfile");
        assert_eq!(kebab("CacheFrom"), "cache-from");
        assert_eq!(kebab("LogFile"), "log-file");
    }

    #[test]
    fn test_every_uppercase_starts_a_segment() {
        // Acronyms split per letter, matching the original naming rule
        assert_eq!(kebab("HTTPProxy"), "h-t-t-p-proxy");
    }

    #[test]
    fn test_already_kebab_is_unchanged() {
        assert_eq!(kebab("no-cache"), "no-cache");
        assert_eq!(kebab("context"), "context");
    }

    #[test]
    fn test_no_double_hyphen_after_existing_hyphen() {
        assert_eq!(kebab("log-File"), "log-file");
    }

    #[test]
    fn test_empty() {
        assert_eq!(kebab(""), "");
    }

    proptest! {
        #[test]
        fn prop_kebab_is_idempotent(id in "[a-zA-Z][a-zA-Z0-9-]{0,24}") {
            let once = kebab(&id);
            prop_assert_eq!(kebab(&once), once);
        }

        #[test]
        fn prop_kebab_adds_no_leading_or_trailing_hyphen(id in "[a-zA-Z][a-zA-Z0-9]{0,24}") {
            let out = kebab(&id);
            prop_assert!(!out.starts_with('-'));
            prop_assert!(!out.ends_with('-'));
        }

        #[test]
        fn prop_kebab_has_no_uppercase(id in "[a-zA-Z0-9]{0,24}") {
            prop_assert!(!kebab(&id).chars().any(char::is_uppercase));
        }
    }
}
