pub const MAX_USERNAME_LEN: usize = 39;

/// Check a GitHub username: 1-39 ASCII alphanumerics or hyphens, starting and
/// ending with an alphanumeric. Consecutive hyphens are accepted, as GitHub
/// still has legacy accounts that use them.
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.is_empty() {
        return Err("Username is required".to_string());
    }

    if username.chars().count() > MAX_USERNAME_LEN {
        return Err(format!(
            "Username must be {} characters or less",
            MAX_USERNAME_LEN
        ));
    }

    let bytes = username.as_bytes();
    let allowed = bytes.iter().all(|b| b.is_ascii_alphanumeric() || *b == b'-');
    let first_ok = bytes.first().is_some_and(u8::is_ascii_alphanumeric);
    let last_ok = bytes.last().is_some_and(u8::is_ascii_alphanumeric);

    if !(allowed && first_ok && last_ok) {
        return Err("Username may only contain alphanumeric characters or hyphens, \
                    and cannot begin or end with a hyphen"
            .to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_valid_usernames() {
        for name in ["a", "octocat", "my-user", "my--user", "A1"] {
            assert!(validate_username(name).is_ok(), "{}", name);
        }
        assert!(validate_username(&"a".repeat(39)).is_ok());
    }

    #[test]
    fn test_empty() {
        assert_eq!(validate_username(""), Err("Username is required".to_string()));
    }

    #[test]
    fn test_too_long() {
        let err = validate_username(&"a".repeat(40)).unwrap_err();
        assert!(err.contains("39 characters"));
    }

    #[test]
    fn test_bad_characters_and_edges() {
        for name in ["-abc", "abc-", "-", "has space", "under_score", "dot.name", "émile"] {
            assert!(validate_username(name).is_err(), "{}", name);
        }
    }
}
