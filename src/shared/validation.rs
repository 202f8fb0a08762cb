//! Request field validation helpers

use super::error::SharedError;

/// Minimum password length accepted at registration
pub const MIN_PASSWORD_LEN: usize = 8;

/// Usernames that collide with static route segments
///
/// `/api/auth/creator/profile`, `/api/content/creator/posts/{post_id}` and
/// `/api/users/{follow,unfollow}/{username}` would shadow the creator and
/// follower routes of these names.
pub const RESERVED_USERNAMES: &[&str] = &["posts", "profile", "follow", "unfollow"];

/// Whether `username` is one of [`RESERVED_USERNAMES`], ignoring case
pub fn is_reserved_username(username: &str) -> bool {
    RESERVED_USERNAMES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(username))
}

/// Validate username format
///
/// Usernames must be:
/// - 3-30 characters long
/// - Contain only alphanumeric characters and underscores
/// - Start with a letter
pub fn is_valid_username(username: &str) -> bool {
    if username.len() < 3 || username.len() > 30 {
        return false;
    }

    let mut chars = username.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Basic email check: something on both sides of a single '@'
pub fn is_valid_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

/// Lowercase and trim an email for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Upper-cased first letters of the first and last name
pub fn initials(first_name: &str, last_name: &str) -> String {
    first_name
        .trim()
        .chars()
        .take(1)
        .chain(last_name.trim().chars().take(1))
        .flat_map(char::to_uppercase)
        .collect()
}

/// Return the trimmed value of a required text field
///
/// `None`, empty and whitespace-only values are rejected with `message`.
pub fn required<'a>(
    value: Option<&'a str>,
    field: &str,
    message: &str,
) -> Result<&'a str, SharedError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(SharedError::validation(field, message)),
    }
}

/// Trim an optional text field, mapping blank values to `None`
pub fn optional_trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_usernames() {
        assert!(is_valid_username("alice"));
        assert!(is_valid_username("a_b_123"));
        assert!(!is_valid_username("ab"));
        assert!(!is_valid_username("1alice"));
        assert!(!is_valid_username("alice!"));
        assert!(!is_valid_username(&"a".repeat(31)));
    }

    #[test]
    fn test_reserved_usernames() {
        assert!(is_reserved_username("posts"));
        assert!(is_reserved_username("Profile"));
        assert!(is_reserved_username("unfollow"));
        assert!(!is_reserved_username("poster"));
    }

    #[test]
    fn test_email_check() {
        assert!(is_valid_email("user@example.com"));
        assert!(!is_valid_email("userexample.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("a@b@c"));
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  User@Example.COM "), "user@example.com");
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("jane", "doe"), "JD");
        assert_eq!(initials(" ada ", "lovelace"), "AL");
        assert_eq!(initials("", "x"), "X");
    }

    #[test]
    fn test_required_rejects_blank() {
        assert_eq!(required(Some("  hi "), "title", "Title is required").unwrap(), "hi");
        assert!(required(Some("   "), "title", "Title is required").is_err());
        assert!(required(None, "title", "Title is required").is_err());
    }

    #[test]
    fn test_optional_trimmed() {
        assert_eq!(optional_trimmed(Some("  x ".into())), Some("x".to_string()));
        assert_eq!(optional_trimmed(Some("   ".into())), None);
        assert_eq!(optional_trimmed(None), None);
    }
}
