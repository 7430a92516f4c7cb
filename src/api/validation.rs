use regex::Regex;
use std::sync::LazyLock;
use url::Url;

use super::ApiError;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

static SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("valid slug regex"));

pub fn validate_email(email: &str) -> Result<&str, ApiError> {
    if !EMAIL_RE.is_match(email) {
        return Err(ApiError::validation("Invalid email format"));
    }
    Ok(email)
}

pub fn validate_required(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::validation(format!("{field} is required")));
    }
    Ok(())
}

pub fn validate_max_len(field: &str, value: &str, max: usize) -> Result<(), ApiError> {
    if value.chars().count() > max {
        return Err(ApiError::validation(format!(
            "{field} must be {max} characters or less"
        )));
    }
    Ok(())
}

pub fn validate_rating(rating: i32) -> Result<i32, ApiError> {
    if !(1..=5).contains(&rating) {
        return Err(ApiError::validation("Rating must be between 1 and 5"));
    }
    Ok(rating)
}

pub fn validate_one_of(field: &str, value: &str, allowed: &[&str]) -> Result<(), ApiError> {
    if !allowed.contains(&value) {
        return Err(ApiError::validation(format!(
            "{field} must be one of: {}",
            allowed.join(", ")
        )));
    }
    Ok(())
}

/// Hand-edited slugs: lowercase alphanumerics with interior hyphens,
/// 3 to 60 characters. Auto-generated slugs satisfy this by construction
/// except for very short titles, which go through here too.
pub fn validate_slug(slug: &str) -> Result<&str, ApiError> {
    if !(3..=crate::slug::MAX_SLUG_LEN).contains(&slug.len()) {
        return Err(ApiError::validation(
            "Slug must be between 3 and 60 characters",
        ));
    }
    if !SLUG_RE.is_match(slug) {
        return Err(ApiError::validation(
            "Slug may only contain lowercase letters, digits and hyphens",
        ));
    }
    Ok(slug)
}

/// Links on slides, testimonials and banners: an absolute URL or a
/// site-rooted path.
pub fn validate_link(field: &str, value: &str) -> Result<(), ApiError> {
    if value.starts_with('/') || Url::parse(value).is_ok() {
        return Ok(());
    }
    Err(ApiError::validation(format!(
        "{field} must be a URL or an absolute path"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("ana@x.com").is_ok());
        assert!(validate_email("first.last@sub.domain.org").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("a b@x.com").is_err());
        assert!(validate_email("missing@tld").is_err());
    }

    #[test]
    fn test_validate_required() {
        assert!(validate_required("Name", "Ana").is_ok());
        assert!(validate_required("Name", "").is_err());
        assert!(validate_required("Name", "   ").is_err());
    }

    #[test]
    fn test_validate_max_len() {
        assert!(validate_max_len("Title", "short", 200).is_ok());
        assert!(validate_max_len("Title", &"x".repeat(201), 200).is_err());
    }

    #[test]
    fn test_validate_rating() {
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(5).is_ok());
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
    }

    #[test]
    fn test_validate_slug() {
        assert!(validate_slug("my-first-post").is_ok());
        assert!(validate_slug("post2024").is_ok());
        assert!(validate_slug("ab").is_err());
        assert!(validate_slug("UPPER-case").is_err());
        assert!(validate_slug("-leading").is_err());
        assert!(validate_slug("double--hyphen").is_err());
        assert!(validate_slug(&"a".repeat(61)).is_err());
    }

    #[test]
    fn test_validate_link() {
        assert!(validate_link("Link", "/about").is_ok());
        assert!(validate_link("Link", "https://example.com/x").is_ok());
        assert!(validate_link("Link", "not a link").is_err());
    }

    #[test]
    fn test_validate_one_of() {
        assert!(validate_one_of("Type", "news", &["system", "news"]).is_ok());
        assert!(validate_one_of("Type", "bogus", &["system", "news"]).is_err());
    }
}
