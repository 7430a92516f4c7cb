//! URL slug normalization for blog titles.
//!
//! Uniqueness is handled by the blog repository; this module only produces
//! the canonical slug for a title.

/// Maximum slug length; longer titles are cut at this many characters.
pub const MAX_SLUG_LEN: usize = 60;

/// Derive the canonical slug: lowercase, diacritics folded, anything outside
/// `[a-z0-9\s-]` dropped, whitespace and hyphen runs collapsed to single
/// hyphens, edge hyphens trimmed, capped at 60 characters.
///
/// An empty result means the title had no usable characters; callers reject
/// that as invalid input.
#[must_use]
pub fn slugify(title: &str) -> String {
    let mut cleaned = String::with_capacity(title.len());

    let mut push = |c: char| {
        let lower = c.to_ascii_lowercase();
        if lower.is_ascii_lowercase() || lower.is_ascii_digit() {
            cleaned.push(lower);
        } else if lower.is_whitespace() || lower == '-' || lower == '_' {
            cleaned.push(' ');
        }
    };

    for c in title.chars() {
        match fold_diacritic(c) {
            Some(folded) => folded.chars().for_each(&mut push),
            None => push(c),
        }
    }

    let mut slug = cleaned.split_whitespace().collect::<Vec<_>>().join("-");

    if slug.len() > MAX_SLUG_LEN {
        slug.truncate(MAX_SLUG_LEN);
    }

    slug.trim_matches('-').to_string()
}

/// Fold common Latin diacritics to their ASCII base letter. Characters not
/// in the table pass through unchanged and are filtered by `slugify`.
fn fold_diacritic(c: char) -> Option<&'static str> {
    let folded = match c {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' | 'Á' | 'À' | 'Â' | 'Ä' | 'Ã' | 'Å' => "a",
        'é' | 'è' | 'ê' | 'ë' | 'É' | 'È' | 'Ê' | 'Ë' => "e",
        'í' | 'ì' | 'î' | 'ï' | 'Í' | 'Ì' | 'Î' | 'Ï' => "i",
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' | 'Ó' | 'Ò' | 'Ô' | 'Ö' | 'Õ' => "o",
        'ú' | 'ù' | 'û' | 'ü' | 'Ú' | 'Ù' | 'Û' | 'Ü' => "u",
        'ñ' | 'Ñ' => "n",
        'ç' | 'Ç' => "c",
        'ý' | 'ÿ' | 'Ý' => "y",
        'ß' => "ss",
        'æ' | 'Æ' => "ae",
        'ø' | 'Ø' => "o",
        _ => return None,
    };
    Some(folded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_titles() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("  Spaces   everywhere  "), "spaces-everywhere");
        assert_eq!(slugify("Already-hyphenated title"), "already-hyphenated-title");
    }

    #[test]
    fn test_strips_punctuation() {
        assert_eq!(slugify("What's new in 2024?"), "whats-new-in-2024");
        assert_eq!(slugify("C++ / Rust: a comparison!"), "c-rust-a-comparison");
    }

    #[test]
    fn test_folds_diacritics() {
        assert_eq!(slugify("Selección de personal"), "seleccion-de-personal");
        assert_eq!(slugify("Él ñandú"), "el-nandu");
    }

    #[test]
    fn test_collapses_hyphen_runs() {
        assert_eq!(slugify("a -- b --- c"), "a-b-c");
        assert_eq!(slugify("a__b___c"), "a-b-c");
    }

    #[test]
    fn test_trims_edge_hyphens() {
        assert_eq!(slugify("-leading and trailing-"), "leading-and-trailing");
    }

    #[test]
    fn test_truncates_to_max_len() {
        let long = "word ".repeat(30);
        let slug = slugify(&long);
        assert!(slug.len() <= MAX_SLUG_LEN);
        assert!(!slug.ends_with('-'));
    }

    #[test]
    fn test_idempotent() {
        for title in ["Hello World", "Qué pasa, amigo?", "a -- b", "2024: year in review"] {
            let once = slugify(title);
            assert_eq!(slugify(&once), once);
        }
    }

    #[test]
    fn test_charset() {
        let slug = slugify("Mixed CASE & sím*bols 42");
        assert!(slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        assert!(!slug.starts_with('-'));
        assert!(!slug.ends_with('-'));
    }

    #[test]
    fn test_empty_after_normalization() {
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify("¿¿??"), "");
        assert_eq!(slugify(""), "");
    }
}
