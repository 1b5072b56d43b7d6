//! Locale-aware text collation for Latin-script business data.
//!
//! Three comparison levels, applied in order:
//! 1. base letters (case and diacritics folded away)
//! 2. diacritics (`cafe` < `café`)
//! 3. case (lowercase before uppercase)

use std::cmp::Ordering;

/// Compare two strings the way a Latin-locale UI list sorts them.
#[must_use]
pub fn collate(left: &str, right: &str) -> Ordering {
    let primary = left.chars().flat_map(base_letters).cmp(right.chars().flat_map(base_letters));
    if primary != Ordering::Equal {
        return primary;
    }

    let secondary = left
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(right.chars().flat_map(char::to_lowercase));
    if secondary != Ordering::Equal {
        return secondary;
    }

    // Only case differences remain; lowercase sorts first.
    right.cmp(left)
}

// Fold one character to its lowercase base letters.
fn base_letters(c: char) -> impl Iterator<Item = char> {
    let folded = match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' | 'å' | 'Á' | 'À' | 'Â' | 'Ã' | 'Ä' | 'Å' => Some("a"),
        'æ' | 'Æ' => Some("ae"),
        'ç' | 'Ç' => Some("c"),
        'é' | 'è' | 'ê' | 'ë' | 'É' | 'È' | 'Ê' | 'Ë' => Some("e"),
        'í' | 'ì' | 'î' | 'ï' | 'Í' | 'Ì' | 'Î' | 'Ï' => Some("i"),
        'ñ' | 'Ñ' => Some("n"),
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' | 'ø' | 'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' | 'Ø' => Some("o"),
        'œ' | 'Œ' => Some("oe"),
        'ß' => Some("ss"),
        'ú' | 'ù' | 'û' | 'ü' | 'Ú' | 'Ù' | 'Û' | 'Ü' => Some("u"),
        'ý' | 'ÿ' | 'Ý' => Some("y"),
        _ => None,
    };

    let (ascii, other) = match folded {
        Some(s) => (Some(s.chars()), None),
        None => (None, Some(c.to_lowercase())),
    };

    ascii.into_iter().flatten().chain(other.into_iter().flatten())
}
