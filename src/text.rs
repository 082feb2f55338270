use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Lowercases, strips diacritics and drops everything that is not a letter.
///
/// `"Café con Leche!"` becomes `"cafeconleche"`, `"Año"` becomes `"ano"`.
pub fn normalize_answer(raw: &str) -> String {
    raw.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_alphabetic())
        .collect()
}

/// Normalizes a single typed character, `None` if nothing survives.
pub fn normalize_letter(c: char) -> Option<char> {
    let mut buf = [0u8; 4];
    let normalized = normalize_answer(c.encode_utf8(&mut buf));
    let mut chars = normalized.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) => Some(letter),
        _ => None,
    }
}
