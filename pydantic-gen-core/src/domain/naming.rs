// pydantic-gen-core/src/domain/naming.rs
//
// Turns raw configuration keys into Python class names (PascalCase) and
// field names (snake_case).

use crate::domain::error::DomainError;

const PYTHON_KEYWORDS: [&str; 35] = [
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if",
    "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try",
    "while", "with", "yield",
];

pub fn is_python_keyword(name: &str) -> bool {
    PYTHON_KEYWORDS.contains(&name)
}

/// Letters, `_` and ASCII digits. Other numeric characters (`½`, `²`) are
/// rejected by Python.
fn is_identifier_char(c: char) -> bool {
    c == '_' || c.is_alphabetic() || c.is_ascii_digit()
}

pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first == '_' || first.is_alphabetic() => chars.all(is_identifier_char),
        _ => false,
    }
}

/// Replaces umlauts with their two-letter spelling and every character that
/// can not appear in an identifier with `replacement`.
pub fn replace_invalid_characters(name: &str, replacement: char) -> String {
    let mut valid = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            'ä' | 'Ä' => valid.push_str("ae"),
            'ö' | 'Ö' => valid.push_str("oe"),
            'ü' | 'Ü' => valid.push_str("ue"),
            'ß' => valid.push_str("ss"),
            c if is_identifier_char(c) => valid.push(c),
            _ => valid.push(replacement),
        }
    }
    valid
}

/// Valid class name in PascalCase. Names starting with a digit get the
/// `Model` prefix.
pub fn class_name(name: &str) -> String {
    let mut class_name = replace_invalid_characters(name, ' ');

    // underscores indicate snake case
    if class_name.contains('_') {
        let words: Vec<String> = class_name
            .split('_')
            .filter(|w| !w.is_empty())
            .map(|w| {
                if is_upper(w) {
                    capitalize(w)
                } else {
                    upper_first(w)
                }
            })
            .collect();
        class_name = words.join(" ");
    }

    if is_upper(&class_name) {
        class_name = capitalize(&class_name);
    }

    if class_name
        .trim_start_matches(' ')
        .chars()
        .next()
        .is_none_or(|c| c.is_ascii_digit())
    {
        class_name = format!("Model {}", class_name);
    }

    class_name
        .split(' ')
        .filter(|w| !w.is_empty())
        .map(upper_first)
        .collect()
}

/// Valid field name in snake_case. Names starting with a digit get the
/// `field_` prefix, Python keywords get a trailing `_`.
pub fn field_name(name: &str) -> Result<String, DomainError> {
    let adjusted = replace_invalid_characters(name, '_');

    let words: Vec<String> = adjusted
        .split('_')
        .filter(|w| !w.is_empty())
        .map(|w| if is_upper(w) { w.to_lowercase() } else { w.to_string() })
        .collect();
    let joined = words.join("_");

    // camelCase -> camel_Case, the first character is left alone
    let mut field_name = String::with_capacity(joined.len() + 4);
    for c in joined.chars() {
        if c.is_ascii_uppercase() && !field_name.is_empty() && !field_name.ends_with('_') {
            field_name.push('_');
        }
        field_name.push(c);
    }

    let Some(first) = field_name.chars().next() else {
        return Err(DomainError::EmptyName(name.to_string()));
    };
    if first.is_ascii_digit() {
        field_name = format!("field_{}", field_name);
    }

    let mut field_name = field_name.to_lowercase();
    if is_python_keyword(&field_name) {
        field_name.push('_');
    }
    Ok(field_name)
}

/// Python's `str.isupper()`: at least one cased character and no lower case one.
fn is_upper(s: &str) -> bool {
    let mut cased = false;
    for c in s.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            cased = true;
        }
    }
    cased
}

/// Python's `str.capitalize()`.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
