//! Identifier synthesis for names arriving from the wire. Swagger titles,
//! operation ids, and parameter names are arbitrary text; the model only
//! accepts identifiers, so everything passes through here first.

/// True when `text` already is a legal model identifier.
pub(crate) fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Strips every character that cannot appear in an identifier.
pub(crate) fn sanitize(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii_alphanumeric()).collect()
}

pub(crate) fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Derives a service name from an info title by sanitizing and
/// capitalizing each whitespace-separated word. Returns `None` when
/// nothing identifier-like survives.
pub(crate) fn name_from_title(title: &str) -> Option<String> {
    let name: String = title
        .split_whitespace()
        .map(|word| capitalize(&sanitize(word)))
        .collect();
    is_identifier(&name).then_some(name)
}

/// Fallback method name when the operation id is missing or not a legal
/// identifier: the lowercase verb followed by each sanitized, capitalized
/// path segment with its placeholder braces removed.
pub(crate) fn method_name_from_path(verb: fsd::http::HttpVerb, path: &str) -> String {
    let mut name = verb.as_str().to_ascii_lowercase();
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        name.push_str(&capitalize(&sanitize(segment)));
    }
    name
}

/// Turns an arbitrary wire name into a field name. Identifiers pass
/// through unchanged so the wire name needs no override in that case.
pub(crate) fn field_name(wire_name: &str) -> String {
    if is_identifier(wire_name) {
        return wire_name.to_string();
    }
    let sanitized = sanitize(wire_name);
    if is_identifier(&sanitized) {
        sanitized
    } else {
        format!("field{}", sanitized)
    }
}

/// Lowercases the first character, the inverse of [capitalize].
pub(crate) fn uncapitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
