/// Title-cases free text: every space-separated word gets an uppercase first
/// letter and a lowercase rest. Only single spaces are word boundaries, so
/// runs of spaces survive untouched and hyphenated words keep one capital.
pub fn title_case(value: &str) -> String {
    value
        .to_lowercase()
        .split(' ')
        .map(capitalize_first)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Uppercases the first character and leaves the rest alone.
pub fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
