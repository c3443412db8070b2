// Utility functions

/// Turns a kebab-case slug into title-cased words: `mensa-am-park` -> `Mensa Am Park`.
pub fn title_case_slug(slug: &str) -> String {
    slug.split('-')
        .map(title_case_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Concatenates trimmed text fragments, skipping empty ones.
pub fn collapse_text<'a>(fragments: impl Iterator<Item = &'a str>) -> String {
    fragments
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}
