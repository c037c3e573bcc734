/// Uppercase the first character and lowercase the rest ("rEX" -> "Rex").
pub fn capitalize(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Join the non-empty phrases with a single space and lowercase the result.
pub fn join_phrases<I>(phrases: I) -> String
where
    I: IntoIterator<Item = Option<String>>,
{
    phrases
        .into_iter()
        .flatten()
        .filter(|p| !p.trim().is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
