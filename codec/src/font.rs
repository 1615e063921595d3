//! Font family name parsing with a process-wide memo.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use once_cell::sync::Lazy;

/// Parsed family lists keyed by the raw family string.
///
/// Entries are pure functions of their key and are never removed, so a
/// lost race only costs a duplicate parse.
static PARSED_FONTS: Lazy<RwLock<HashMap<String, Arc<[String]>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Splits a raw family list into cleaned family names.
///
/// Entries are separated by commas. Each entry is trimmed, then quote and
/// backslash characters are removed. Empty entries keep their position;
/// only trailing empty segments after the last comma are discarded.
///
/// The result is memoized: repeated calls with the same raw string return
/// the same shared slice.
///
/// ```
/// let names = codec::parse_font_name(r#"Arial, "Helvetica", sans"#);
/// assert_eq!(&names[..], ["Arial", "Helvetica", "sans"]);
/// ```
#[must_use]
pub fn parse_font_name(raw: &str) -> Arc<[String]> {
    {
        let cache = PARSED_FONTS.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(names) = cache.get(raw) {
            return Arc::clone(names);
        }
    }
    let parsed = parse_uncached(raw);
    let mut cache = PARSED_FONTS.write().unwrap_or_else(PoisonError::into_inner);
    Arc::clone(cache.entry(raw.to_owned()).or_insert(parsed))
}

fn parse_uncached(raw: &str) -> Arc<[String]> {
    let mut entries: Vec<&str> = raw.split(',').collect();
    if entries.len() > 1 {
        while entries.last().is_some_and(|entry| entry.is_empty()) {
            entries.pop();
        }
    }
    entries
        .into_iter()
        .map(|entry| {
            entry
                .trim()
                .chars()
                .filter(|ch| *ch != '"' && *ch != '\\')
                .collect::<String>()
        })
        .collect()
}
