use chrono::{DateTime, Local};
use regex::Regex;

/// Parenthesized tags that mark a card variant. Matched as substrings of the
/// group text, so "Tournament Pack Vol. 3" counts as a tournament pack.
pub const CARD_TYPE_TAGS: [&str; 8] = [
    "Alternate Art",
    "Parallel",
    "Box Topper",
    "Promotion Pack",
    "Store Championship Participation Pack",
    "Tournament Pack Vol.",
    "Winner Pack Vol.",
    "Manga",
];

const NAME_SET_DELIMITER: &str = "- ";

lazy_static::lazy_static! {
    static ref PARENTHESIZED_GROUP: Regex = Regex::new(r"\((.*?)\)").unwrap();
}

/// Converts a DateTime object to a string formatted according to the provided format.
/// Defaults to the current date and time if the input is None and the default format is "%d_%m_%Y-%H-%M".
pub fn date_time_as_string(dt: Option<DateTime<Local>>, format: Option<&str>) -> String {
    dt.unwrap_or(Local::now())
        .format(format.unwrap_or("%d_%m_%Y-%H-%M"))
        .to_string()
}

/// Parses a price such as "$1,234.56". Anything that is not a finite number
/// after the currency symbol is removed gives `None`.
pub fn parse_currency(price_as_text: &str) -> Option<f64> {
    price_as_text
        .trim()
        .replace('$', "")
        .replace(',', "")
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
}

/// Name of the card without variant tags or set, e.g.
/// "Monkey.D.Luffy (Alternate Art) - Romance Dawn" gives "Monkey.D.Luffy".
pub fn extract_card_name(full_name: &str) -> String {
    let parenthesis = full_name.find('(');
    let dash = full_name.find(NAME_SET_DELIMITER);

    let end = match (parenthesis, dash) {
        (Some(p), Some(d)) => p.min(d),
        (Some(p), None) => p,
        (None, Some(d)) => d,
        (None, None) => full_name.len(),
    };
    full_name[..end].trim().to_string()
}

/// Everything after the first "- ", trimmed. `None` when the name has no set part.
pub fn extract_set_name(full_name: &str) -> Option<String> {
    full_name
        .split_once(NAME_SET_DELIMITER)
        .map(|(_, set)| set.trim().to_string())
}

pub fn extract_card_types(full_name: &str) -> Vec<String> {
    PARENTHESIZED_GROUP
        .captures_iter(full_name)
        .filter_map(|group| group.get(1))
        .map(|group| group.as_str())
        .filter(|group| CARD_TYPE_TAGS.iter().any(|tag| group.contains(tag)))
        .map(|group| group.to_string())
        .collect()
}
