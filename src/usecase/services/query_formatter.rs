use url::form_urlencoded::byte_serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub url: String,
}

/// Joins the non-empty trimmed parts and the locale hint with single spaces
/// and appends the percent-encoded text to `search_url`.
pub fn build_query(
    name: &str,
    city: &str,
    subcategory: &str,
    hint: &str,
    search_url: &str,
) -> SearchQuery {
    let text = [name, city, subcategory, hint]
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    // Form encoding writes spaces as '+'; a literal '+' is already %2B.
    let encoded = byte_serialize(text.as_bytes())
        .collect::<String>()
        .replace('+', "%20");
    SearchQuery {
        url: format!("{search_url}{encoded}"),
        text,
    }
}
