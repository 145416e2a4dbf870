//! Recipe classification
//!
//! Two independent signals are used:
//! - [`looks_like_recipe_url`] is a cheap, purely syntactic check on a URL used
//!   to pick candidates from the link graph without fetching anything
//! - [`is_recipe_page`] inspects fetched markup for schema.org Recipe
//!   structured data, first as microdata and then as JSON-LD

use crate::crawler::parser::extract_title;
use regex::Regex;
use scraper::{Html, Selector};
use serde_json::Value;
use std::sync::LazyLock;

/// Substring identifying the schema.org Recipe type in an `itemtype`
///
/// Matches `http://`, `https://`, protocol-relative and bare forms alike.
const MICRODATA_RECIPE_TYPE: &str = "schema.org/Recipe";

/// The JSON-LD type name that marks a recipe
const JSON_LD_RECIPE_TYPE: &str = "Recipe";

static RECIPE_URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)/recipes?|recipe=|\brecipe\b").expect("recipe URL pattern")
});

/// Returns true if a URL looks like it points at a recipe page
///
/// Case-insensitive match of `/recipe`, `/recipes`, `recipe=` or the
/// standalone word `recipe`. No fetch is made.
///
/// # Examples
///
/// ```
/// use recipe_scout::crawler::looks_like_recipe_url;
///
/// assert!(looks_like_recipe_url("https://example.com/recipes/pasta"));
/// assert!(looks_like_recipe_url("https://example.com/view?recipe=12"));
/// assert!(!looks_like_recipe_url("https://example.com/about"));
/// ```
pub fn looks_like_recipe_url(url: &str) -> bool {
    RECIPE_URL_PATTERN.is_match(url)
}

/// Classifies page markup as a recipe page or not
///
/// Decision order, first match wins:
/// 1. an element whose `itemtype` contains `schema.org/Recipe`
/// 2. a JSON-LD block describing an object of type `Recipe`
/// 3. otherwise not a recipe
///
/// The document title is returned whatever the outcome.
///
/// # Example
///
/// ```
/// use recipe_scout::crawler::is_recipe_page;
///
/// let html = r#"<html><head><title>Pancakes</title></head>
///     <body><div itemscope itemtype="https://schema.org/Recipe"></div></body></html>"#;
/// assert_eq!(is_recipe_page(html), (true, Some("Pancakes".to_string())));
/// ```
pub fn is_recipe_page(html: &str) -> (bool, Option<String>) {
    let document = Html::parse_document(html);
    let title = extract_title(&document);

    let is_recipe = has_microdata_recipe(&document) || has_json_ld_recipe(&document);
    (is_recipe, title)
}

fn has_microdata_recipe(document: &Html) -> bool {
    let Ok(selector) = Selector::parse("[itemtype]") else {
        return false;
    };

    document.select(&selector).any(|element| {
        element
            .value()
            .attr("itemtype")
            .is_some_and(|itemtype| itemtype.contains(MICRODATA_RECIPE_TYPE))
    })
}

fn has_json_ld_recipe(document: &Html) -> bool {
    let Ok(selector) = Selector::parse("script[type]") else {
        return false;
    };

    document
        .select(&selector)
        .filter(|element| {
            element
                .value()
                .attr("type")
                .is_some_and(|t| t.trim().eq_ignore_ascii_case("application/ld+json"))
        })
        .filter_map(|element| parse_json_ld(&element.text().collect::<String>()))
        .any(|payload| contains_recipe(&payload))
}

/// Parses a JSON-LD block, salvaging the outermost object when the block is
/// wrapped in stray text
///
/// Returns None when neither the block nor the salvaged substring parses.
pub fn parse_json_ld(raw: &str) -> Option<Value> {
    match serde_json::from_str(raw.trim()) {
        Ok(value) => Some(value),
        Err(strict_err) => {
            let start = raw.find('{')?;
            let end = raw.rfind('}')?;
            if end <= start {
                return None;
            }

            match serde_json::from_str(&raw[start..=end]) {
                Ok(value) => {
                    tracing::trace!("Salvaged malformed JSON-LD block: {}", strict_err);
                    Some(value)
                }
                Err(e) => {
                    tracing::debug!("Skipping unparseable JSON-LD block: {}", e);
                    None
                }
            }
        }
    }
}

/// Searches a JSON-LD payload for an object typed as a recipe
///
/// Arrays, `@graph` lists and nested objects are all searched.
pub fn contains_recipe(value: &Value) -> bool {
    match value {
        Value::Array(items) => items.iter().any(contains_recipe),
        Value::Object(map) => {
            let typed_recipe = ["@type", "type"]
                .iter()
                .filter_map(|key| map.get(*key))
                .any(is_recipe_type);

            typed_recipe || map.values().any(contains_recipe)
        }
        _ => false,
    }
}

fn is_recipe_type(value: &Value) -> bool {
    match value {
        Value::String(name) => name.eq_ignore_ascii_case(JSON_LD_RECIPE_TYPE),
        Value::Array(names) => names
            .iter()
            .filter_map(Value::as_str)
            .any(|name| name.eq_ignore_ascii_case(JSON_LD_RECIPE_TYPE)),
        _ => false,
    }
}
