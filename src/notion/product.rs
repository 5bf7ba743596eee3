//! Product extraction
//!
//! Flattens one database page into a [`Product`]. Every field is an ordered
//! list of lookup paths below the page's property; the first path that yields
//! a usable value wins, otherwise the field default applies.

use serde::Serialize;
use serde_json::Value;

use crate::config::PropertyNames;

/// Title used when a page has no usable title text
pub const UNTITLED: &str = "Untitled";

/// One wishlist entry as served on the data route
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub title: String,
    pub url: String,
    pub bought: bool,
    pub note: String,
    pub image: String,
}

impl Default for Product {
    fn default() -> Self {
        Self {
            title: UNTITLED.to_string(),
            url: String::new(),
            bought: false,
            note: String::new(),
            image: String::new(),
        }
    }
}

/// One step of a lookup path
#[derive(Debug, Clone, Copy)]
enum Step {
    Key(&'static str),
    Index(usize),
}

use Step::{Index, Key};

type Attempts = &'static [&'static [Step]];

const TITLE: Attempts = &[
    &[Key("rich_text"), Index(0), Key("plain_text")],
    &[Key("title"), Index(0), Key("plain_text")],
];
const URL: Attempts = &[&[Key("url")]];
const BOUGHT: Attempts = &[&[Key("checkbox")]];
const NOTE: Attempts = &[&[Key("rich_text"), Index(0), Key("plain_text")]];
const IMAGE: Attempts = &[
    &[Key("files"), Index(0), Key("external"), Key("url")],
    &[Key("files"), Index(0), Key("file"), Key("url")],
];

impl Product {
    /// Build a product from one page of a database query result.
    ///
    /// Never fails: missing or mistyped data falls back to field defaults.
    pub fn from_page(page: &Value, names: &PropertyNames) -> Self {
        let defaults = Self::default();

        Self {
            title: text_field(property(page, &names.title), TITLE).unwrap_or(defaults.title),
            url: text_field(property(page, &names.url), URL).unwrap_or(defaults.url),
            bought: flag_field(property(page, &names.bought), BOUGHT).unwrap_or(defaults.bought),
            note: text_field(property(page, &names.note), NOTE).unwrap_or(defaults.note),
            image: text_field(property(page, &names.image), IMAGE).unwrap_or(defaults.image),
        }
    }
}

/// Map every page of a query payload's `results`, keeping order
///
/// A payload without a `results` array yields no products.
pub fn products_from_query(payload: &Value, names: &PropertyNames) -> Vec<Product> {
    payload
        .get("results")
        .and_then(Value::as_array)
        .map(|pages| {
            pages
                .iter()
                .map(|page| Product::from_page(page, names))
                .collect()
        })
        .unwrap_or_default()
}

fn property<'a>(page: &'a Value, name: &str) -> Option<&'a Value> {
    page.get("properties")?.get(name)
}

fn walk<'a>(value: &'a Value, path: &[Step]) -> Option<&'a Value> {
    path.iter().try_fold(value, |current, step| match *step {
        Key(key) => current.get(key),
        Index(index) => current.get(index),
    })
}

fn text_field(property: Option<&Value>, attempts: Attempts) -> Option<String> {
    let property = property?;
    attempts
        .iter()
        .filter_map(|path| walk(property, path).and_then(Value::as_str))
        .find(|text| !text.is_empty())
        .map(str::to_owned)
}

fn flag_field(property: Option<&Value>, attempts: Attempts) -> Option<bool> {
    let property = property?;
    attempts
        .iter()
        .find_map(|path| walk(property, path).and_then(Value::as_bool))
}
