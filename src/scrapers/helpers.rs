//! HTML traversal shared by the site scrapers.

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::node::Element;
use scraper::{ElementRef, Html, Node, Selector};

static OG_TITLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[property="og:title"]"#).unwrap());
static OG_IMAGE: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[property="og:image"]"#).unwrap());
static ARTICLE_IMAGE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("article img, figure img").unwrap());
static LIST_ITEM: Lazy<Selector> = Lazy::new(|| Selector::parse("li").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Inline elements dropped from paragraph and list item text.
const DECORATIVE_TAGS: [&str; 3] = ["i", "span", "br"];
const DECORATIVE_CLASS: &str = "ai-viewports";

/// Text of the first element matching `selector`, falling back to `og:title`.
pub fn extract_title(document: &Html, selector: &str) -> String {
    let primary = parse_selector(selector)
        .and_then(|selector| document.select(&selector).next())
        .map(|el| collapse_whitespace(&el.text().collect::<String>()))
        .unwrap_or_default();

    if !primary.is_empty() {
        return primary;
    }

    meta_content(document, &OG_TITLE)
}

/// `og:image`, falling back to the first image inside an article or figure.
pub fn extract_image(document: &Html) -> String {
    let image = meta_content(document, &OG_IMAGE);
    if !image.is_empty() {
        return image;
    }

    document
        .select(&ARTICLE_IMAGE)
        .next()
        .and_then(|img| img.value().attr("src"))
        .map(|src| src.trim().to_string())
        .unwrap_or_default()
}

/// Collects the paragraphs following the first `heading` whose text matches
/// `pattern`, up to the next heading of the same tag.
pub fn paragraph_section(document: &Html, heading: &str, pattern: &Regex) -> Vec<String> {
    let Some(anchor) = find_heading(document, heading, pattern) else {
        return Vec::new();
    };

    section_siblings(anchor, heading)
        .filter(|el| el.value().name() == "p")
        .map(clean_text)
        .filter(|text| !text.is_empty())
        .collect()
}

/// Collects the list items of the first list matching `list_selector` that
/// follows the matching heading. With `item_selector`, only the text of that
/// nested element is taken from each item.
pub fn list_section(
    document: &Html,
    heading: &str,
    pattern: &Regex,
    list_selector: &str,
    item_selector: Option<&str>,
) -> Vec<String> {
    let Some(anchor) = find_heading(document, heading, pattern) else {
        return Vec::new();
    };
    let Some(list_selector) = parse_selector(list_selector) else {
        return Vec::new();
    };
    let item_selector = match item_selector {
        Some(selector) => match parse_selector(selector) {
            Some(selector) => Some(selector),
            None => return Vec::new(),
        },
        None => None,
    };

    let Some(list) = section_siblings(anchor, heading).find(|el| list_selector.matches(el)) else {
        debug!("No list after heading {:?}", element_text(anchor));
        return Vec::new();
    };

    list.select(&LIST_ITEM)
        .map(|li| match &item_selector {
            Some(selector) => collapse_whitespace(
                &li.select(selector)
                    .flat_map(|el| el.text())
                    .collect::<String>(),
            ),
            None => clean_text(li),
        })
        .filter(|text| !text.is_empty())
        .collect()
}

/// Text with decorative inline elements removed and whitespace collapsed.
pub fn clean_text(element: ElementRef) -> String {
    let mut text = String::new();
    push_text(element, &mut text);
    collapse_whitespace(&text)
}

fn push_text(element: ElementRef, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) if !is_decorative(el) => {
                if let Some(child) = ElementRef::wrap(child) {
                    push_text(child, out);
                }
            }
            _ => {}
        }
    }
}

fn is_decorative(element: &Element) -> bool {
    DECORATIVE_TAGS.contains(&element.name())
        || element.classes().any(|class| class == DECORATIVE_CLASS)
}

fn find_heading<'a>(document: &'a Html, heading: &str, pattern: &Regex) -> Option<ElementRef<'a>> {
    let selector = parse_selector(heading)?;
    let found = document
        .select(&selector)
        .find(|el| pattern.is_match(&element_text(*el)));
    if found.is_none() {
        debug!("No <{}> matching {:?}", heading, pattern.as_str());
    }
    found
}

/// Element siblings after `anchor` until the next `heading` element.
fn section_siblings<'a>(
    anchor: ElementRef<'a>,
    heading: &'a str,
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    anchor
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .take_while(move |el| el.value().name() != heading)
}

fn element_text(element: ElementRef) -> String {
    collapse_whitespace(&element.text().collect::<String>())
}

fn meta_content(document: &Html, selector: &Selector) -> String {
    document
        .select(selector)
        .next()
        .and_then(|meta| meta.value().attr("content"))
        .map(|content| content.trim().to_string())
        .unwrap_or_default()
}

fn parse_selector(selector: &str) -> Option<Selector> {
    match Selector::parse(selector) {
        Ok(selector) => Some(selector),
        Err(e) => {
            debug!("Invalid selector {:?}: {:?}", selector, e);
            None
        }
    }
}

fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}
