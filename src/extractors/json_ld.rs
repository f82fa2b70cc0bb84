use super::ParsingContext;
use crate::instructions::{flatten_instructions, RawInstructions};
use crate::model::RawRecipe;
use html_escape::decode_html_entities;
use log::debug;
use once_cell::sync::Lazy;
use scraper::Selector;
use serde::de::IgnoredAny;
use serde::Deserialize;
use serde_json::Value;

static LD_JSON: Lazy<Selector> =
    Lazy::new(|| Selector::parse("script[type='application/ld+json']").unwrap());

/// Reads schema.org Recipe metadata embedded as JSON-LD.
pub struct JsonLdExtractor;

impl JsonLdExtractor {
    /// Returns the first Recipe found in document order, or `None` when the
    /// page carries no usable metadata.
    pub fn parse(&self, context: &ParsingContext) -> Option<RawRecipe> {
        debug!("JsonLdExtractor: Starting parse for URL: {}", context.url);

        for (index, script) in context.document.select(&LD_JSON).enumerate() {
            let raw_json = script.inner_html();

            let json_ld = match serde_json::from_str::<Value>(&raw_json) {
                Ok(json_ld) => json_ld,
                Err(e) => {
                    debug!("JsonLdExtractor: Failed to parse JSON-LD {}: {}", index, e);
                    continue;
                }
            };

            let Some(recipe) = LdBlock::classify(json_ld).into_recipe() else {
                debug!("JsonLdExtractor: No recipe found in JSON-LD {}", index);
                continue;
            };

            match serde_json::from_value::<JsonLdRecipe>(recipe) {
                Ok(recipe) => {
                    debug!("JsonLdExtractor: Found recipe in JSON-LD {}", index);
                    return Some(recipe.into_raw());
                }
                Err(e) => {
                    debug!("JsonLdExtractor: Failed to read recipe {}: {}", index, e);
                }
            }
        }

        debug!("JsonLdExtractor: No valid recipe found in any JSON-LD script");
        None
    }
}

/// The shapes a JSON-LD block comes in.
enum LdBlock {
    Node(Value),
    List(Vec<Value>),
    Graph(Vec<Value>),
}

impl LdBlock {
    fn classify(value: Value) -> Self {
        match value {
            Value::Array(items) => LdBlock::List(items),
            Value::Object(mut map) if !is_recipe_type(&map) => match map.remove("@graph") {
                Some(Value::Array(items)) => LdBlock::Graph(items),
                Some(other) => {
                    map.insert("@graph".to_string(), other);
                    LdBlock::Node(Value::Object(map))
                }
                None => LdBlock::Node(Value::Object(map)),
            },
            other => LdBlock::Node(other),
        }
    }

    fn into_recipe(self) -> Option<Value> {
        match self {
            LdBlock::Node(node) => is_recipe(&node).then_some(node),
            LdBlock::List(items) | LdBlock::Graph(items) => items.into_iter().find(is_recipe),
        }
    }
}

fn is_recipe(value: &Value) -> bool {
    value.as_object().is_some_and(is_recipe_type)
}

fn is_recipe_type(node: &serde_json::Map<String, Value>) -> bool {
    let is_recipe_str = |value: &Value| {
        value
            .as_str()
            .is_some_and(|t| t.eq_ignore_ascii_case("recipe"))
    };

    match node.get("@type") {
        Some(Value::Array(types)) => types.iter().any(is_recipe_str),
        Some(value) => is_recipe_str(value),
        None => false,
    }
}

#[derive(Debug, Deserialize)]
struct JsonLdRecipe {
    #[serde(default)]
    name: Option<Value>,
    #[serde(default)]
    image: Option<ImageType>,
    #[serde(rename = "recipeIngredient", default)]
    recipe_ingredient: Option<RecipeIngredients>,
    #[serde(rename = "recipeInstructions", default)]
    recipe_instructions: Option<RawInstructions>,
}

#[derive(Debug, Deserialize)]
struct ImageObject {
    url: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ImageType {
    String(String),
    Object(ImageObject),
    Multiple(Vec<ImageType>),
    Unknown(IgnoredAny),
}

impl ImageType {
    fn url(&self) -> String {
        match self {
            ImageType::String(url) => decode_html_symbols(url),
            ImageType::Object(image) => decode_html_symbols(&image.url),
            ImageType::Multiple(images) => images.first().map(ImageType::url).unwrap_or_default(),
            ImageType::Unknown(_) => String::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecipeIngredients {
    Single(String),
    Multiple(Vec<Value>),
    Unknown(IgnoredAny),
}

impl RecipeIngredients {
    fn lines(self) -> Vec<String> {
        let lines = match self {
            RecipeIngredients::Single(line) => vec![line],
            RecipeIngredients::Multiple(items) => items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(line) => Some(line),
                    _ => None,
                })
                .collect(),
            RecipeIngredients::Unknown(_) => Vec::new(),
        };

        lines
            .iter()
            .map(|line| decode_html_symbols(line))
            .filter(|line| !line.is_empty())
            .collect()
    }
}

impl JsonLdRecipe {
    fn into_raw(self) -> RawRecipe {
        RawRecipe {
            title: self
                .name
                .as_ref()
                .and_then(Value::as_str)
                .map(decode_html_symbols)
                .unwrap_or_default(),
            image: self.image.as_ref().map(ImageType::url).unwrap_or_default(),
            ingredients: self
                .recipe_ingredient
                .map(RecipeIngredients::lines)
                .unwrap_or_default(),
            instructions: self
                .recipe_instructions
                .map(|raw| decode_instructions(&raw))
                .unwrap_or_default(),
        }
    }
}

/// JSON-LD strings may still carry HTML entities; steps are decoded here once.
fn decode_instructions(raw: &RawInstructions) -> RawInstructions {
    flatten_instructions(raw)
        .iter()
        .map(|step| decode_html_symbols(step))
        .filter(|step| !step.is_empty())
        .collect::<Vec<_>>()
        .into()
}

fn decode_html_symbols(text: &str) -> String {
    decode_html_entities(text).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_html_document(json_ld: &str) -> String {
        format!(
            r#"
            <!DOCTYPE html>
            <html>
            <head>
                <script type="application/ld+json">
                    {json_ld}
                </script>
            </head>
            <body></body>
            </html>
            "#
        )
    }

    fn parse(html: &str) -> Option<RawRecipe> {
        let context = ParsingContext::new("https://www.chefkoch.de/rezepte/1", html);
        JsonLdExtractor.parse(&context)
    }

    #[test]
    fn test_page_without_metadata() {
        assert!(parse("<html><body><h1>Kuchen</h1></body></html>").is_none());
    }

    #[test]
    fn test_parse_basic_recipe() {
        let json_ld = r#"
        {
            "@context": "https://schema.org/",
            "@type": "Recipe",
            "name": "Kartoffelsuppe",
            "image": "https://example.com/suppe.jpg",
            "recipeIngredient": ["1 kg Kartoffeln", "1 l Gem&uuml;sebr&uuml;he", "Salz"],
            "recipeInstructions": "Kartoffeln schälen.\nIn Brühe kochen."
        }
        "#;

        let recipe = parse(&create_html_document(json_ld)).unwrap();

        assert_eq!(recipe.title, "Kartoffelsuppe");
        assert_eq!(recipe.image, "https://example.com/suppe.jpg");
        assert_eq!(
            recipe.ingredients,
            vec!["1 kg Kartoffeln", "1 l Gemüsebrühe", "Salz"]
        );
        assert_eq!(
            flatten_instructions(&recipe.instructions),
            vec!["Kartoffeln schälen.", "In Brühe kochen."]
        );
    }

    #[test]
    fn test_recipe_in_array() {
        let json_ld = r#"
        [
            { "@type": "WebSite", "name": "Rezeptseite" },
            {
                "@type": "Recipe",
                "name": "Pasta",
                "image": ["https://example.com/p1.jpg", "https://example.com/p2.jpg"]
            }
        ]
        "#;

        let recipe = parse(&create_html_document(json_ld)).unwrap();
        assert_eq!(recipe.title, "Pasta");
        assert_eq!(recipe.image, "https://example.com/p1.jpg");
    }

    #[test]
    fn test_recipe_in_graph() {
        let json_ld = r#"
        {
            "@context": "https://schema.org",
            "@graph": [
                { "@type": "Organization", "name": "Blog" },
                {
                    "@type": ["Recipe", "NewsArticle"],
                    "name": "Brot",
                    "image": { "@type": "ImageObject", "url": "https://example.com/brot.jpg" }
                }
            ]
        }
        "#;

        let recipe = parse(&create_html_document(json_ld)).unwrap();
        assert_eq!(recipe.title, "Brot");
        assert_eq!(recipe.image, "https://example.com/brot.jpg");
    }

    #[test]
    fn test_case_insensitive_type() {
        let recipe = parse(&create_html_document(r#"{ "@type": "recipe", "name": "Salat" }"#));
        assert_eq!(recipe.unwrap().title, "Salat");
    }

    #[test]
    fn test_malformed_block_is_skipped() {
        let html = r#"
            <html><head>
            <script type="application/ld+json">{ "@type": "Recipe", "name": </script>
            <script type="application/ld+json">{ "@type": "Recipe", "name": "Zweiter" }</script>
            </head><body></body></html>
        "#;
        assert_eq!(parse(html).unwrap().title, "Zweiter");
    }

    #[test]
    fn test_first_recipe_wins() {
        let html = r#"
            <html><head>
            <script type="application/ld+json">{ "@type": "BreadcrumbList" }</script>
            <script type="application/ld+json">{ "@type": "Recipe", "name": "Erster" }</script>
            <script type="application/ld+json">{ "@type": "Recipe", "name": "Zweiter" }</script>
            </head><body></body></html>
        "#;
        assert_eq!(parse(html).unwrap().title, "Erster");
    }

    #[test]
    fn test_missing_and_odd_fields_default_to_empty() {
        let json_ld = r#"
        {
            "@type": "Recipe",
            "image": { "@type": "ImageObject", "width": 800 },
            "recipeIngredient": [" ", "2 Eier", { "name": "Mehl" }],
            "recipeInstructions": { "@type": "HowToStep", "text": "kein Array" }
        }
        "#;

        let recipe = parse(&create_html_document(json_ld)).unwrap();
        assert_eq!(recipe.title, "");
        assert_eq!(recipe.image, "");
        assert_eq!(recipe.ingredients, vec!["2 Eier"]);
        assert!(flatten_instructions(&recipe.instructions).is_empty());
    }

    #[test]
    fn test_unreadable_ingredients_and_image_are_ignored() {
        let json_ld = r#"
        {
            "@type": "Recipe",
            "name": "Eintopf",
            "image": 42,
            "recipeIngredient": { "@type": "ItemList", "itemListElement": ["Linsen"] }
        }
        "#;

        let recipe = parse(&create_html_document(json_ld)).unwrap();
        assert_eq!(recipe.title, "Eintopf");
        assert_eq!(recipe.image, "");
        assert!(recipe.ingredients.is_empty());
    }

    #[test]
    fn test_instruction_entities_are_decoded() {
        let json_ld = r#"
        {
            "@type": "Recipe",
            "recipeInstructions": [
                { "@type": "HowToStep", "text": "Teig &amp; F&uuml;llung mischen" },
                { "@type": "HowToStep", "text": "&nbsp;" }
            ]
        }
        "#;

        let recipe = parse(&create_html_document(json_ld)).unwrap();
        assert_eq!(
            flatten_instructions(&recipe.instructions),
            vec!["Teig & Füllung mischen"]
        );
    }

    #[test]
    fn test_non_recipe_metadata_is_a_miss() {
        let json_ld = r#"{ "@type": "Article", "@graph": { "@type": "Recipe" } }"#;
        assert!(parse(&create_html_document(json_ld)).is_none());
    }
}
