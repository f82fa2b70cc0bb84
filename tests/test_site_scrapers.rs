use mytaste_import::{import_html, ImportRules, SpiceRules};

const LECKER_ABNEHMEN_PAGE: &str = r#"
<!DOCTYPE html>
<html>
<head>
    <meta property="og:title" content="Zucchini-Puffer | Lecker Abnehmen">
    <meta property="og:image" content="https://leckerabnehmen.com/wp-content/puffer.jpg">
</head>
<body>
    <article>
        <h1>Zucchini-Puffer</h1>
        <p>Schnell gemacht und kalorienarm.</p>
        <h2>Zutaten (4 Stück)</h2>
        <p>1 Zucchini <span class="hint">(ca. 250 g)</span></p>
        <p>1 Ei</p>
        <p>2 EL Haferflocken</p>
        <div class="ai-viewports"><p>Anzeige</p></div>
        <p>Salz</p>
        <p>Pfeffer</p>
        <h2>Zubereitung</h2>
        <p>Zucchini raspeln und ausdrücken.</p>
        <p>Mit Ei und Haferflocken <i>gründlich</i> vermengen.</p>
        <p>In einer Pfanne goldbraun braten.</p>
        <h2>Nährwerte</h2>
        <p>120 kcal pro Stück</p>
    </article>
</body>
</html>
"#;

const LILYA_PAGE: &str = r#"
<!DOCTYPE html>
<html>
<head><meta property="og:image" content="https://lilya.momycooks.com/syrniki.jpg"></head>
<body>
    <h1 class="entry-title">Syrniki</h1>
    <h2>Zutaten</h2>
    <ul class="wp-block-list">
        <li><strong>500 g Quark</strong> (20 % Fett)</li>
        <li><strong>2 Eier</strong></li>
        <li><strong>Salz</strong> nach Geschmack</li>
    </ul>
    <h2>Anleitung</h2>
    <ol>
        <li>Quark mit Eiern verrühren.</li>
        <li>Kleine Fladen formen und <span>von beiden Seiten</span> braten.</li>
    </ol>
</body>
</html>
"#;

fn spice_rules() -> ImportRules {
    ImportRules {
        rename_rules: Vec::new(),
        spice_rules: SpiceRules {
            spices: ["Salz", "Pfeffer"].iter().map(|s| s.to_string()).collect(),
            spice_map: Default::default(),
        },
    }
}

#[test]
fn test_lecker_abnehmen_import() {
    let url = "https://leckerabnehmen.com/zucchini-puffer/";
    let result = import_html(url, LECKER_ABNEHMEN_PAGE, &spice_rules()).unwrap();

    assert_eq!(result.title, "Zucchini-Puffer");
    assert_eq!(result.url, url);
    assert_eq!(result.image, "https://leckerabnehmen.com/wp-content/puffer.jpg");

    let names: Vec<&str> = result.ingredients.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Zucchini", "Ei", "Haferflocken"]);
    assert_eq!(result.spices, vec!["Salz", "Pfeffer"]);
    assert_eq!(
        result.instructions,
        vec![
            "Zucchini raspeln und ausdrücken.",
            "Mit Ei und Haferflocken vermengen.",
            "In einer Pfanne goldbraun braten."
        ]
    );
}

#[test]
fn test_lilya_momycooks_import_on_subdomain_path() {
    let url = "https://lilya.momycooks.com/syrniki/";
    let result = import_html(url, LILYA_PAGE, &spice_rules()).unwrap();

    assert_eq!(result.title, "Syrniki");
    assert_eq!(result.image, "https://lilya.momycooks.com/syrniki.jpg");

    let parsed: Vec<(&str, Option<f64>, Option<&str>)> = result
        .ingredients
        .iter()
        .map(|i| (i.name.as_str(), i.amount, i.unit.as_deref()))
        .collect();
    assert_eq!(
        parsed,
        vec![("Quark", Some(500.0), Some("g")), ("Eier", Some(2.0), None)]
    );
    assert_eq!(result.spices, vec!["Salz"]);
    assert_eq!(
        result.instructions,
        vec!["Quark mit Eiern verrühren.", "Kleine Fladen formen und braten."]
    );
}

#[test]
fn test_scraped_steps_keep_escaped_markup() {
    let html = r#"
        <html><body>
        <h1>Rezept-Export</h1>
        <h2>Zutaten</h2>
        <p>1 Tasse Kaffee</p>
        <h2>Zubereitung</h2>
        <p>Tippe &amp;lt;Enter&amp;gt; ein</p>
        <p>Kaffee &amp; Milch mischen</p>
        </body></html>
    "#;

    let result = import_html("https://leckerabnehmen.com/q/", html, &ImportRules::default()).unwrap();

    assert_eq!(
        result.instructions,
        vec!["Tippe &lt;Enter&gt; ein", "Kaffee & Milch mischen"]
    );
}
