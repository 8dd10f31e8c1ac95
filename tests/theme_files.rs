use std::fs;

use tempfile::TempDir;
use windrules::{resolve, GenerationPass, Theme, ThemeError, ThemeUsage};

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_load_json_theme() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "theme.json",
        r##"{
            "radius": { "DEFAULT": "4px", "card": "12px" },
            "colors": { "brand": { "DEFAULT": "#0af", "500": "#08c" } },
            "fontFamily": { "sans": "Inter" }
        }"##,
    );

    let theme = Theme::load(&path).unwrap();
    let mut usage = ThemeUsage::new();

    let card = resolve("rounded-card", &theme, &mut usage).unwrap();
    assert_eq!(card.css.get("border-radius"), Some("var(--radius-card)"));

    let brand = resolve("b-brand", &theme, &mut usage).unwrap();
    assert_eq!(
        brand.css.get("border-color"),
        Some("color-mix(in oklch, var(--colors-brand) calc(var(--un-border-opacity) * 100%), transparent)")
    );

    assert_eq!(
        usage.to_css_variables(&theme),
        ":root{--colors-brand:#0af;--radius-card:12px;}"
    );
}

#[test]
fn test_load_yaml_theme() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "theme.yml",
        "radius:\n  pill: \"999px\"\ncolors:\n  ink:\n    \"900\": \"#111\"\n",
    );

    let theme = Theme::load(&path).unwrap();
    let mut pass = GenerationPass::new(&theme);
    let sheet = pass.generate(["rounded-pill", "b-t-ink-900", "rounded-md"]);

    assert_eq!(sheet.matched, vec!["rounded-pill", "b-t-ink-900"]);
    assert_eq!(sheet.unmatched, vec!["rounded-md"]);
    assert_eq!(
        pass.theme_variables(),
        ":root{--colors-ink-900:#111;--radius-pill:999px;}"
    );
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = Theme::load(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, ThemeError::Io { .. }));
    assert!(err.to_string().contains("absent.json"));
}

#[test]
fn test_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "theme.toml", "[radius]\nmd = \"6px\"\n");
    let err = Theme::load(&path).unwrap_err();
    assert!(matches!(err, ThemeError::UnsupportedFormat { .. }));
}

#[test]
fn test_wrong_shape_is_rejected() {
    let dir = TempDir::new().unwrap();

    let json = write(&dir, "bad.json", r#"{ "radius": { "md": 6 } }"#);
    assert!(matches!(Theme::load(&json), Err(ThemeError::Json(_))));

    let yaml = write(&dir, "bad.yaml", "colors:\n  - red\n");
    assert!(matches!(Theme::load(&yaml), Err(ThemeError::Yaml(_))));
}

#[test]
fn test_empty_theme_still_resolves_numbers() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "empty.json", "{}");
    let theme = Theme::load(&path).unwrap();
    let mut usage = ThemeUsage::new();

    assert!(resolve("b-x-2", &theme, &mut usage).is_some());
    assert!(resolve("rounded-4", &theme, &mut usage).is_some());
    assert!(resolve("rounded", &theme, &mut usage).is_none());
    assert!(resolve("b-red-500", &theme, &mut usage).is_none());
    assert!(usage.is_empty());
}
