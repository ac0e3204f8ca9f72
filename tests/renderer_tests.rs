mod utils;

use serde_json::json;
use std::path::PathBuf;
use templet::error::Error;
use templet::renderer::{HelperFunctions, Templater};
use templet::template::{
    parse_recursive, parse_recursive_with_mode_name, TemplateMode, TemplateSetBuilder,
};
use test_log::test;
use utils::write_tree;

fn test_template(template: &str, expected: &str) {
    let tmp_dir = tempfile::tempdir().unwrap();
    write_tree(tmp_dir.path(), &[("t.tmpl", template)]);
    let set = TemplateSetBuilder::new(tmp_dir.path())
        .mode(TemplateMode::Text)
        .extensions([".tmpl"])
        .helpers(HelperFunctions::new())
        .build()
        .unwrap();
    assert_eq!(set.render(&json!({})).unwrap(), expected);
}

#[test]
fn test_round_trip_rendering() {
    let tmp_dir = tempfile::tempdir().unwrap();
    write_tree(tmp_dir.path(), &[("greet.tmpl", "Hello, {{ Name }}")]);

    let set = parse_recursive(tmp_dir.path(), TemplateMode::Text, &[".tmpl"]).unwrap();
    let mut sink = Vec::new();
    set.execute(&mut sink, &json!({ "Name": "Ada" })).unwrap();
    assert_eq!(String::from_utf8(sink).unwrap(), "Hello, Ada");
}

#[test]
fn test_nested_site_in_html_mode() {
    let set =
        parse_recursive("tests/templates/site", TemplateMode::Html, &[".html", ".tmpl"]).unwrap();

    assert_eq!(set.template_names(), ["index.html", "nested.tmpl", "footer.tmpl"]);
    assert!(set.as_html().is_some());

    let ctx = json!({ "title": "Tom & Jerry", "year": 1940 });
    assert_eq!(
        set.render(&ctx).unwrap(),
        "<h1>Tom &amp; Jerry</h1>\n<footer>1940</footer>"
    );
    assert_eq!(set.render_template("nested.tmpl", &ctx).unwrap(), "nested: Tom &amp; Jerry");
}

#[test]
fn test_text_mode_does_not_escape() {
    let set = parse_recursive("tests/templates/site", TemplateMode::Text, &[".tmpl"]).unwrap();
    assert!(set.as_text().is_some());
    assert!(set.as_html().is_none());

    let mut sink = Vec::new();
    set.execute_template(&mut sink, "nested.tmpl", &json!({ "title": "<b>" })).unwrap();
    assert_eq!(String::from_utf8(sink).unwrap(), "nested: <b>");
}

#[test]
fn test_unknown_named_template() {
    let set = parse_recursive("tests/templates/site", TemplateMode::Text, &[".tmpl"]).unwrap();
    let err = set.render_template("index.html", &json!({})).unwrap_err();
    assert!(matches!(err, Error::TemplateNotFound { ref name } if name == "index.html"));
    assert!(err.is_render_failure());
}

#[test]
fn test_missing_field_is_render_failure() {
    let set = parse_recursive("tests/templates/site", TemplateMode::Html, &[".html", ".tmpl"]).unwrap();
    let err = set.render(&json!({ "year": 2024 })).unwrap_err();
    assert!(matches!(err, Error::Render { .. }));
}

#[test]
fn test_unsupported_mode_touches_no_files() {
    let missing = PathBuf::from("tests/templates/does-not-exist");
    let err = parse_recursive_with_mode_name(&missing, "rtf", &[".html"]).err().unwrap();
    assert!(matches!(err, Error::UnsupportedMode { .. }));

    let err = TemplateMode::try_from(7_i64).unwrap_err();
    assert!(matches!(err, Error::UnsupportedMode { ref mode } if mode == "7"));

    // with a valid mode the same root fails for lack of files instead
    let err = parse_recursive_with_mode_name(&missing, "html", &[".html"]).err().unwrap();
    assert!(matches!(err, Error::NoTemplateFiles { .. }));
}

#[test]
fn test_duplicate_file_names_fail() {
    let tmp_dir = tempfile::tempdir().unwrap();
    write_tree(tmp_dir.path(), &[("a/page.html", "a"), ("b/page.html", "b")]);
    let err = parse_recursive(tmp_dir.path(), TemplateMode::Html, &[".html"]).err().unwrap();
    assert!(matches!(err, Error::DuplicateTemplate { ref name, .. } if name == "page.html"));
    assert!(err.is_parse_failure());
}

#[test]
fn test_helpers_are_not_installed_by_default() {
    let tmp_dir = tempfile::tempdir().unwrap();
    write_tree(tmp_dir.path(), &[("p.tmpl", r#"{{ pluralize("cat") }}"#)]);
    let set = parse_recursive(tmp_dir.path(), TemplateMode::Text, &[".tmpl"]).unwrap();
    assert!(set.render(&json!({})).is_err());
}

#[test]
fn test_helper_file_renders() {
    let set = TemplateSetBuilder::new("tests/templates/helpers")
        .mode(TemplateMode::Text)
        .extensions([".func"])
        .helpers(HelperFunctions::new())
        .build()
        .unwrap();
    assert_eq!(set.render(&json!(null)).unwrap(), "boxes cat GO 42 v-2");
}

#[test]
fn test_pluralize_helper() {
    test_template(r#"{{ pluralize("cat") }}"#, "cats");
}

#[test]
fn test_incr_helper() {
    test_template("{{ incr(5) }}", "6");
}

#[test]
fn test_decr_helper() {
    test_template("{{ decr(5) }}", "4");
}

#[test]
fn test_camelize_helpers() {
    test_template(r#"{{ camelize("hello world") }}"#, "HelloWorld");
    test_template(r#"{{ camelize_down_first("hello world") }}"#, "helloWorld");
}

#[test]
fn test_foreign_key_helper() {
    test_template(r#"{{ foreign_key("User") }}"#, "user_id");
    test_template(r#"{{ foreign_key("Order Item") }}"#, "order_item_id");
}

#[test]
fn test_string_helpers_in_templates() {
    test_template(r#"{% if has_prefix("template", "temp") %}yes{% endif %}"#, "yes");
    test_template(r#"{{ join(fields(" a  b c "), ",") }}"#, "a,b,c");
    test_template(r#"{{ trim_suffix("index.html", ".html") }}"#, "index");
    test_template(r#"{{ repeat("ab", 3) }}"#, "ababab");
    test_template(r#"{% if not regex("hello world", "^world") %}no{% endif %}"#, "no");
    test_template(r#"{{ sprintf("%t", regex("hello world", "^hello")) }}"#, "true");
}

#[test]
fn test_helper_argument_errors_surface_at_render() {
    let tmp_dir = tempfile::tempdir().unwrap();
    write_tree(tmp_dir.path(), &[("bad.tmpl", r#"{{ incr("five") }}"#)]);
    let set = TemplateSetBuilder::new(tmp_dir.path())
        .mode(TemplateMode::Text)
        .extensions([".tmpl"])
        .helpers(HelperFunctions::new())
        .build()
        .unwrap();
    let err = set.render(&json!({})).unwrap_err();
    assert!(err.is_render_failure());
}

#[test]
fn test_handle_is_shareable_across_threads() {
    let set: std::sync::Arc<dyn Templater> = std::sync::Arc::from(
        parse_recursive("tests/templates/site", TemplateMode::Text, &[".tmpl"]).unwrap(),
    );
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let set = set.clone();
            std::thread::spawn(move || {
                set.render_template("nested.tmpl", &json!({ "title": i })).unwrap()
            })
        })
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), format!("nested: {i}"));
    }
}
