//! End-to-end validation of raw configuration values against the built-in
//! catalogue.

use fmtrc_config::{ConfigValidator, ValidatedConfig};
use fmtrc_core::ErrorKind;
use serde_json::{json, Value};

fn validator() -> ConfigValidator {
    ConfigValidator::builtin().unwrap()
}

#[test]
fn inline_options_accepted_with_defaults() {
    let config = validator()
        .validate(&json!({"printWidth": 100, "singleQuote": true}))
        .unwrap();
    assert_eq!(config.get("printWidth"), Some(&json!(100)));
    assert_eq!(config.get("singleQuote"), Some(&json!(true)));
    assert_eq!(config.get("tabWidth"), Some(&json!(2)));
    assert_eq!(config.get("semi"), Some(&json!(true)));
    assert_eq!(config.get("trailingComma"), Some(&json!("es5")));
    assert_eq!(config.get("rangeEnd"), Some(&Value::Null));
    assert!(config.get("parser").is_none());
}

#[test]
fn misspelled_option_reported_as_unknown_key() {
    let errors = validator().validate(&json!({"printWidht": 100})).unwrap_err();
    let unknown = errors
        .leaves()
        .find(|e| e.kind == ErrorKind::UnknownKey)
        .unwrap();
    assert_eq!(unknown.path.to_string(), "printWidht");
    assert!(unknown.message.contains("printWidht"));
}

#[test]
fn override_with_single_glob_accepted() {
    let config = validator()
        .validate(&json!({"overrides": [{"files": "*.css"}]}))
        .unwrap();
    let entries: Vec<_> = config.overrides().collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["files"], json!("*.css"));
    assert!(entries[0].get("options").is_none());
    assert_eq!(config.get("printWidth"), Some(&json!(80)));
}

#[test]
fn bare_string_accepted_as_reference() {
    let config = validator().validate(&json!("@acme/prettier-config")).unwrap();
    assert_eq!(
        config,
        ValidatedConfig::Reference("@acme/prettier-config".to_string())
    );
}

#[test]
fn invalid_choice_reported_as_literal_mismatch() {
    let errors = validator()
        .validate(&json!({"trailingComma": "always"}))
        .unwrap_err();
    assert!(errors
        .leaves()
        .any(|e| e.kind == ErrorKind::LiteralMismatch && e.path.to_string() == "trailingComma"));

    let rendered = errors.tree().to_string();
    assert!(rendered.contains(r#"expected one of "es5", "none", "all"; got "always""#));
}

#[test]
fn every_error_collected_in_one_pass() {
    let errors = validator()
        .validate(&json!({
            "tabWidth": "4",
            "endOfLine": "unix",
            "semicolons": false,
            "overrides": [{"files": 7}]
        }))
        .unwrap_err();
    let rendered = errors.tree().to_string();
    for path in ["tabWidth", "endOfLine", "semicolons", "overrides[0].files"] {
        assert!(rendered.contains(path), "missing {path} in:\n{rendered}");
    }
}

#[test]
fn accepted_output_is_a_fixed_point() {
    let raw = json!({
        "useTabs": true,
        "proseWrap": "always",
        "pluginSearchDirs": false,
        "parser": "./custom-parser.js",
        "overrides": [
            {"files": ["*.md"], "excludeFiles": "CHANGELOG.md", "options": {"proseWrap": "never"}}
        ]
    });
    let once = validator().validate(&raw).unwrap().into_value();
    let twice = validator().validate(&once).unwrap().into_value();
    assert_eq!(once, twice);
    assert_eq!(once["overrides"][0]["options"]["tabWidth"], json!(2));
    assert_eq!(once["parser"], json!("./custom-parser.js"));
}

#[test]
fn validator_shared_across_threads() {
    let validator = std::sync::Arc::new(validator());
    let handles: Vec<_> = (0..4)
        .map(|width| {
            let validator = validator.clone();
            std::thread::spawn(move || {
                validator
                    .validate(&json!({"tabWidth": width}))
                    .unwrap()
                    .get("tabWidth")
                    .cloned()
            })
        })
        .collect();
    for (width, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), Some(json!(width)));
    }
}
