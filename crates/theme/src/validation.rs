use std::fmt;
use std::path::Path;

use serde_json::Value;

use crate::model::{OPTIONAL_SLOTS, REQUIRED_SLOTS};
use crate::ColorToken;

const REQUIRED_STRING_FIELDS: &[&str] = &["id", "name"];
const VALID_SCOPES: &[&str] = &["frontend", "backoffice", "both"];
const MODES: &[&str] = &["light", "dark"];

#[derive(Debug, Clone)]
pub enum ValidationError {
    InvalidJson {
        message: String,
        line: Option<usize>,
        col: Option<usize>,
    },
    MissingField {
        field: String,
    },
    InvalidField {
        field: String,
        message: String,
    },
    MissingScheme {
        mode: String,
    },
    MissingSlot {
        mode: String,
        slot: String,
    },
    InvalidColor {
        mode: String,
        slot: String,
        value: String,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidJson { message, line, col } => {
                if let (Some(l), Some(c)) = (line, col) {
                    write!(f, "Invalid JSON at line {}, col {}: {}", l, c, message)
                } else {
                    write!(f, "Invalid JSON: {}", message)
                }
            }
            Self::MissingField { field } => write!(f, "Missing required '{}' field", field),
            Self::InvalidField { field, message } => write!(f, "Invalid '{}': {}", field, message),
            Self::MissingScheme { mode } => write!(f, "Missing colors.{} scheme", mode),
            Self::MissingSlot { mode, slot } => {
                write!(f, "[{}] Missing required slot: {}", mode, slot)
            }
            Self::InvalidColor { mode, slot, value } => {
                write!(
                    f,
                    "[{}] Invalid color for '{}': \"{}\" (expected #RRGGBB, \"<h> <s>% <l>%\" or oklch(L C H))",
                    mode, slot, value
                )
            }
        }
    }
}

#[derive(Debug, Clone)]
pub enum ValidationWarning {
    MissingVersion,
    MissingSurfaceSlots { mode: String },
    UnknownSlot { mode: String, slot: String },
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingVersion => write!(f, "Missing 'version' (defaults to 1.0.0)"),
            Self::MissingSurfaceSlots { mode } => {
                write!(f, "[{}] No card/popover slots (components fall back to background)", mode)
            }
            Self::UnknownSlot { mode, slot } => {
                write!(f, "[{}] Unknown slot '{}' will be ignored", mode, slot)
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub path: String,
    pub theme_id: Option<String>,
    pub theme_name: Option<String>,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn display_name(&self) -> &str {
        self.theme_name
            .as_deref()
            .or(self.theme_id.as_deref())
            .unwrap_or(&self.path)
    }
}

fn check_token(mode: &str, slot: &str, value: &Value) -> Option<ValidationError> {
    match value.as_str() {
        Some(raw) if !ColorToken::parse(raw).is_raw() => None,
        _ => Some(ValidationError::InvalidColor {
            mode: mode.to_string(),
            slot: slot.to_string(),
            value: value
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| value.to_string()),
        }),
    }
}

fn validate_scheme(
    colors: &Value,
    mode: &str,
    errors: &mut Vec<ValidationError>,
    warnings: &mut Vec<ValidationWarning>,
) {
    let Some(scheme) = colors.get(mode) else {
        errors.push(ValidationError::MissingScheme {
            mode: mode.to_string(),
        });
        return;
    };

    let Some(table) = scheme.as_object() else {
        errors.push(ValidationError::InvalidField {
            field: format!("colors.{}", mode),
            message: "must be an object".to_string(),
        });
        return;
    };

    for &slot in REQUIRED_SLOTS {
        match table.get(slot) {
            Some(value) => errors.extend(check_token(mode, slot, value)),
            None => errors.push(ValidationError::MissingSlot {
                mode: mode.to_string(),
                slot: slot.to_string(),
            }),
        }
    }

    for &slot in OPTIONAL_SLOTS {
        if let Some(value) = table.get(slot) {
            errors.extend(check_token(mode, slot, value));
        }
    }

    for key in table.keys() {
        if !REQUIRED_SLOTS.contains(&key.as_str()) && !OPTIONAL_SLOTS.contains(&key.as_str()) {
            warnings.push(ValidationWarning::UnknownSlot {
                mode: mode.to_string(),
                slot: key.clone(),
            });
        }
    }

    if !table.contains_key("card") || !table.contains_key("popover") {
        warnings.push(ValidationWarning::MissingSurfaceSlots {
            mode: mode.to_string(),
        });
    }
}

pub fn validate_theme_content(content: &str, path: &str) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let value: Value = match serde_json::from_str(content) {
        Ok(v) => v,
        Err(e) => {
            return ValidationResult {
                path: path.to_string(),
                theme_id: None,
                theme_name: None,
                errors: vec![ValidationError::InvalidJson {
                    message: e.to_string(),
                    line: (e.line() > 0).then_some(e.line()),
                    col: (e.column() > 0).then_some(e.column()),
                }],
                warnings: vec![],
            };
        }
    };

    let string_field = |field: &str| value.get(field).and_then(Value::as_str).map(str::to_string);
    let theme_id = string_field("id").filter(|id| !id.trim().is_empty());
    let theme_name = string_field("name");

    for &field in REQUIRED_STRING_FIELDS {
        match value.get(field) {
            None => errors.push(ValidationError::MissingField {
                field: field.to_string(),
            }),
            Some(v) if !v.as_str().is_some_and(|s| !s.trim().is_empty()) => {
                errors.push(ValidationError::InvalidField {
                    field: field.to_string(),
                    message: "must be a non-empty string".to_string(),
                })
            }
            Some(_) => {}
        }
    }

    match value.get("version") {
        None => warnings.push(ValidationWarning::MissingVersion),
        Some(v) if !v.is_string() => errors.push(ValidationError::InvalidField {
            field: "version".to_string(),
            message: "must be a string".to_string(),
        }),
        Some(_) => {}
    }

    if let Some(scope) = value.get("scope") {
        let known = scope.as_str().is_some_and(|s| VALID_SCOPES.contains(&s));
        if !known {
            errors.push(ValidationError::InvalidField {
                field: "scope".to_string(),
                message: format!("expected one of {}", VALID_SCOPES.join(", ")),
            });
        }
    }

    match value.get("colors") {
        None => errors.push(ValidationError::MissingField {
            field: "colors".to_string(),
        }),
        Some(colors) => {
            for &mode in MODES {
                validate_scheme(colors, mode, &mut errors, &mut warnings);
            }
        }
    }

    ValidationResult {
        path: path.to_string(),
        theme_id,
        theme_name,
        errors,
        warnings,
    }
}

pub fn validate_theme_files(dir: &Path) -> Vec<ValidationResult> {
    let mut results = Vec::new();

    if !dir.exists() {
        return results;
    }

    let Ok(entries) = std::fs::read_dir(dir) else {
        return results;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().map(|e| e == "json").unwrap_or(false) {
            results.push(validate_theme_file(&path));
        }
    }

    results.sort_by(|a, b| a.path.cmp(&b.path));
    results
}

pub fn validate_theme_file(path: &Path) -> ValidationResult {
    let path_str = path.display().to_string();
    match std::fs::read_to_string(path) {
        Ok(content) => validate_theme_content(&content, &path_str),
        Err(e) => ValidationResult {
            path: path_str,
            theme_id: None,
            theme_name: None,
            errors: vec![ValidationError::InvalidJson {
                message: format!("Could not read file: {}", e),
                line: None,
                col: None,
            }],
            warnings: vec![],
        },
    }
}

pub fn print_validation_results(results: &[ValidationResult], verbose: bool) {
    let errors: Vec<_> = results.iter().filter(|r| !r.is_valid()).collect();
    let warnings: Vec<_> = results
        .iter()
        .filter(|r| r.is_valid() && r.has_warnings())
        .collect();
    let valid: Vec<_> = results
        .iter()
        .filter(|r| r.is_valid() && !r.has_warnings())
        .collect();

    println!("{}", "=".repeat(80));
    println!("THEME VALIDATION");
    println!("{}", "=".repeat(80));

    if !errors.is_empty() {
        println!("\nX ERRORS ({} theme(s) with issues)\n", errors.len());

        for result in &errors {
            println!("{}:", result.display_name());
            if result.display_name() != result.path {
                println!("  File: {}", result.path);
            }
            for error in &result.errors {
                println!("  * {}", error);
            }
            println!();
        }
    }

    if !warnings.is_empty() {
        println!("\n! WARNINGS ({} theme(s))\n", warnings.len());

        for result in &warnings {
            println!("{}:", result.display_name());
            for warning in &result.warnings {
                println!("  * {}", warning);
            }
            println!();
        }
    }

    if verbose && !valid.is_empty() {
        println!("\n+ VALID ({} theme(s))\n", valid.len());
        for result in &valid {
            println!("  {}", result.display_name());
        }
        println!();
    }

    println!("{}", "=".repeat(80));
    println!("VALIDATION SUMMARY");
    println!("{}", "=".repeat(80));
    println!(
        "\nThemes checked: {} | Valid: {} | Errors: {} | Warnings: {}",
        results.len(),
        valid.len() + warnings.len(),
        errors.len(),
        warnings.len()
    );

    if errors.is_empty() && warnings.is_empty() {
        println!("\n+ All themes passed validation!");
    } else if errors.is_empty() {
        println!("\n+ All themes are valid (with some warnings)");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::builtin_theme;

    fn theme_value(id: &str) -> Value {
        serde_json::to_value(builtin_theme(id).unwrap()).unwrap()
    }

    fn validate(value: &Value) -> ValidationResult {
        validate_theme_content(&value.to_string(), "theme.json")
    }

    #[test]
    fn test_validate_valid_theme() {
        let result = validate(&theme_value("default"));
        assert!(
            result.is_valid(),
            "Expected valid, got errors: {:?}",
            result.errors
        );
        assert!(!result.has_warnings());
        assert_eq!(result.theme_id.as_deref(), Some("default"));
    }

    #[test]
    fn test_validate_invalid_json() {
        let result = validate_theme_content("{\n  \"id\": \"x\",\n  broken\n}", "theme.json");
        assert!(!result.is_valid());
        assert!(result
            .errors
            .iter()
            .any(|e| matches!(e, ValidationError::InvalidJson { line: Some(3), .. })));
    }

    #[test]
    fn test_validate_missing_id_and_name() {
        let mut value = theme_value("default");
        value.as_object_mut().unwrap().remove("id");
        value["name"] = Value::String(String::new());

        let result = validate(&value);
        assert!(result
            .errors
            .iter()
            .any(|e| matches!(e, ValidationError::MissingField { field } if field == "id")));
        assert!(result
            .errors
            .iter()
            .any(|e| matches!(e, ValidationError::InvalidField { field, .. } if field == "name")));
        assert_eq!(result.display_name(), "");
    }

    #[test]
    fn test_validate_missing_slot_and_scheme() {
        let mut value = theme_value("default");
        value["colors"]["light"].as_object_mut().unwrap().remove("ring");
        value["colors"].as_object_mut().unwrap().remove("dark");

        let result = validate(&value);
        assert!(result.errors.iter().any(
            |e| matches!(e, ValidationError::MissingSlot { mode, slot } if mode == "light" && slot == "ring")
        ));
        assert!(result
            .errors
            .iter()
            .any(|e| matches!(e, ValidationError::MissingScheme { mode } if mode == "dark")));
    }

    #[test]
    fn test_validate_invalid_color() {
        let mut value = theme_value("harbor");
        value["colors"]["dark"]["primary"] = Value::String("hsl(222, 84%, 4.9%)".into());
        value["colors"]["dark"]["ring"] = Value::from(42);

        let result = validate(&value);
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(
            |e| matches!(e, ValidationError::InvalidColor { slot, .. } if slot == "primary")
        ));
        assert!(result.errors.iter().any(
            |e| matches!(e, ValidationError::InvalidColor { slot, value, .. } if slot == "ring" && value == "42")
        ));
    }

    #[test]
    fn test_validate_scope() {
        let mut value = theme_value("default");
        value["scope"] = Value::String("admin".into());
        let result = validate(&value);
        assert!(result
            .errors
            .iter()
            .any(|e| matches!(e, ValidationError::InvalidField { field, .. } if field == "scope")));
    }

    #[test]
    fn test_validate_warnings() {
        let mut value = theme_value("ledger");
        value.as_object_mut().unwrap().remove("version");
        value["colors"]["light"]["sidebar"] = Value::String("#ffffff".into());

        let result = validate(&value);
        assert!(result.is_valid(), "{:?}", result.errors);
        assert!(result
            .warnings
            .iter()
            .any(|w| matches!(w, ValidationWarning::MissingVersion)));
        assert!(result
            .warnings
            .iter()
            .any(|w| matches!(w, ValidationWarning::MissingSurfaceSlots { mode } if mode == "dark")));
        assert!(result
            .warnings
            .iter()
            .any(|w| matches!(w, ValidationWarning::UnknownSlot { slot, .. } if slot == "sidebar")));
    }

    #[test]
    fn test_validate_theme_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.json"), theme_value("default").to_string()).unwrap();
        std::fs::write(dir.path().join("b.json"), "[]").unwrap();
        std::fs::write(dir.path().join("c.toml"), "").unwrap();

        let results = validate_theme_files(dir.path());
        assert_eq!(results.len(), 2);
        assert!(results[0].is_valid());
        assert!(!results[1].is_valid());
    }
}
