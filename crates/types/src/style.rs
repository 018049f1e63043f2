use crate::model::DesignConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Flattened design tokens, keyed by CSS custom-property name
/// (`--color-primary`, `--font-heading`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleTable(BTreeMap<String, String>);

impl StyleTable {
    /// Flattens colors under `--color-*` and typography under `--font-*`.
    pub fn from_design(design: &DesignConfig) -> Self {
        let colors = design
            .colors
            .iter()
            .map(|(k, v)| (format!("--color-{}", kebab_case(k)), v.clone()));
        let fonts = design
            .typography
            .iter()
            .map(|(k, v)| (format!("--font-{}", kebab_case(k)), v.clone()));
        StyleTable(colors.chain(fonts).collect())
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.0.get(property).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Renders the table as a `:root { ... }` rule.
    pub fn to_css(&self) -> String {
        let mut css = String::from(":root {\n");
        for (k, v) in self.iter() {
            css.push_str(&format!("  {k}: {v};\n"));
        }
        css.push('}');
        css.push('\n');
        css
    }
}

impl FromIterator<(String, String)> for StyleTable {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        StyleTable(iter.into_iter().collect())
    }
}

/// Normalizes a token name to kebab-case: `primary_dark`, `primaryDark`
/// and `Primary Dark` all become `primary-dark`.
pub fn kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for c in name.trim().chars() {
        if c == '_' || c == '-' || c.is_whitespace() {
            if !out.ends_with('-') && !out.is_empty() {
                out.push('-');
            }
            prev_lower = false;
        } else if c.is_ascii_uppercase() {
            if prev_lower && !out.ends_with('-') {
                out.push('-');
            }
            out.push(c.to_ascii_lowercase());
            prev_lower = false;
        } else {
            out.push(c);
            prev_lower = c.is_ascii_lowercase() || c.is_ascii_digit();
        }
    }
    out.trim_end_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kebab_case() {
        assert_eq!(kebab_case("primary"), "primary");
        assert_eq!(kebab_case("primary_dark"), "primary-dark");
        assert_eq!(kebab_case("primaryDark"), "primary-dark");
        assert_eq!(kebab_case("Heading Font"), "heading-font");
        assert_eq!(kebab_case("accent-2"), "accent-2");
    }

    #[test]
    fn test_from_design() {
        let mut design = DesignConfig::default();
        design
            .colors
            .insert("primary_dark".to_string(), "#1a3a5c".to_string());
        design
            .typography
            .insert("headingFont".to_string(), "Montserrat".to_string());

        let table = StyleTable::from_design(&design);
        assert_eq!(table.get("--color-primary-dark"), Some("#1a3a5c"));
        assert_eq!(table.get("--font-heading-font"), Some("Montserrat"));
        assert_eq!(table.len(), 2);
        assert!(table.to_css().contains("  --color-primary-dark: #1a3a5c;\n"));
    }
}
