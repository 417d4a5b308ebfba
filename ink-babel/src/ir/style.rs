//! Inline CSS `style` attribute parsing.
//!
//! Only declarations are handled (`property: value` pairs separated by `;`).
//! Property names are lowercased, values are trimmed and kept verbatim.

use std::collections::BTreeMap;

/// Parsed inline style declarations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InlineStyle {
    declarations: BTreeMap<String, String>,
}

impl InlineStyle {
    pub fn parse(source: &str) -> Self {
        let mut declarations = BTreeMap::new();
        for declaration in source.split(';') {
            let Some((property, value)) = declaration.split_once(':') else {
                continue;
            };
            let property = property.trim().to_ascii_lowercase();
            let value = value.trim();
            if property.is_empty() || value.is_empty() {
                continue;
            }
            declarations.insert(property, value.to_string());
        }
        let mut style = Self { declarations };
        style.expand_margin_shorthand();
        style
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations.get(property).map(String::as_str)
    }

    pub fn get_owned(&self, property: &str) -> Option<String> {
        self.get(property).map(str::to_string)
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// `margin` shorthand fills in `margin-left`/`margin-right` unless the
    /// longhand properties are present.
    fn expand_margin_shorthand(&mut self) {
        let Some(margin) = self.declarations.get("margin") else {
            return;
        };
        let values: Vec<&str> = margin.split_whitespace().collect();
        let (right, left) = match values.as_slice() {
            [all] => (*all, *all),
            [_, horizontal] | [_, horizontal, _] => (*horizontal, *horizontal),
            [_, right, _, left] => (*right, *left),
            _ => return,
        };
        let (right, left) = (right.to_string(), left.to_string());
        self.declarations
            .entry("margin-right".to_string())
            .or_insert(right);
        self.declarations
            .entry("margin-left".to_string())
            .or_insert(left);
    }
}
