//! Preview style catalog and CSS handling
//!
//! Styles are plain CSS text. The built-in catalog ships four templates; users
//! add their own through the style editor, which works on a parsed
//! [`StyleSheet`] and serialises it back to CSS.

use std::collections::{BTreeMap, HashMap};

/// Key of the style used when nothing else is selected or a key is unknown
pub const DEFAULT_STYLE: &str = "gitlab";

/// A built-in style template
#[derive(Debug, Clone, Copy)]
pub struct BuiltinStyle {
    pub key: &'static str,
    pub name: &'static str,
    pub css: &'static str,
}

pub static BUILTIN_STYLES: &[BuiltinStyle] = &[
    BuiltinStyle {
        key: "gitlab",
        name: "GitLab",
        css: GITLAB_CSS,
    },
    BuiltinStyle {
        key: "default",
        name: "Default",
        css: DEFAULT_CSS,
    },
    BuiltinStyle {
        key: "outlook",
        name: "Outlook Email",
        css: OUTLOOK_CSS,
    },
    BuiltinStyle {
        key: "pdf_formal",
        name: "PDF Formal",
        css: PDF_FORMAL_CSS,
    },
];

/// Entry shown in the style selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleEntry {
    pub key: String,
    pub name: String,
    pub custom: bool,
}

/// Built-in styles plus user-defined ones
#[derive(Debug, Clone, Default)]
pub struct StyleCatalog {
    custom: BTreeMap<String, String>,
    /// Session-only replacements for built-in styles
    overrides: HashMap<String, String>,
}

impl StyleCatalog {
    pub fn new(custom: BTreeMap<String, String>) -> Self {
        Self {
            custom,
            overrides: HashMap::new(),
        }
    }

    /// All selectable styles: built-ins first, then custom styles by name
    pub fn entries(&self) -> Vec<StyleEntry> {
        let builtins = BUILTIN_STYLES
            .iter()
            .filter(|style| !self.custom.contains_key(style.key))
            .map(|style| StyleEntry {
                key: style.key.to_string(),
                name: style.name.to_string(),
                custom: false,
            });
        let custom = self.custom.keys().map(|name| StyleEntry {
            key: name.clone(),
            name: name.clone(),
            custom: true,
        });
        builtins.chain(custom).collect()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.custom.contains_key(key) || builtin(key).is_some()
    }

    pub fn is_custom(&self, key: &str) -> bool {
        self.custom.contains_key(key)
    }

    /// Display name of a style key
    pub fn name_for<'a>(&'a self, key: &'a str) -> &'a str {
        if self.custom.contains_key(key) {
            return key;
        }
        builtin(key).map(|style| style.name).unwrap_or(key)
    }

    /// CSS for a style key, falling back to the default style
    pub fn css_for(&self, key: &str) -> &str {
        if let Some(css) = self.overrides.get(key) {
            return css;
        }
        if let Some(css) = self.custom.get(key) {
            return css;
        }
        builtin(key)
            .or_else(|| builtin(DEFAULT_STYLE))
            .map(|style| style.css)
            .unwrap_or_default()
    }

    /// Key to actually use for a requested style
    pub fn resolve<'a>(&self, key: &'a str) -> &'a str {
        if self.contains(key) {
            key
        } else {
            DEFAULT_STYLE
        }
    }

    pub fn custom_styles(&self) -> &BTreeMap<String, String> {
        &self.custom
    }

    pub fn set_custom(&mut self, name: &str, css: String) {
        self.overrides.remove(name);
        self.custom.insert(name.to_string(), css);
    }

    pub fn remove_custom(&mut self, name: &str) -> bool {
        self.custom.remove(name).is_some()
    }

    /// Replace a built-in style for the rest of the session
    pub fn set_override(&mut self, key: &str, css: String) {
        self.overrides.insert(key.to_string(), css);
    }
}

fn builtin(key: &str) -> Option<&'static BuiltinStyle> {
    BUILTIN_STYLES.iter().find(|style| style.key == key)
}

/// One `selector { ... }` block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssRule {
    pub selector: String,
    pub declarations: Vec<(String, String)>,
}

impl CssRule {
    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(name, _)| name == property)
            .map(|(_, value)| value.as_str())
    }
}

/// Ordered set of CSS rules
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleSheet {
    pub rules: Vec<CssRule>,
}

impl StyleSheet {
    /// Parse flat CSS (no at-rules, no nesting)
    pub fn parse(css: &str) -> Self {
        let mut sheet = StyleSheet::default();
        let mut rest = css;

        while let Some(open) = rest.find('{') {
            let Some(close) = rest[open..].find('}').map(|offset| open + offset) else {
                break;
            };
            let selector = rest[..open].trim();
            let body = &rest[open + 1..close];
            rest = &rest[close + 1..];

            if selector.is_empty() || body.trim().is_empty() {
                continue;
            }

            let declarations = body
                .split(';')
                .filter_map(|decl| {
                    let (name, value) = decl.split_once(':')?;
                    let (name, value) = (name.trim(), value.trim());
                    if name.is_empty() || value.is_empty() {
                        None
                    } else {
                        Some((name.to_string(), value.to_string()))
                    }
                })
                .collect();

            // A repeated selector replaces the earlier block in place
            match sheet.rules.iter_mut().find(|rule| rule.selector == selector) {
                Some(rule) => rule.declarations = declarations,
                None => sheet.rules.push(CssRule {
                    selector: selector.to_string(),
                    declarations,
                }),
            }
        }

        sheet
    }

    pub fn to_css(&self) -> String {
        let mut css = String::new();
        for rule in &self.rules {
            css.push_str(&rule.selector);
            css.push_str(" { ");
            for (name, value) in &rule.declarations {
                css.push_str(name);
                css.push_str(": ");
                css.push_str(value);
                css.push_str("; ");
            }
            css.push_str("} ");
        }
        css
    }

    pub fn rule(&self, selector: &str) -> Option<&CssRule> {
        self.rules.iter().find(|rule| rule.selector == selector)
    }

    pub fn get(&self, selector: &str, property: &str) -> Option<&str> {
        self.rule(selector).and_then(|rule| rule.get(property))
    }

    /// Set a property; an empty value removes it
    pub fn set(&mut self, selector: &str, property: &str, value: &str) {
        let value = value.trim();
        let index = match self.rules.iter().position(|rule| rule.selector == selector) {
            Some(index) => index,
            None => {
                if value.is_empty() {
                    return;
                }
                self.rules.push(CssRule {
                    selector: selector.to_string(),
                    declarations: Vec::new(),
                });
                self.rules.len() - 1
            }
        };

        let rule = &mut self.rules[index];
        let existing = rule.declarations.iter().position(|(name, _)| name == property);
        match (existing, value.is_empty()) {
            (Some(i), true) => {
                rule.declarations.remove(i);
            }
            (Some(i), false) => rule.declarations[i].1 = value.to_string(),
            (None, false) => rule
                .declarations
                .push((property.to_string(), value.to_string())),
            (None, true) => {}
        }
    }
}

/// CSS prepended to the style so the preview honours the preview zoom
pub fn zoom_css(font_size_px: u32) -> String {
    format!(
        "html {{ font-size: {}px !important; }}\n\
         body {{ font-size: inherit !important; }}\n\
         h1 {{ font-size: 2em !important; }}\n\
         h2 {{ font-size: 1.5em !important; }}\n\
         h3 {{ font-size: 1.25em !important; }}\n\
         pre, code {{ font-size: 0.9em !important; }}\n",
        font_size_px
    )
}

/// Parse a CSS colour (`#rgb`, `#rrggbb` or a few names) into RGB
pub fn parse_color(value: &str) -> Option<[u8; 3]> {
    let value = value.trim().to_ascii_lowercase();
    if let Some(hex) = value.strip_prefix('#') {
        let digits: Vec<u8> = hex
            .chars()
            .map(|c| c.to_digit(16).map(|d| d as u8))
            .collect::<Option<_>>()?;
        return match digits.as_slice() {
            [r, g, b] => Some([r * 17, g * 17, b * 17]),
            [r1, r2, g1, g2, b1, b2] => Some([r1 * 16 + r2, g1 * 16 + g2, b1 * 16 + b2]),
            _ => None,
        };
    }
    match value.as_str() {
        "white" => Some([255, 255, 255]),
        "black" => Some([0, 0, 0]),
        "red" => Some([255, 0, 0]),
        "gray" | "grey" => Some([128, 128, 128]),
        "navy" => Some([0, 0, 128]),
        "blue" => Some([0, 0, 255]),
        _ => None,
    }
}

/// First colour token in a shorthand value such as `1px solid #e5e5e5`
pub fn find_color(value: &str) -> Option<[u8; 3]> {
    value.split_whitespace().find_map(parse_color)
}

/// Parse a CSS length into pixels (`px`, `pt`, `em`/`rem` relative to `base_px`)
pub fn parse_length_px(value: &str, base_px: f32) -> Option<f32> {
    let value = value.trim().trim_end_matches("!important").trim();
    let parse = |n: &str| n.trim().parse::<f32>().ok();
    if let Some(n) = value.strip_suffix("px") {
        parse(n)
    } else if let Some(n) = value.strip_suffix("pt") {
        parse(n).map(|n| n * 4.0 / 3.0)
    } else if let Some(n) = value.strip_suffix("rem") {
        parse(n).map(|n| n * base_px)
    } else if let Some(n) = value.strip_suffix("em") {
        parse(n).map(|n| n * base_px)
    } else {
        None
    }
}

/// How a property is edited in the style editor
#[derive(Debug, Clone, Copy)]
pub enum PropertyKind {
    Choice(&'static [&'static str]),
    Text { placeholder: &'static str },
    Color,
}

/// A property exposed by the style editor
#[derive(Debug, Clone, Copy)]
pub struct StyleProperty {
    pub name: &'static str,
    pub label_key: &'static str,
    pub kind: PropertyKind,
}

/// Elements that can be styled: (selector, label)
pub static STYLE_ELEMENTS: &[(&str, &str)] = &[
    ("body", "Body"),
    ("h1", "H1"),
    ("h2", "H2"),
    ("h3", "H3"),
    ("p", "Paragraph"),
    ("a", "Link"),
    ("code", "Code"),
    ("pre", "Pre"),
    ("blockquote", "Blockquote"),
    ("ul, ol", "Lists"),
    ("li", "List Item"),
    ("table", "Table"),
    ("th", "Table Header"),
    ("td", "Table Cell"),
    ("hr", "Separator"),
];

pub static BASIC_PROPERTIES: &[StyleProperty] = &[
    StyleProperty {
        name: "font-family",
        label_key: "style.font",
        kind: PropertyKind::Choice(&[
            "Segoe UI, Arial, sans-serif",
            "Calibri, Arial, sans-serif",
            "Georgia, Times New Roman, serif",
            "Consolas, Monaco, monospace",
            "-apple-system, BlinkMacSystemFont, sans-serif",
        ]),
    },
    StyleProperty {
        name: "font-size",
        label_key: "style.size",
        kind: PropertyKind::Text { placeholder: "14px" },
    },
    StyleProperty {
        name: "color",
        label_key: "style.color",
        kind: PropertyKind::Color,
    },
    StyleProperty {
        name: "background-color",
        label_key: "style.bgcolor",
        kind: PropertyKind::Color,
    },
];

pub static ADVANCED_PROPERTIES: &[StyleProperty] = &[
    StyleProperty {
        name: "font-weight",
        label_key: "style.weight",
        kind: PropertyKind::Choice(&["normal", "bold", "600", "700"]),
    },
    StyleProperty {
        name: "font-style",
        label_key: "style.fontstyle",
        kind: PropertyKind::Choice(&["normal", "italic"]),
    },
    StyleProperty {
        name: "line-height",
        label_key: "style.lineheight",
        kind: PropertyKind::Text { placeholder: "1.6" },
    },
    StyleProperty {
        name: "margin",
        label_key: "style.margin",
        kind: PropertyKind::Text { placeholder: "10px" },
    },
    StyleProperty {
        name: "padding",
        label_key: "style.padding",
        kind: PropertyKind::Text { placeholder: "10px" },
    },
    StyleProperty {
        name: "border",
        label_key: "style.border",
        kind: PropertyKind::Text {
            placeholder: "1px solid #ccc",
        },
    },
    StyleProperty {
        name: "border-left",
        label_key: "style.borderleft",
        kind: PropertyKind::Text {
            placeholder: "4px solid #007acc",
        },
    },
    StyleProperty {
        name: "border-bottom",
        label_key: "style.borderbottom",
        kind: PropertyKind::Text {
            placeholder: "1px solid #eee",
        },
    },
    StyleProperty {
        name: "border-radius",
        label_key: "style.radius",
        kind: PropertyKind::Text { placeholder: "4px" },
    },
    StyleProperty {
        name: "text-align",
        label_key: "style.align",
        kind: PropertyKind::Choice(&["left", "center", "right", "justify"]),
    },
    StyleProperty {
        name: "text-decoration",
        label_key: "style.decoration",
        kind: PropertyKind::Choice(&["none", "underline"]),
    },
];

const GITLAB_CSS: &str = r#"
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; font-size: 16px; line-height: 1.6; color: #303030; background: #fff; padding: 20px 40px; max-width: 900px; margin: 0 auto; }
h1 { font-size: 2em; font-weight: 600; border-bottom: 1px solid #e5e5e5; padding-bottom: 0.3em; margin: 1.5em 0 0.75em; color: #1f1f1f; }
h2 { font-size: 1.5em; font-weight: 600; border-bottom: 1px solid #e5e5e5; padding-bottom: 0.3em; margin: 1.5em 0 0.75em; color: #1f1f1f; }
h3 { font-size: 1.25em; font-weight: 600; margin: 1.5em 0 0.5em; color: #1f1f1f; }
p { margin: 0 0 1em; }
a { color: #1068bf; text-decoration: none; }
code { font-family: 'JetBrains Mono', Consolas, monospace; font-size: 0.9em; background: #f5f5f5; padding: 0.2em 0.4em; border-radius: 4px; color: #d14; }
pre { font-family: 'JetBrains Mono', Consolas, monospace; font-size: 0.9em; background: #f6f8fa; border: 1px solid #e5e5e5; border-radius: 6px; padding: 16px; overflow-x: auto; }
pre code { background: transparent; padding: 0; color: #303030; }
blockquote { margin: 1em 0; padding: 0.5em 1em; border-left: 4px solid #dbdbdb; background: #fafafa; color: #666; }
ul, ol { margin: 0 0 1em; padding-left: 2em; }
li { margin-bottom: 0.25em; }
table { border-collapse: collapse; width: 100%; margin: 1em 0; }
th { background: #f6f8fa; border: 1px solid #e5e5e5; padding: 10px 12px; text-align: left; font-weight: 600; }
td { border: 1px solid #e5e5e5; padding: 10px 12px; }
tr:nth-child(even) { background: #fafafa; }
hr { border: none; border-top: 1px solid #e5e5e5; margin: 2em 0; }
img { max-width: 100%; height: auto; }
.callout-note { background: #e7f3ff; border-left: 4px solid #0066cc; padding: 12px 16px; margin: 16px 0; border-radius: 0 6px 6px 0; }
.callout-warning { background: #fff8e6; border-left: 4px solid #f0ad4e; padding: 12px 16px; margin: 16px 0; border-radius: 0 6px 6px 0; }
.callout-important { background: #ffeaea; border-left: 4px solid #dc3545; padding: 12px 16px; margin: 16px 0; border-radius: 0 6px 6px 0; }
"#;

const DEFAULT_CSS: &str = r#"
body { font-family: 'Segoe UI', Arial, sans-serif; font-size: 14px; line-height: 1.6; color: #333; background: #fff; margin: 20px; }
h1 { font-size: 28px; font-weight: 600; color: #1a1a1a; margin: 24px 0 16px; border-bottom: 2px solid #e0e0e0; padding-bottom: 8px; }
h2 { font-size: 22px; font-weight: 600; color: #2a2a2a; margin: 20px 0 12px; border-bottom: 1px solid #e8e8e8; padding-bottom: 6px; }
h3 { font-size: 18px; font-weight: 600; color: #3a3a3a; margin: 16px 0 10px; }
p { margin: 0 0 12px; }
a { color: #0066cc; text-decoration: underline; }
code { font-family: Consolas, Monaco, monospace; font-size: 13px; color: #c7254e; background: #f9f2f4; padding: 2px 6px; border-radius: 3px; }
pre { font-family: Consolas, Monaco, monospace; font-size: 13px; color: #333; background: #f5f5f5; padding: 16px; border-radius: 6px; border: 1px solid #e0e0e0; overflow-x: auto; }
blockquote { font-style: italic; color: #555; background: #f8f9fa; border-left: 4px solid #6c757d; margin: 16px 0; padding: 12px 20px; }
ul, ol { margin: 8px 0 12px; padding-left: 24px; }
li { margin-bottom: 4px; }
table { border-collapse: collapse; width: 100%; margin: 12px 0 16px; }
th { font-weight: 600; color: #fff; background: #4a5568; border: 1px solid #cbd5e0; padding: 10px 12px; text-align: left; }
td { border: 1px solid #e2e8f0; padding: 8px 12px; }
hr { border: none; border-top: 1px solid #e0e0e0; margin: 24px 0; }
img { max-width: 100%; height: auto; }
.callout-note { background: #e7f3ff; border-left: 4px solid #0066cc; padding: 12px 16px; margin: 16px 0; border-radius: 0 6px 6px 0; }
.callout-warning { background: #fff8e6; border-left: 4px solid #f0ad4e; padding: 12px 16px; margin: 16px 0; border-radius: 0 6px 6px 0; }
.callout-important { background: #ffeaea; border-left: 4px solid #dc3545; padding: 12px 16px; margin: 16px 0; border-radius: 0 6px 6px 0; }
"#;

const OUTLOOK_CSS: &str = r#"
body { font-family: Calibri, Arial, sans-serif; font-size: 11pt; line-height: 1.5; color: #000; background: #fff; margin: 0; padding: 10px; }
h1 { font-family: Calibri, Arial, sans-serif; font-size: 18pt; font-weight: bold; color: #1f4e79; margin: 18px 0 12px; }
h2 { font-family: Calibri, Arial, sans-serif; font-size: 14pt; font-weight: bold; color: #2e75b6; margin: 14px 0 8px; }
h3 { font-family: Calibri, Arial, sans-serif; font-size: 12pt; font-weight: bold; color: #404040; margin: 12px 0 6px; }
p { font-family: Calibri, Arial, sans-serif; font-size: 11pt; color: #000; margin: 0 0 10px; }
a { color: #0563c1; text-decoration: underline; }
code { font-family: Consolas, 'Courier New', monospace; font-size: 10pt; color: #c7254e; background: #f5f5f5; padding: 1px 4px; }
pre { font-family: Consolas, 'Courier New', monospace; font-size: 10pt; color: #333; background: #f5f5f5; padding: 10px; border: 1px solid #ccc; overflow-x: auto; }
blockquote { font-family: Calibri, Arial, sans-serif; font-size: 11pt; font-style: italic; color: #666; background: #f9f9f9; border-left: 3px solid #5b9bd5; margin: 10px 0; padding: 8px 14px; }
ul, ol { margin: 6px 0 10px; padding-left: 20px; }
li { font-family: Calibri, Arial, sans-serif; font-size: 11pt; color: #000; margin-bottom: 3px; }
table { border-collapse: collapse; width: auto; margin: 10px 0 14px; }
th { font-family: Calibri, Arial, sans-serif; font-size: 11pt; font-weight: bold; color: #fff; background: #5b9bd5; border: 1px solid #9cc2e5; padding: 6px 10px; text-align: left; }
td { font-family: Calibri, Arial, sans-serif; font-size: 11pt; color: #000; border: 1px solid #bfbfbf; padding: 5px 10px; }
hr { border: none; border-top: 1px solid #ccc; margin: 16px 0; }
img { max-width: 100%; height: auto; }
.callout-note { background: #deeaf6; border-left: 3px solid #5b9bd5; padding: 8px 12px; margin: 10px 0; }
.callout-warning { background: #fff2cc; border-left: 3px solid #bf9000; padding: 8px 12px; margin: 10px 0; }
.callout-important { background: #fce4d6; border-left: 3px solid #c65911; padding: 8px 12px; margin: 10px 0; }
"#;

const PDF_FORMAL_CSS: &str = r#"
body { font-family: Georgia, 'Times New Roman', serif; font-size: 12pt; line-height: 1.7; color: #222; background: #fff; margin: 40px; padding: 0; }
h1 { font-family: Georgia, 'Times New Roman', serif; font-size: 26pt; font-weight: bold; color: #1a1a1a; margin: 32px 0 20px; border-bottom: 3px solid #2c3e50; padding-bottom: 12px; }
h2 { font-family: Georgia, 'Times New Roman', serif; font-size: 20pt; font-weight: bold; color: #2c3e50; margin: 28px 0 16px; border-bottom: 1px solid #bdc3c7; padding-bottom: 8px; }
h3 { font-family: Georgia, 'Times New Roman', serif; font-size: 16pt; font-weight: bold; color: #34495e; margin: 22px 0 12px; }
p { font-family: Georgia, 'Times New Roman', serif; font-size: 12pt; color: #222; margin: 0 0 14px; text-align: justify; }
a { color: #2980b9; text-decoration: underline; }
code { font-family: Consolas, Monaco, monospace; font-size: 10pt; color: #8e44ad; background: #f8f8f8; padding: 3px 8px; border-radius: 4px; }
pre { font-family: Consolas, Monaco, monospace; font-size: 10pt; color: #2c3e50; background: #f8f8f8; padding: 20px; border-radius: 8px; border: 1px solid #e0e0e0; overflow-x: auto; }
blockquote { font-family: Georgia, 'Times New Roman', serif; font-size: 12pt; font-style: italic; color: #555; background: #fafafa; border-left: 5px solid #2c3e50; margin: 20px 0; padding: 16px 24px; }
ul, ol { margin: 10px 0 14px; padding-left: 28px; }
li { font-family: Georgia, 'Times New Roman', serif; font-size: 12pt; color: #222; margin-bottom: 6px; }
table { border-collapse: collapse; width: 100%; margin: 16px 0 20px; }
th { font-family: Georgia, 'Times New Roman', serif; font-size: 11pt; font-weight: bold; color: #fff; background: #2c3e50; border: 1px solid #2c3e50; padding: 12px 14px; text-align: left; }
td { font-family: Georgia, 'Times New Roman', serif; font-size: 11pt; color: #222; border: 1px solid #bdc3c7; padding: 10px 14px; }
hr { border: none; border-top: 2px solid #bdc3c7; margin: 32px 0; }
img { max-width: 100%; height: auto; }
.callout-note { background: #ebf5fb; border-left: 5px solid #3498db; padding: 16px 20px; margin: 20px 0; border-radius: 0 8px 8px 0; }
.callout-warning { background: #fef9e7; border-left: 5px solid #f39c12; padding: 16px 20px; margin: 20px 0; border-radius: 0 8px 8px 0; }
.callout-important { background: #fdedec; border-left: 5px solid #e74c3c; padding: 16px 20px; margin: 20px 0; border-radius: 0 8px 8px 0; }
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_builtin() {
        let sheet = StyleSheet::parse(GITLAB_CSS);
        assert_eq!(sheet.rules[0].selector, "body");
        assert_eq!(sheet.get("body", "font-size"), Some("16px"));
        assert_eq!(sheet.get("ul, ol", "padding-left"), Some("2em"));
        assert_eq!(sheet.get("pre code", "background"), Some("transparent"));
        assert!(sheet.rule(".callout-important").is_some());
    }

    #[test]
    fn test_parse_keeps_colons_in_values() {
        let sheet = StyleSheet::parse("body { background: url(http://x/y.png); ; :bad; empty: ; }");
        assert_eq!(sheet.get("body", "background"), Some("url(http://x/y.png)"));
        assert_eq!(sheet.rules[0].declarations.len(), 1);
    }

    #[test]
    fn test_repeated_selector_replaces_in_place() {
        let sheet = StyleSheet::parse("h1 { color: red; } p { margin: 0; } h1 { color: blue; }");
        assert_eq!(sheet.rules.len(), 2);
        assert_eq!(sheet.rules[0].selector, "h1");
        assert_eq!(sheet.get("h1", "color"), Some("blue"));
    }

    #[test]
    fn test_to_css_format() {
        let sheet = StyleSheet::parse("body{color:#333;margin: 0}");
        assert_eq!(sheet.to_css(), "body { color: #333; margin: 0; } ");
        assert_eq!(StyleSheet::parse(&sheet.to_css()), sheet);
    }

    #[test]
    fn test_set_and_remove_property() {
        let mut sheet = StyleSheet::parse("body { color: #333; }");
        sheet.set("body", "color", "#000");
        sheet.set("h1", "font-size", "30px");
        sheet.set("h2", "color", "");
        assert_eq!(sheet.get("body", "color"), Some("#000"));
        assert_eq!(sheet.get("h1", "font-size"), Some("30px"));
        assert!(sheet.rule("h2").is_none());

        sheet.set("body", "color", "");
        assert_eq!(sheet.get("body", "color"), None);
    }

    #[test]
    fn test_catalog_fallback_and_order() {
        let mut custom = BTreeMap::new();
        custom.insert("Mine".to_string(), "body { color: red; } ".to_string());
        let catalog = StyleCatalog::new(custom);

        let keys: Vec<_> = catalog.entries().into_iter().map(|e| e.key).collect();
        assert_eq!(keys, vec!["gitlab", "default", "outlook", "pdf_formal", "Mine"]);
        assert_eq!(catalog.css_for("nope"), GITLAB_CSS);
        assert_eq!(catalog.css_for("Mine"), "body { color: red; } ");
        assert_eq!(catalog.resolve("nope"), DEFAULT_STYLE);
        assert_eq!(catalog.name_for("pdf_formal"), "PDF Formal");
    }

    #[test]
    fn test_custom_shadows_builtin() {
        let mut catalog = StyleCatalog::default();
        catalog.set_custom("outlook", "p { color: green; } ".to_string());
        assert_eq!(catalog.css_for("outlook"), "p { color: green; } ");
        assert_eq!(catalog.entries().iter().filter(|e| e.key == "outlook").count(), 1);
        assert!(catalog.remove_custom("outlook"));
        assert_eq!(catalog.css_for("outlook"), OUTLOOK_CSS);
    }

    #[test]
    fn test_session_override() {
        let mut catalog = StyleCatalog::default();
        catalog.set_override("default", "body { margin: 0; } ".to_string());
        assert_eq!(catalog.css_for("default"), "body { margin: 0; } ");
        assert!(catalog.custom_styles().is_empty());
    }

    #[test]
    fn test_applying_style_twice_is_identical() {
        let catalog = StyleCatalog::default();
        let once = StyleSheet::parse(catalog.css_for("outlook")).to_css();
        let twice = StyleSheet::parse(&once).to_css();
        assert_eq!(once, twice);
        assert_eq!(catalog.css_for("outlook"), catalog.css_for("outlook"));
    }

    #[test]
    fn test_colors_and_lengths() {
        assert_eq!(parse_color("#fff"), Some([255, 255, 255]));
        assert_eq!(parse_color("#1068BF"), Some([0x10, 0x68, 0xbf]));
        assert_eq!(parse_color("transparent"), None);
        assert_eq!(parse_color("#12"), None);
        assert_eq!(find_color("4px solid #0066cc"), Some([0x00, 0x66, 0xcc]));

        assert_eq!(parse_length_px("16px", 16.0), Some(16.0));
        assert_eq!(parse_length_px("12pt", 16.0), Some(16.0));
        assert_eq!(parse_length_px("1.5em", 16.0), Some(24.0));
        assert_eq!(parse_length_px("auto", 16.0), None);
    }

    #[test]
    fn test_zoom_css() {
        let css = zoom_css(20);
        assert!(css.starts_with("html { font-size: 20px !important; }"));
        assert!(css.contains("h1 { font-size: 2em !important; }"));
    }
}
