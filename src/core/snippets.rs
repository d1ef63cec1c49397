//! Markdown snippets and the text transform used to insert them
//!
//! Inserting a snippet replaces the editor selection with the snippet text.
//! Inline formats (bold, italic, strikethrough, inline code) instead wrap a
//! non-empty selection, after stripping any wrapper it already carries.

use super::config::APP_VERSION;
use super::i18n::{t, Language};

/// Menu group of a snippet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnippetGroup {
    Headers,
    Format,
    Lists,
    Blocks,
    Callouts,
}

impl SnippetGroup {
    pub const ORDER: [SnippetGroup; 5] = [
        SnippetGroup::Headers,
        SnippetGroup::Format,
        SnippetGroup::Lists,
        SnippetGroup::Blocks,
        SnippetGroup::Callouts,
    ];

    /// i18n key of the group heading
    pub fn label_key(self) -> &'static str {
        match self {
            SnippetGroup::Headers => "snippets.headers",
            SnippetGroup::Format => "snippets.format",
            SnippetGroup::Lists => "snippets.lists",
            SnippetGroup::Blocks => "snippets.blocks",
            SnippetGroup::Callouts => "snippets.callouts",
        }
    }
}

/// A predefined fragment, with Spanish and English text
#[derive(Debug, Clone, Copy)]
pub struct Snippet {
    pub id: &'static str,
    pub group: SnippetGroup,
    label: [&'static str; 2],
    content: [&'static str; 2],
}

impl Snippet {
    pub fn label(&self, lang: Language) -> &'static str {
        self.label[lang_index(lang)]
    }

    pub fn content(&self, lang: Language) -> &'static str {
        self.content[lang_index(lang)]
    }
}

fn lang_index(lang: Language) -> usize {
    match lang {
        Language::Es => 0,
        Language::En => 1,
    }
}

/// Prefix and suffix for inline formats
pub fn format_markers(id: &str) -> Option<(&'static str, &'static str)> {
    match id {
        "bold" => Some(("**", "**")),
        "italic" => Some(("*", "*")),
        "strikethrough" => Some(("~~", "~~")),
        "inline_code" => Some(("`", "`")),
        _ => None,
    }
}

pub static SNIPPETS: &[Snippet] = &[
    Snippet {
        id: "h1",
        group: SnippetGroup::Headers,
        label: ["Encabezado H1", "Heading H1"],
        content: ["# Titulo principal\n\n", "# Main title\n\n"],
    },
    Snippet {
        id: "h2",
        group: SnippetGroup::Headers,
        label: ["Encabezado H2", "Heading H2"],
        content: ["## Seccion\n\n", "## Section\n\n"],
    },
    Snippet {
        id: "h3",
        group: SnippetGroup::Headers,
        label: ["Encabezado H3", "Heading H3"],
        content: ["### Subseccion\n\n", "### Subsection\n\n"],
    },
    Snippet {
        id: "bold",
        group: SnippetGroup::Format,
        label: ["Negrita", "Bold"],
        content: ["**texto en negrita**", "**bold text**"],
    },
    Snippet {
        id: "italic",
        group: SnippetGroup::Format,
        label: ["Cursiva", "Italic"],
        content: ["*texto en cursiva*", "*italic text*"],
    },
    Snippet {
        id: "strikethrough",
        group: SnippetGroup::Format,
        label: ["Tachado", "Strikethrough"],
        content: ["~~texto tachado~~", "~~strikethrough text~~"],
    },
    Snippet {
        id: "inline_code",
        group: SnippetGroup::Format,
        label: ["Codigo inline", "Inline code"],
        content: ["`codigo aqui`", "`code here`"],
    },
    Snippet {
        id: "link",
        group: SnippetGroup::Format,
        label: ["Enlace", "Link"],
        content: [
            "[Texto del enlace](https://url-aqui.com)",
            "[Link text](https://url-here.com)",
        ],
    },
    Snippet {
        id: "image",
        group: SnippetGroup::Format,
        label: ["Imagen", "Image"],
        content: [
            "![Texto alternativo](ruta/a/imagen.png)",
            "![Alt text](path/to/image.png)",
        ],
    },
    Snippet {
        id: "bullet_list",
        group: SnippetGroup::Lists,
        label: ["Lista con bullets", "Bullet list"],
        content: [
            "- Elemento 1\n- Elemento 2\n- Elemento 3\n\n",
            "- Item 1\n- Item 2\n- Item 3\n\n",
        ],
    },
    Snippet {
        id: "numbered_list",
        group: SnippetGroup::Lists,
        label: ["Lista numerada", "Numbered list"],
        content: [
            "1. Primer paso\n2. Segundo paso\n3. Tercer paso\n\n",
            "1. First step\n2. Second step\n3. Third step\n\n",
        ],
    },
    Snippet {
        id: "task_list",
        group: SnippetGroup::Lists,
        label: ["Lista de tareas", "Task list"],
        content: [
            "- [ ] Tarea pendiente\n- [x] Tarea completada\n- [ ] Otra tarea\n\n",
            "- [ ] Pending task\n- [x] Completed task\n- [ ] Another task\n\n",
        ],
    },
    Snippet {
        id: "table",
        group: SnippetGroup::Blocks,
        label: ["Tabla", "Table"],
        content: [
            "| Columna 1 | Columna 2 | Columna 3 |\n|-----------|-----------|-----------|\n| Dato 1    | Dato 2    | Dato 3    |\n| Dato 4    | Dato 5    | Dato 6    |\n\n",
            "| Column 1 | Column 2 | Column 3 |\n|----------|----------|----------|\n| Data 1   | Data 2   | Data 3   |\n| Data 4   | Data 5   | Data 6   |\n\n",
        ],
    },
    Snippet {
        id: "code_block",
        group: SnippetGroup::Blocks,
        label: ["Bloque de codigo", "Code block"],
        content: [
            "```python\n# Tu codigo aqui\ndef ejemplo():\n    return \"Hola mundo\"\n```\n\n",
            "```python\n# Your code here\ndef example():\n    return \"Hello world\"\n```\n\n",
        ],
    },
    Snippet {
        id: "quote",
        group: SnippetGroup::Blocks,
        label: ["Cita", "Quote"],
        content: [
            "> Esta es una cita o nota importante.\n> Puede tener multiples lineas.\n\n",
            "> This is a quote or an important note.\n> It can span multiple lines.\n\n",
        ],
    },
    Snippet {
        id: "hr",
        group: SnippetGroup::Blocks,
        label: ["Separador horizontal", "Horizontal rule"],
        content: ["\n---\n\n", "\n---\n\n"],
    },
    Snippet {
        id: "note",
        group: SnippetGroup::Callouts,
        label: ["Nota", "Note"],
        content: [
            "<div class=\"callout-note\">\n\n**Nota:** Informacion adicional o aclaracion que puede ser util.\n\n</div>\n\n",
            "<div class=\"callout-note\">\n\n**Note:** Additional information or a clarification that may help.\n\n</div>\n\n",
        ],
    },
    Snippet {
        id: "warning",
        group: SnippetGroup::Callouts,
        label: ["Advertencia", "Warning"],
        content: [
            "<div class=\"callout-warning\">\n\n**Advertencia:** Precaucion, hay algo importante que considerar aqui.\n\n</div>\n\n",
            "<div class=\"callout-warning\">\n\n**Warning:** Caution, there is something important to consider here.\n\n</div>\n\n",
        ],
    },
    Snippet {
        id: "important",
        group: SnippetGroup::Callouts,
        label: ["Importante", "Important"],
        content: [
            "<div class=\"callout-important\">\n\n**Importante:** Atencion critica requerida. No ignorar este punto.\n\n</div>\n\n",
            "<div class=\"callout-important\">\n\n**Important:** Critical attention required. Do not ignore this point.\n\n</div>\n\n",
        ],
    },
];

pub fn snippet(id: &str) -> Option<&'static Snippet> {
    SNIPPETS.iter().find(|s| s.id == id)
}

/// Snippets grouped for the menu, in display order, empty groups skipped
pub fn grouped() -> Vec<(SnippetGroup, Vec<&'static Snippet>)> {
    SnippetGroup::ORDER
        .iter()
        .map(|group| {
            let items: Vec<_> = SNIPPETS.iter().filter(|s| s.group == *group).collect();
            (*group, items)
        })
        .filter(|(_, items)| !items.is_empty())
        .collect()
}

/// Remove one whole-text inline wrapper per format, in order:
/// bold, italic, strikethrough, inline code.
pub fn strip_formatting(text: &str) -> String {
    let mut result = text;
    for marker in ["**", "*", "~~", "`"] {
        result = strip_wrapper(result, marker);
    }
    result.to_string()
}

fn strip_wrapper<'a>(text: &'a str, marker: &str) -> &'a str {
    let inner = text
        .strip_prefix(marker)
        .and_then(|rest| rest.strip_suffix(marker));
    match inner {
        Some(inner)
            if !inner.is_empty()
                && !inner.contains(['\n', '\r', '\u{2028}', '\u{2029}']) =>
        {
            inner
        }
        _ => text,
    }
}

/// Result of a snippet insertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetEdit {
    pub text: String,
    /// Cursor position after the edit, in chars
    pub cursor: usize,
}

/// Insert snippet `id` into `text` over the char range `selection`
pub fn insert_snippet(
    text: &str,
    selection: (usize, usize),
    id: &str,
    lang: Language,
) -> Option<SnippetEdit> {
    let snippet = snippet(id)?;

    let char_len = text.chars().count();
    let start = selection.0.min(selection.1).min(char_len);
    let end = selection.0.max(selection.1).min(char_len);
    let start_byte = char_to_byte(text, start);
    let end_byte = char_to_byte(text, end);
    let selected = &text[start_byte..end_byte];

    let insert_text = match format_markers(id) {
        Some((prefix, suffix)) if !selected.is_empty() => {
            format!("{}{}{}", prefix, strip_formatting(selected), suffix)
        }
        _ => snippet.content(lang).to_string(),
    };

    let mut new_text = String::with_capacity(text.len() + insert_text.len());
    new_text.push_str(&text[..start_byte]);
    new_text.push_str(&insert_text);
    new_text.push_str(&text[end_byte..]);

    Some(SnippetEdit {
        cursor: start + insert_text.chars().count(),
        text: new_text,
    })
}

/// Byte offset of char index `idx`, clamped to the end of the text
pub fn char_to_byte(text: &str, idx: usize) -> usize {
    text.char_indices()
        .nth(idx)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len())
}

/// Document shown on first use and for "new document"
pub fn example_document(lang: Language) -> String {
    let s = |id: &str| snippet(id).map(|s| s.content(lang)).unwrap_or_default();

    let mut doc = format!("# {}\n\n", t(lang, "example.title"));
    doc += &format!("{}\n\n", t(lang, "example.intro"));

    doc += &format!("## {}\n\n", t(lang, "example.section.format"));
    doc += &format!("{}, {}, {}\n\n", s("bold"), s("italic"), s("strikethrough"));
    doc += &format!("{} - {}\n\n", s("inline_code"), s("link"));

    doc += &format!("## {}\n\n", t(lang, "example.section.lists"));
    doc += s("bullet_list");
    doc += s("numbered_list");
    doc += s("task_list");

    doc += &format!("## {}\n\n", t(lang, "example.section.table"));
    doc += s("table");

    doc += &format!("## {}\n\n", t(lang, "example.section.code"));
    doc += s("code_block");

    doc += &format!("## {}\n\n", t(lang, "example.section.quote"));
    doc += s("quote");

    doc += &format!("## {}\n\n", t(lang, "example.section.callouts"));
    doc += s("note");
    doc += s("warning");
    doc += s("important");

    doc += &format!("---\n\n*{} v{}*\n", t(lang, "example.footer"), APP_VERSION);
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_strips_existing_bold() {
        let text = "say **hello** now";
        // select "**hello**"
        let edit = insert_snippet(text, (4, 13), "bold", Language::En).unwrap();
        assert_eq!(edit.text, "say **hello** now");
        assert_eq!(edit.cursor, 13);

        let edit = insert_snippet(text, (4, 13), "italic", Language::En).unwrap();
        assert_eq!(edit.text, "say *hello* now");
        assert_eq!(edit.cursor, 11);
    }

    #[test]
    fn test_wrap_plain_selection() {
        let edit = insert_snippet("a word here", (2, 6), "inline_code", Language::Es).unwrap();
        assert_eq!(edit.text, "a `word` here");
        assert_eq!(edit.cursor, 8);
    }

    #[test]
    fn test_insert_at_cursor() {
        let edit = insert_snippet("ab", (1, 1), "h2", Language::En).unwrap();
        assert_eq!(edit.text, "a## Section\n\nb");
        assert_eq!(edit.cursor, 1 + "## Section\n\n".len());
    }

    #[test]
    fn test_format_without_selection_inserts_content() {
        let edit = insert_snippet("", (0, 0), "bold", Language::Es).unwrap();
        assert_eq!(edit.text, "**texto en negrita**");
        assert_eq!(edit.cursor, 20);
    }

    #[test]
    fn test_block_snippet_replaces_selection() {
        let edit = insert_snippet("x old y", (2, 5), "hr", Language::En).unwrap();
        assert_eq!(edit.text, "x \n---\n\n y");
    }

    #[test]
    fn test_reversed_and_out_of_range_selection() {
        let edit = insert_snippet("abc", (3, 1), "bold", Language::En).unwrap();
        assert_eq!(edit.text, "a**bc**");
        let edit = insert_snippet("abc", (10, 20), "h1", Language::En).unwrap();
        assert_eq!(edit.text, "abc# Main title\n\n");
    }

    #[test]
    fn test_multibyte_positions_are_chars() {
        let edit = insert_snippet("año ñu", (4, 6), "bold", Language::Es).unwrap();
        assert_eq!(edit.text, "año **ñu**");
        assert_eq!(edit.cursor, 10);
    }

    #[test]
    fn test_unknown_snippet() {
        assert!(insert_snippet("abc", (0, 1), "nope", Language::En).is_none());
    }

    #[test]
    fn test_strip_formatting_rules() {
        assert_eq!(strip_formatting("**x**"), "x");
        assert_eq!(strip_formatting("***x***"), "x");
        assert_eq!(strip_formatting("~~gone~~"), "gone");
        assert_eq!(strip_formatting("`code`"), "code");
        assert_eq!(strip_formatting("**"), "**");
        assert_eq!(strip_formatting("****"), "**");
        assert_eq!(strip_formatting("**a\nb**"), "**a\nb**");
        assert_eq!(strip_formatting("plain"), "plain");
    }

    #[test]
    fn test_grouping_order() {
        let groups: Vec<_> = grouped().into_iter().map(|(g, _)| g).collect();
        assert_eq!(groups, SnippetGroup::ORDER.to_vec());
        assert_eq!(grouped()[0].1.len(), 3);
    }

    #[test]
    fn test_example_document() {
        let doc = example_document(Language::En);
        assert!(doc.starts_with("# Welcome to Markdown Editor\n\n"));
        assert!(doc.contains("**bold text**, *italic text*, ~~strikethrough text~~"));
        assert!(doc.contains("callout-important"));
        assert!(doc.ends_with(&format!("v{}*\n", APP_VERSION)));

        let doc = example_document(Language::Es);
        assert!(doc.contains("## Listas\n\n- Elemento 1"));
    }
}
