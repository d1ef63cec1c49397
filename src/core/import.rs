//! Reading Markdown/text files and converting Word documents to Markdown

use std::io::{Cursor, Read};
use std::path::Path;

use anyhow::{Context, Result};
use regex_lite::{Captures, Regex};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Not a Word document: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed document: {0}")]
    Malformed(String),

    #[error("Pattern error: {0}")]
    Pattern(#[from] regex_lite::Error),
}

/// Read a text file; invalid UTF-8 is decoded lossily
pub fn read_text_file(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) => {
            tracing::warn!("File is not valid UTF-8, decoding lossily: {}", path.display());
            Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
        }
    }
}

/// Read a `.docx` file and convert it to Markdown
pub fn import_docx(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    let markdown = docx_to_markdown(&bytes)
        .with_context(|| format!("Failed to convert Word document: {}", path.display()))?;
    tracing::info!("Imported Word document: {}", path.display());
    Ok(markdown)
}

struct Patterns {
    paragraph: Regex,
    style: Regex,
    run: Regex,
    bold: Regex,
    italic: Regex,
    content: Regex,
    entity: Regex,
}

impl Patterns {
    fn new() -> std::result::Result<Self, regex_lite::Error> {
        Ok(Self {
            paragraph: Regex::new(r"(?s)<w:p(?:\s[^>]*)?>(.*?)</w:p>")?,
            style: Regex::new(r#"<w:pStyle\s+w:val="([^"]*)""#)?,
            run: Regex::new(r"(?s)<w:r(?:\s[^>]*)?>(.*?)</w:r>")?,
            bold: Regex::new(r#"<w:b(?:\s+w:val="(\w*)")?\s*/>"#)?,
            italic: Regex::new(r#"<w:i(?:\s+w:val="(\w*)")?\s*/>"#)?,
            content: Regex::new(r"(?s)<w:t(?:\s[^>]*)?>(.*?)</w:t>|<w:tab\s*/>|<w:br(?:\s[^>]*)?/>")?,
            entity: Regex::new(r"&(#x[0-9a-fA-F]+|#[0-9]+|lt|gt|amp|quot|apos);")?,
        })
    }

    fn flag(re: &Regex, props: &str) -> bool {
        re.captures(props).is_some_and(|caps| {
            !matches!(caps.get(1).map(|m| m.as_str()), Some("0" | "false" | "off"))
        })
    }

    fn decode(&self, text: &str) -> String {
        self.entity
            .replace_all(text, |caps: &Captures| {
                let entity = &caps[1];
                let decoded = match entity {
                    "lt" => Some('<'),
                    "gt" => Some('>'),
                    "amp" => Some('&'),
                    "quot" => Some('"'),
                    "apos" => Some('\''),
                    _ if entity.starts_with("#x") => {
                        u32::from_str_radix(&entity[2..], 16).ok().and_then(char::from_u32)
                    }
                    _ => entity[1..].parse().ok().and_then(char::from_u32),
                };
                decoded.map(String::from).unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }
}

enum Block {
    Heading(usize, String),
    Item(String),
    Paragraph(String),
}

/// Convert the bytes of a `.docx` file to Markdown
pub fn docx_to_markdown(bytes: &[u8]) -> std::result::Result<String, ImportError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")?
        .read_to_string(&mut xml)
        .map_err(|e| ImportError::Malformed(e.to_string()))?;

    if !xml.contains("<w:body") {
        return Err(ImportError::Malformed("missing document body".to_string()));
    }

    let patterns = Patterns::new()?;
    let blocks: Vec<Block> = patterns
        .paragraph
        .captures_iter(&xml)
        .filter_map(|caps| convert_paragraph(&patterns, &caps[1]))
        .collect();

    let mut markdown = String::new();
    let mut previous_item = false;
    for block in &blocks {
        let is_item = matches!(block, Block::Item(_));
        if !markdown.is_empty() {
            markdown.push_str(if is_item && previous_item { "\n" } else { "\n\n" });
        }
        match block {
            Block::Heading(level, text) => {
                markdown.push_str(&"#".repeat(*level));
                markdown.push(' ');
                markdown.push_str(text);
            }
            Block::Item(text) => {
                markdown.push_str("- ");
                markdown.push_str(text);
            }
            Block::Paragraph(text) => markdown.push_str(text),
        }
        previous_item = is_item;
    }
    if !markdown.is_empty() {
        markdown.push('\n');
    }
    Ok(markdown)
}

fn heading_level(style: &str) -> Option<usize> {
    if style.eq_ignore_ascii_case("title") {
        return Some(1);
    }
    let level = style
        .strip_prefix("Heading")
        .or_else(|| style.strip_prefix("heading"))?
        .trim()
        .parse::<usize>()
        .ok()?;
    (1..=6).contains(&level).then_some(level)
}

fn convert_paragraph(patterns: &Patterns, xml: &str) -> Option<Block> {
    let (props, body) = match xml.find("</w:pPr>") {
        Some(end) => xml.split_at(end),
        None => ("", xml),
    };

    // Adjacent runs with the same formatting are merged before wrapping
    let mut segments: Vec<(String, bool, bool)> = Vec::new();
    for run in patterns.run.captures_iter(body) {
        let run = &run[1];
        let run_props = run.find("</w:rPr>").map(|end| &run[..end]).unwrap_or("");
        let bold = Patterns::flag(&patterns.bold, run_props);
        let italic = Patterns::flag(&patterns.italic, run_props);

        let mut text = String::new();
        for token in patterns.content.captures_iter(run) {
            match token.get(1) {
                Some(t) => text.push_str(&patterns.decode(t.as_str())),
                None if token[0].starts_with("<w:tab") => text.push('\t'),
                None => text.push('\n'),
            }
        }

        match segments.last_mut() {
            Some(last) if last.1 == bold && last.2 == italic => last.0.push_str(&text),
            _ => segments.push((text, bold, italic)),
        }
    }

    let text: String = segments
        .iter()
        .map(|(text, bold, italic)| wrap(text, *bold, *italic))
        .collect();
    let text = text.trim().to_string();
    if text.is_empty() {
        return None;
    }

    let style = patterns.style.captures(props).map(|c| c[1].to_string());
    if let Some(level) = style.as_deref().and_then(heading_level) {
        return Some(Block::Heading(level, text));
    }
    if props.contains("<w:numPr") {
        return Some(Block::Item(text));
    }
    Some(Block::Paragraph(text))
}

fn wrap(text: &str, bold: bool, italic: bool) -> String {
    let inner = text.trim();
    if inner.is_empty() || !(bold || italic) {
        return text.to_string();
    }
    let marker = match (bold, italic) {
        (true, true) => "***",
        (true, false) => "**",
        _ => "*",
    };
    let leading = &text[..text.len() - text.trim_start().len()];
    let trailing = &text[text.trim_end().len()..];
    format!("{}{}{}{}{}", leading, marker, inner, marker, trailing)
}
