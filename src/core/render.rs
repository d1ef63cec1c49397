//! Markdown to HTML conversion

use pulldown_cmark::{html, Event, Options, Parser, Tag};

fn options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_FOOTNOTES);
    options
}

/// Convert Markdown to an HTML fragment (body only)
pub fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, options());
    let mut output = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut output, parser);
    output
}

/// Complete HTML document with the style embedded
pub fn render_full_html(markdown: &str, css: &str, extra_css: &str) -> String {
    let body = markdown_to_html(markdown);
    let css = if extra_css.is_empty() {
        css.to_string()
    } else {
        format!("{}\n\n{}", extra_css, css)
    };

    format!(
        "<!DOCTYPE html><html><head><meta charset=\"UTF-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\
         <style>{}</style></head><body>{}</body></html>",
        css, body
    )
}

/// Remote (http/https) image URLs referenced by the document, first occurrence order
pub fn remote_images(markdown: &str) -> Vec<String> {
    let mut urls: Vec<String> = Vec::new();
    for event in Parser::new_ext(markdown, options()) {
        if let Event::Start(Tag::Image { dest_url, .. }) = event {
            let url = dest_url.to_string();
            let remote = url.starts_with("http://") || url.starts_with("https://");
            if remote && !urls.contains(&url) {
                urls.push(url);
            }
        }
    }
    urls
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extensions_enabled() {
        let html = markdown_to_html("~~old~~\n\n| a | b |\n|---|---|\n| 1 | 2 |\n\n- [x] done\n");
        assert!(html.contains("<del>old</del>"));
        assert!(html.contains("<table>"));
        assert!(html.contains("checked"));
    }

    #[test]
    fn test_callout_html_passes_through() {
        let html = markdown_to_html("<div class=\"callout-note\">\n\n**Note:** hi\n\n</div>\n");
        assert!(html.contains("<div class=\"callout-note\">"));
        assert!(html.contains("<strong>Note:</strong>"));
    }

    #[test]
    fn test_full_document() {
        let html = render_full_html("# Title", "h1 { color: red; }", "html { font-size: 18px; }");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<style>html { font-size: 18px; }\n\nh1 { color: red; }</style>"));
        assert!(html.contains("<body><h1>Title</h1>\n</body>"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let md = "# A\n\nsome *text*";
        assert_eq!(render_full_html(md, "p { margin: 0; }", ""), render_full_html(md, "p { margin: 0; }", ""));
    }

    #[test]
    fn test_remote_images() {
        let md = "![a](https://x.org/a.png) ![b](local.png)\n\n![c](http://y.org/c.jpg) ![again](https://x.org/a.png)";
        assert_eq!(remote_images(md), vec!["https://x.org/a.png", "http://y.org/c.jpg"]);
    }
}
