//! Markdown rendering and title derivation.
//!
//! `derive_title` is the single canonical title function: both the
//! generation pipeline and the store use it, so a title computed at
//! generation time and one recomputed from stored content never diverge.

use pulldown_cmark::{Options, Parser, html};

pub const DEFAULT_TITLE: &str = "Untitled Project";
const TITLE_MAX_CHARS: usize = 50;

/// Render markdown to HTML with table support enabled (fenced code blocks
/// are core CommonMark). Pure: rendering the same input twice yields
/// byte-identical output.
pub fn render_markdown(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    let parser = Parser::new_ext(markdown, options);
    let mut out = String::with_capacity(markdown.len() * 2);
    html::push_html(&mut out, parser);
    out
}

/// Derive a display title from markdown content: the first heading line
/// with its markers stripped, else the first non-empty line truncated to
/// 50 characters, else a default. Never returns an empty string.
pub fn derive_title(content: &str) -> String {
    let mut first_text: Option<&str> = None;
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with('#') {
            let title = line.trim_start_matches('#').trim();
            if !title.is_empty() {
                return title.to_string();
            }
            continue;
        }
        first_text.get_or_insert(line);
    }
    match first_text {
        Some(line) => line.chars().take(TITLE_MAX_CHARS).collect(),
        None => DEFAULT_TITLE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_comes_from_first_heading() {
        assert_eq!(derive_title("# Chess Engine\n\nBody."), "Chess Engine");
        assert_eq!(derive_title("## Deep Heading\ntext"), "Deep Heading");
    }

    #[test]
    fn heading_later_in_text_still_wins() {
        let content = "Some preamble the model added.\n\n# Actual Title\n\nBody.";
        assert_eq!(derive_title(content), "Actual Title");
    }

    #[test]
    fn no_heading_falls_back_to_first_line_truncated() {
        let long = "x".repeat(80);
        assert_eq!(derive_title(&long).chars().count(), 50);
        assert_eq!(derive_title("short line\nmore"), "short line");
    }

    #[test]
    fn empty_content_gets_default_title() {
        assert_eq!(derive_title(""), DEFAULT_TITLE);
        assert_eq!(derive_title("\n\n   \n"), DEFAULT_TITLE);
        assert_eq!(derive_title("#\n##\n"), DEFAULT_TITLE);
    }

    #[test]
    fn render_is_deterministic() {
        let md = "# Title\n\nSome *emphasis* and `code`.";
        assert_eq!(render_markdown(md), render_markdown(md));
    }

    #[test]
    fn render_supports_fenced_code_and_tables() {
        let html = render_markdown("```rust\nfn main() {}\n```");
        assert!(html.contains("<pre><code"));

        let html = render_markdown("| a | b |\n|---|---|\n| 1 | 2 |");
        assert!(html.contains("<table>"));
    }
}
