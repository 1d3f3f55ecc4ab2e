//! Text gathering and normalization
//!
//! Three views of an element's text:
//! - [`visible_text`]: what a reader would see (no scripts, styles or hidden subtrees)
//! - [`raw_text`]: every text node, like the DOM `textContent` property
//! - [`block_text`]: visible text with a line break at each block boundary,
//!   normalized into trimmed non-empty lines

use scraper::{ElementRef, Node};

/// Elements whose text is never rendered
const NON_TEXT_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// Elements that start a new line when rendered
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt",
    "figcaption", "figure", "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header",
    "hr", "li", "main", "ol", "p", "pre", "section", "table", "td", "th", "tr", "ul",
];

/// Returns true if the element and its subtree are not rendered
fn is_hidden(element: &ElementRef) -> bool {
    let value = element.value();

    if NON_TEXT_TAGS.contains(&value.name()) || value.attr("hidden").is_some() {
        return true;
    }

    if value.attr("aria-hidden") == Some("true") {
        return true;
    }

    value.attr("style").map_or(false, |style| {
        let style: String = style.chars().filter(|c| !c.is_whitespace()).collect();
        let style = style.to_ascii_lowercase();
        style.contains("display:none") || style.contains("visibility:hidden")
    })
}

/// Concatenated visible text of an element, whitespace untouched
pub fn visible_text(element: ElementRef) -> String {
    let mut out = String::new();
    collect(element, &skip_nothing, false, &mut out);
    out
}

fn skip_nothing(_: &ElementRef) -> bool {
    false
}

/// Concatenated text of every descendant text node
pub fn raw_text(element: ElementRef) -> String {
    element.text().collect()
}

/// Visible text split at block boundaries, with `skip` subtrees left out
///
/// Each resulting line is trimmed, empty lines are dropped and the rest are
/// joined with `\n`.
pub fn block_text<F>(element: ElementRef, skip: F) -> String
where
    F: Fn(&ElementRef) -> bool,
{
    let mut out = String::new();
    collect(element, &skip, true, &mut out);
    normalize_lines(&out)
}

/// Trims each line, drops empty ones and rejoins with newlines
pub fn normalize_lines(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn collect(element: ElementRef, skip: &dyn Fn(&ElementRef) -> bool, breaks: bool, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(value) => {
                let Some(child) = ElementRef::wrap(child) else {
                    continue;
                };
                if is_hidden(&child) || skip(&child) {
                    continue;
                }

                let block = breaks && BLOCK_TAGS.contains(&value.name());
                if block {
                    out.push('\n');
                }
                collect(child, skip, breaks, out);
                if block {
                    out.push('\n');
                }
            }
            _ => {}
        }
    }
}
