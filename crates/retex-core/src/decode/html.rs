//! Visible-text extraction from HTML receipt pages.

use scraper::{ElementRef, Html};
use tracing::debug;

use super::Result;

/// Extract visible text from HTML bytes.
///
/// Bytes are decoded as UTF-8 with undecodable sequences replaced,
/// `script` and `style` subtrees are dropped, and whitespace runs are
/// collapsed into single spaces.
pub fn extract_html_text(content: &[u8]) -> Result<String> {
    let html = String::from_utf8_lossy(content);
    let document = Html::parse_document(&html);

    let mut raw = String::new();
    collect_visible_text(document.root_element(), &mut raw);

    let text = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    debug!("Extracted {} characters from HTML", text.len());
    Ok(text)
}

fn collect_visible_text(element: ElementRef, out: &mut String) {
    let name = element.value().name();
    if name == "script" || name == "style" {
        return;
    }

    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
            out.push(' ');
        } else if let Some(child_element) = ElementRef::wrap(child) {
            collect_visible_text(child_element, out);
        }
    }
}
