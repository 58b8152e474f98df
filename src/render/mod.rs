//! Turns wiki listing pages into annotated Lua function indexes.
//!
//! Each documented API lives in a `dd` element: a link with the function
//! name, then the signature and a short description. The output is a comment
//! block with the description and wiki link, followed by an empty `function`
//! declaration that IDEs can index.

use scraper::{ElementRef, Html, Selector};

use crate::scrape::element_text;

/// Widget constructors whose return type is worth declaring for IDE
/// completion. Keyed by exact function name.
const RETURN_ANNOTATIONS: [(&str, &str); 3] = [
    ("Region:CreateAnimationGroup", "AnimationGroup"),
    ("Frame:CreateFontString", "FontString"),
    ("Frame:CreateTexture", "Texture"),
];

fn return_annotation(name: &str) -> Option<&'static str> {
    RETURN_ANNOTATIONS
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, annotation)| *annotation)
}

/// Renders every API entry on a listing page, in document order.
///
/// A page with no entries at all reads as a site redesign rather than an
/// empty API, so that case is an error.
pub fn render_entries(html: &str, wiki_base: &str) -> Result<Vec<String>, String> {
    let document = Html::parse_document(html);
    let entry_selector = Selector::parse("#mw-content-text dd")
        .map_err(|err| format!("invalid entry selector: {err}"))?;
    let link_selector =
        Selector::parse("a").map_err(|err| format!("invalid link selector: {err}"))?;

    let mut blocks = Vec::new();
    for entry in document.select(&entry_selector) {
        if element_text(entry).is_empty() {
            continue;
        }
        blocks.push(render_entry(entry, &link_selector, wiki_base));
    }

    if blocks.is_empty() {
        return Err("page lists no API entries".to_owned());
    }
    Ok(blocks)
}

fn render_entry(entry: ElementRef<'_>, link_selector: &Selector, wiki_base: &str) -> String {
    let text = element_text(entry);
    let Some(link) = entry.select(link_selector).next() else {
        // Entries without a link carry no name to declare; keep the text as
        // a plain comment.
        return format!("--- {text}\n\n");
    };

    // Square brackets mark optional arguments but close EmmyLua doc blocks.
    let description = text.replace('[', "{").replace(']', "}");
    let name = element_text(link);
    let title = link.attr("title").unwrap_or_default();

    let mut block = format!("--- {description}");
    if !title.ends_with("(page does not exist)")
        && let Some(href) = link.attr("href")
    {
        block.push_str(&format!("\n---\n--- [{wiki_base}{href}]"));
    }
    block.push('\n');

    if let Some(annotation) = return_annotation(&name) {
        block.push_str("---@return ");
        block.push_str(annotation);
        block.push('\n');
    }

    let open = text.find('(').map_or(-1, |at| at as i64);
    let close = text.find(')').map_or(-1, |at| at as i64);
    block.push_str("function ");
    block.push_str(&name);
    block.push('(');
    if close - open > 1 {
        block.push_str("...");
    }
    block.push_str(") end\n\n");
    block
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(entries: &str) -> String {
        format!("<html><body><div id=\"mw-content-text\"><dl>{entries}</dl></div></body></html>")
    }

    fn render_one(entry: &str) -> String {
        let blocks = render_entries(&listing(entry), "https://warcraft.wiki.gg").unwrap();
        assert_eq!(blocks.len(), 1);
        blocks.into_iter().next().unwrap()
    }

    #[test]
    fn renders_a_documented_function() {
        let block = render_one(
            "<dd><a href=\"/wiki/API_CreateFrame\" title=\"API CreateFrame\">CreateFrame</a>(frameType [, name]) - Creates a new Frame.</dd>",
        );
        assert_eq!(
            block,
            "--- CreateFrame(frameType {, name}) - Creates a new Frame.\n\
             ---\n\
             --- [https://warcraft.wiki.gg/wiki/API_CreateFrame]\n\
             function CreateFrame(...) end\n\n"
        );
    }

    #[test]
    fn undocumented_pages_get_no_link_line() {
        let block = render_one(
            "<dd><a href=\"/index.php?title=API_Foo\" title=\"API Foo (page does not exist)\">Foo</a>() - Missing page.</dd>",
        );
        assert!(!block.contains("---\n--- ["));
        assert!(block.ends_with("function Foo() end\n\n"));
    }

    #[test]
    fn empty_argument_list_stays_empty() {
        let block = render_one(
            "<dd><a href=\"/wiki/API_GetTime\" title=\"API GetTime\">GetTime</a>() - Current time in seconds.</dd>",
        );
        assert!(block.contains("function GetTime() end"));
        assert!(!block.contains("..."));
    }

    #[test]
    fn widget_constructors_declare_their_return_type() {
        let block = render_one(
            "<dd><a href=\"/wiki/API_Frame_CreateTexture\" title=\"API Frame CreateTexture\">Frame:CreateTexture</a>(name) - Creates a Texture.</dd>",
        );
        assert!(block.contains("---@return Texture\n"));
        assert!(block.contains("function Frame:CreateTexture(...) end"));
        assert_eq!(return_annotation("GetTime"), None);
    }

    #[test]
    fn entry_without_a_link_stays_a_comment() {
        let block = render_one("<dd>UNDOCUMENTED - removed in patch 4.0.</dd>");
        assert_eq!(block, "--- UNDOCUMENTED - removed in patch 4.0.\n\n");
    }

    #[test]
    fn blank_entries_are_dropped() {
        let html = listing(
            "<dd></dd><dd><a href=\"/wiki/API_GetTime\" title=\"API GetTime\">GetTime</a>() - Time.</dd>",
        );
        let blocks = render_entries(&html, "https://warcraft.wiki.gg").unwrap();
        assert_eq!(blocks.len(), 1);
    }

    #[test]
    fn page_without_entries_is_an_error() {
        let err = render_entries("<html><body><p>maintenance</p></body></html>", "x").unwrap_err();
        assert!(err.contains("no API entries"));
    }
}
