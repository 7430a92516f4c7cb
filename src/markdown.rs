//! Markdown→HTML rendering for blog content.
//!
//! The authoring surface is deliberately small: headings (h1–h3), horizontal
//! rules, images, bold/italic, ordered and unordered lists, blockquotes and
//! paragraphs. Rendering tokenizes into blocks first and applies inline
//! transforms per block, so the output does not depend on substitution order.
//! The emitted class names are part of the compatibility contract with the
//! site's stylesheets.

use regex::Regex;
use std::sync::LazyLock;

static IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[(.*?)\]\((.*?)\)").expect("valid image regex"));
static BOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("valid bold regex"));
static ITALIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*(.*?)\*").expect("valid italic regex"));
static ORDERED_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s+(.*)$").expect("valid ordered item regex"));

/// Render markdown to HTML. Empty input renders to an empty string.
#[must_use]
pub fn markdown_to_html(markdown: &str) -> String {
    if markdown.trim().is_empty() {
        return String::new();
    }

    markdown
        .split("\n\n")
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(render_block)
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_block(block: &str) -> String {
    let first_line = block.lines().next().unwrap_or("");

    if block == "---" {
        return r#"<hr class="border-t-2 border-gray-300 my-6">"#.to_string();
    }

    if let Some(rest) = first_line.strip_prefix("### ") {
        return heading(3, rest);
    }
    if let Some(rest) = first_line.strip_prefix("## ") {
        return heading(2, rest);
    }
    if let Some(rest) = first_line.strip_prefix("# ") {
        return heading(1, rest);
    }

    if first_line.starts_with("> ") {
        return block
            .lines()
            .filter_map(|line| line.strip_prefix("> "))
            .map(|quote| {
                format!(
                    r#"<blockquote class="border-l-4 border-blue-500 pl-4 italic text-gray-700 bg-blue-50 py-2 my-4">{}</blockquote>"#,
                    render_inline(quote)
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
    }

    if is_list_item(first_line) {
        return render_list(block);
    }

    // A block that is a bare image stands alone rather than being wrapped
    // in a paragraph.
    if IMAGE_RE.is_match(block) && IMAGE_RE.replace_all(block, "").trim().is_empty() {
        return render_inline(block);
    }

    let body = block
        .lines()
        .map(render_inline)
        .collect::<Vec<_>>()
        .join("<br>");

    format!(r#"<p class="mb-4 text-gray-800 leading-relaxed">{body}</p>"#)
}

fn heading(level: u8, text: &str) -> String {
    let class = match level {
        1 => "text-2xl font-bold mb-4 mt-8",
        2 => "text-xl font-semibold mb-4 mt-8",
        _ => "text-lg font-semibold mb-3 mt-6",
    };
    format!(
        r#"<h{level} class="{class}">{}</h{level}>"#,
        render_inline(text)
    )
}

fn is_list_item(line: &str) -> bool {
    line.starts_with("- ") || line.starts_with("* ") || ORDERED_ITEM_RE.is_match(line)
}

fn render_list(block: &str) -> String {
    let ordered = ORDERED_ITEM_RE.is_match(block.lines().next().unwrap_or(""));

    let items = block
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let text = if let Some(caps) = ORDERED_ITEM_RE.captures(line) {
                caps.get(1).map_or("", |m| m.as_str()).to_string()
            } else if let Some(rest) = line.strip_prefix("- ") {
                rest.to_string()
            } else if let Some(rest) = line.strip_prefix("* ") {
                rest.to_string()
            } else {
                line.to_string()
            };
            format!(r#"<li class="mb-2">{}</li>"#, render_inline(&text))
        })
        .collect::<String>();

    if ordered {
        format!(r#"<ol class="list-decimal list-inside space-y-2 mb-4">{items}</ol>"#)
    } else {
        format!(r#"<ul class="list-disc list-inside space-y-2 mb-4">{items}</ul>"#)
    }
}

/// Inline transforms: images, then bold, then italic. Bold runs before
/// italic so `**x**` is never half-eaten by the single-asterisk rule.
fn render_inline(text: &str) -> String {
    let with_images = IMAGE_RE.replace_all(
        text,
        r#"<img src="$2" alt="$1" class="w-full h-auto my-4 rounded">"#,
    );
    let with_bold = BOLD_RE.replace_all(&with_images, r#"<strong class="font-bold">$1</strong>"#);
    ITALIC_RE
        .replace_all(&with_bold, r#"<em class="italic">$1</em>"#)
        .into_owned()
}
