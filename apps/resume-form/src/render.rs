//! Page rendering: HTML fragments for embedding, plain text for the terminal.

use crate::page::{DescriptionRegion, DownloadLink, OutputContent, PageHandles, DESCRIPTION_HEADING};

const ERROR_STYLE: &str = "color:red;";

/// Inner HTML of the output region. All server-supplied text is escaped.
pub fn output_html(content: &OutputContent) -> String {
    match content {
        OutputContent::Empty => String::new(),
        OutputContent::Placeholder(text) => format!("<p>{}</p>", escape_html(text)),
        OutputContent::Preformatted(text) => format!("<pre>{}</pre>", escape_html(text)),
        OutputContent::ValidationErrors(lines) => {
            let lines: Vec<String> = lines.iter().map(|l| escape_html(l)).collect();
            format!(
                "<p style=\"{ERROR_STYLE}\">Error:<br>{}</p>",
                lines.join("<br>")
            )
        }
        OutputContent::Error(line) => format!("<p style=\"{ERROR_STYLE}\">{}</p>", escape_html(line)),
    }
}

/// Inner HTML of the description region; empty while hidden.
pub fn description_html(description: &DescriptionRegion) -> String {
    match description.text() {
        Some(text) if description.is_visible() => format!(
            "<h3>{DESCRIPTION_HEADING}</h3><p>{}</p>",
            escape_html(text)
        ),
        _ => String::new(),
    }
}

pub fn link_html(link: &DownloadLink) -> String {
    let display = if link.is_visible() { "inline-block" } else { "none" };
    format!(
        "<a id=\"{}\" href=\"{}\" style=\"display:{display};\">{}</a>",
        link.kind().element_id(),
        escape_html(link.href()),
        link.kind().label()
    )
}

/// The whole page as one HTML fragment.
pub fn page_html(page: &PageHandles) -> String {
    let description_display = if page.description.is_visible() { "block" } else { "none" };
    let mut html = format!(
        "<div id=\"output\">{}</div>\n<div id=\"userDescription\" style=\"display:{description_display};\">{}</div>\n",
        output_html(page.output.content()),
        description_html(&page.description),
    );
    for link in page.links() {
        html.push_str(&link_html(link));
        html.push('\n');
    }
    html
}

/// Plain-text rendering; hidden regions are left out.
pub fn page_text(page: &PageHandles) -> String {
    let mut sections = Vec::new();

    match page.output.content() {
        OutputContent::Empty => {}
        OutputContent::Placeholder(text)
        | OutputContent::Preformatted(text)
        | OutputContent::Error(text) => sections.push(text.clone()),
        OutputContent::ValidationErrors(lines) => {
            let mut block = String::from("Error:");
            for line in lines {
                block.push('\n');
                block.push_str(line);
            }
            sections.push(block);
        }
    }

    if let (true, Some(text)) = (page.description.is_visible(), page.description.text()) {
        sections.push(format!("{DESCRIPTION_HEADING}\n{text}"));
    }

    let links: Vec<String> = page
        .links()
        .iter()
        .filter(|link| link.is_visible())
        .map(|link| format!("{}: {}", link.kind().label(), link.href()))
        .collect();
    if !links.is_empty() {
        sections.push(links.join("\n"));
    }

    let mut text = sections.join("\n\n");
    text.push('\n');
    text
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
