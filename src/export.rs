//! Static HTML rendering of the chapter menu and the paged document.

use crate::document::Document;
use crate::manifest::LayoutMode;
use crate::menu::{MenuEntry, MenuGroup};
use crate::pagination::Page;
use std::fmt::Write as _;

/// Render the viewer body. `active_chapter` receives the highlight classes.
pub fn render_html(document: &Document, menu: &[MenuGroup], active_chapter: Option<&str>) -> String {
    let mut out = String::new();
    out.push_str("<div class=\"docs-viewer\">\n");
    render_menu(&mut out, menu, active_chapter);

    out.push_str("<main class=\"doc-pages\">\n");
    if !document.status.is_ready() {
        let _ = writeln!(
            out,
            "<p class=\"doc-status\">{}</p>",
            escape(&document.status.message())
        );
    }
    for section in &document.sections {
        for page in &section.pages {
            render_page(&mut out, page, active_chapter);
        }
    }
    out.push_str("</main>\n</div>\n");
    out
}

fn render_menu(out: &mut String, menu: &[MenuGroup], active_chapter: Option<&str>) {
    out.push_str("<nav class=\"chapter-menu\">\n");
    for group in menu {
        let _ = writeln!(
            out,
            "<div class=\"chapter-group\" data-major=\"{}\">",
            escape(&group.major)
        );
        if let Some(heading) = group.heading() {
            let _ = writeln!(out, "<div class=\"chapter-group-heading\">{}</div>", escape(&heading));
        }
        if let Some(parent) = &group.parent {
            render_entry(out, parent, "chapter-entry--parent", active_chapter);
        }
        for child in &group.children {
            render_entry(out, child, "chapter-entry--child", active_chapter);
        }
        out.push_str("</div>\n");
    }
    out.push_str("</nav>\n");
}

fn render_entry(out: &mut String, entry: &MenuEntry, role: &str, active_chapter: Option<&str>) {
    let active = if active_chapter == Some(entry.chapter_id.as_str()) {
        " active"
    } else {
        ""
    };
    let _ = write!(
        out,
        "<button type=\"button\" class=\"chapter-entry {role} {}{active}\" data-chapter-id=\"{}\"",
        entry.css_modifier(),
        escape(&entry.chapter_id)
    );
    if !entry.description.is_empty() {
        let _ = write!(out, " title=\"{}\"", escape(&entry.description));
    }
    let _ = writeln!(
        out,
        "><span class=\"chapter-title\">{}</span><span class=\"chapter-status\">{}</span></button>",
        escape(&entry.title),
        escape(entry.status_label())
    );
}

fn render_page(out: &mut String, page: &Page, active_chapter: Option<&str>) {
    let mut classes = vec!["doc-page"];
    if page.layout == LayoutMode::Paged {
        classes.push("doc-page--a4");
    }
    if page.has_force_break_before {
        classes.push("force-break-before");
    }
    if page.has_break_after_marker {
        classes.push("page-break-after");
    }
    if active_chapter == Some(page.chapter_id.as_str()) {
        classes.push("active-chapter");
    }

    let _ = writeln!(
        out,
        "<section class=\"{}\" id=\"{}\" data-chapter-id=\"{}\" data-page-index=\"{}\">",
        classes.join(" "),
        escape(&page.anchor_id()),
        escape(&page.chapter_id),
        page.page_index
    );
    out.push_str("<div class=\"doc-content\">\n");
    for node in &page.nodes {
        out.push_str(&node.html);
    }
    out.push_str("</div>\n</section>\n");
}

/// Escape text for use in element content and double-quoted attributes.
fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
