//! Nested-list TOC markup generation.
//!
//! An explicit level tracker keeps the emitted markup structurally valid for
//! any heading order, including a level-3 entry with no preceding level-2.

use crate::outline::Outline;
use crate::scanner::utils::escape_html;

/// Render the outline entries as `<li>` items with nested child lists.
///
/// A level-2 entry opens a child `<ul>` that collects subsequent level-3
/// entries until the next level-1 or level-2 entry closes it. A level-1
/// entry closes any open child list first. A leading level-3 opens a
/// synthetic wrapper item so the markup stays well-formed.
pub fn render_items(outline: &Outline) -> String {
    let mut html = String::new();
    let mut open_child_list = false;

    for entry in &outline.entries {
        let id = escape_html(&entry.id);
        let text = escape_html(&entry.text);

        match entry.level {
            1 => {
                if open_child_list {
                    html.push_str("</ul></li>");
                    open_child_list = false;
                }
                html.push_str(&format!(
                    r##"<li class="toc-h1"><a href="#{id}">{text}</a></li>"##
                ));
            }
            2 => {
                if open_child_list {
                    html.push_str("</ul></li>");
                }
                html.push_str(&format!(r##"<li><a href="#{id}">{text}</a><ul>"##));
                open_child_list = true;
            }
            _ => {
                if !open_child_list {
                    // Synthetic wrapper for a leading h3
                    html.push_str("<li><ul>");
                    open_child_list = true;
                }
                html.push_str(&format!(r##"<li><a href="#{id}">{text}</a></li>"##));
            }
        }
    }

    if open_child_list {
        html.push_str("</ul></li>");
    }
    html
}

/// Render the outline as a complete `<ul>` list.
pub fn render_list(outline: &Outline, class: &str) -> String {
    format!(
        r#"<ul class="{}">{}</ul>"#,
        escape_html(class),
        render_items(outline)
    )
}

/// Render the collapsible inline box placed at the top of the content region.
pub fn render_inline_box(outline: &Outline) -> String {
    format!(
        r#"<div class="toc-box"><details open><summary>Table of Contents</summary>{}</details></div>"#,
        render_list(outline, "toc-list")
    )
}
