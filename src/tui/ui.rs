use crate::tui::app::{App, Focus};
use crate::tui::layout::{DynamicLayout, Section};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph};
use std::collections::HashMap;
use unicode_width::UnicodeWidthChar;

pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let main_layout = DynamicLayout::vertical(area)
        .section(Section::Title, Constraint::Length(2))
        .section_if(app.show_filter, Section::Search, Constraint::Length(3))
        .section(Section::Main, Constraint::Min(0))
        .section(Section::Status, Constraint::Length(1))
        .build();

    render_title_bar(frame, app, main_layout.require(Section::Title));

    if let Some(filter_area) = main_layout.get(Section::Search) {
        render_filter_bar(frame, app, filter_area);
    }

    let main_area = main_layout.require(Section::Main);
    if app.show_outline {
        let chunks = Layout::horizontal([
            Constraint::Percentage(app.outline_width),
            Constraint::Percentage(100 - app.outline_width),
        ])
        .split(main_area);
        render_outline(frame, app, chunks[0]);
        render_content(frame, app, chunks[1]);
    } else {
        render_content(frame, app, main_area);
    }

    render_status_bar(frame, app, main_layout.require(Section::Status));

    if app.show_help {
        render_help_popup(frame, app, area);
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let [h1, h2, h3] = {
        let counts = app.outline.counts();
        [counts[0], counts[1], counts[2]]
    };
    let title_text = format!(
        "tocsmith - {} - {} h1 / {} h2 / {} h3",
        app.filename, h1, h2, h3
    );

    let title = Paragraph::new(title_text)
        .style(
            Style::default()
                .fg(app.theme.title_fg)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(title, area);
}

fn render_filter_bar(frame: &mut Frame, app: &App, area: Rect) {
    let line = Line::from(vec![
        Span::raw("Filter: "),
        Span::styled(
            format!("{}_", app.filter_query),
            Style::default()
                .fg(app.theme.heading_3)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "  (Esc: clear, Enter: keep)",
            Style::default().fg(app.theme.border_unfocused),
        ),
    ]);

    let paragraph = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.heading_3))
            .title(" Filter Outline "),
    );
    frame.render_widget(paragraph, area);
}

fn render_outline(frame: &mut Frame, app: &mut App, area: Rect) {
    let theme = app.theme;
    app.outline_pane_height = area.height.saturating_sub(2);

    // borders plus the highlight symbol
    let row_width = area.width.saturating_sub(4) as usize;

    let items: Vec<ListItem> = app
        .visible
        .iter()
        .map(|&idx| {
            let item = &app.outline_items[idx];
            let indent = "  ".repeat(item.level.saturating_sub(1) as usize);
            let text = truncate_to_width(&format!("{}{}", indent, item.text), row_width);

            let color = match item.level {
                1 => theme.heading_1,
                2 => theme.heading_2,
                _ => theme.heading_3,
            };
            let style = if app.active_id.as_deref() == Some(item.id.as_str()) {
                Style::default().fg(theme.active_fg).bg(theme.active_bg)
            } else {
                Style::default().fg(color)
            };

            ListItem::new(Line::from(Span::styled(text, style)))
        })
        .collect();

    let border_color = if app.focus == Focus::Outline {
        theme.border_focused
    } else {
        theme.border_unfocused
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color))
                .title(" Outline "),
        )
        .style(Style::default().fg(theme.foreground).bg(theme.background))
        .highlight_style(
            Style::default()
                .fg(theme.selection_fg)
                .bg(theme.selection_bg),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.outline_state);
}

fn render_content(frame: &mut Frame, app: &mut App, area: Rect) {
    let theme = app.theme;
    app.content_pane_height = area.height.saturating_sub(2);

    // Heading rows get their level color so they stand out in the source
    let heading_rows: HashMap<usize, u8> = app
        .outline_items
        .iter()
        .map(|item| (item.line, item.level))
        .collect();

    let lines: Vec<Line> = app
        .page
        .html
        .lines()
        .enumerate()
        .map(|(row, line)| {
            let text = line.replace('\t', "    ");
            match heading_rows.get(&row) {
                Some(&level) => {
                    let color = match level {
                        1 => theme.heading_1,
                        2 => theme.heading_2,
                        _ => theme.heading_3,
                    };
                    Line::from(Span::styled(
                        text,
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ))
                }
                None => Line::from(Span::styled(text, Style::default().fg(theme.foreground))),
            }
        })
        .collect();

    let border_color = if app.focus == Focus::Content {
        theme.border_focused
    } else {
        theme.border_unfocused
    };

    let paragraph = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color))
                .title(format!(" {} ", app.filename)),
        )
        .style(Style::default().fg(theme.foreground).bg(theme.background))
        .scroll((app.content_scroll, 0));

    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme;

    if let Some(ref msg) = app.status_message {
        let status = Paragraph::new(msg.clone()).style(
            Style::default()
                .bg(theme.active_bg)
                .fg(theme.active_fg)
                .add_modifier(Modifier::BOLD),
        );
        frame.render_widget(status, area);
        return;
    }

    let focus_indicator = match app.focus {
        Focus::Outline => "Outline",
        Focus::Content => "Content",
    };
    let active = app.active_id.as_deref().unwrap_or("-");
    let outline_status = if app.show_outline {
        format!("Outline:{}%", app.outline_width)
    } else {
        "Outline:Hidden".to_string()
    };

    let status_text = format!(
        " [{}] #{} • {} • Theme:{} • j/k:Scroll • Enter:Jump • /:Filter • y:Anchor • o:Open • ?:Help ",
        focus_indicator,
        active,
        outline_status,
        app.current_theme.label()
    );

    let status = Paragraph::new(status_text).style(
        Style::default()
            .bg(theme.status_bar_bg)
            .fg(theme.status_bar_fg),
    );
    frame.render_widget(status, area);
}

fn render_help_popup(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme;
    let popup = centered_rect(60, 70, area);

    let entries = [
        ("j / k, ↓ / ↑", "Scroll content or move in the outline"),
        ("d / u", "Half page down / up"),
        ("g / G", "Top / bottom"),
        ("Tab", "Switch focus between outline and content"),
        ("Enter", "Jump content to the selected heading"),
        ("/", "Filter outline entries"),
        ("y", "Copy the active entry's anchor"),
        ("o", "Open the page in the browser"),
        ("w", "Toggle the outline pane"),
        ("[ / ]", "Shrink / grow the outline pane"),
        ("S", "Save the outline width"),
        ("t", "Cycle theme"),
        ("r", "Reload the page"),
        ("?", "Toggle this help"),
        ("q / Esc", "Quit"),
    ];

    let mut lines = vec![Line::from("")];
    for (key, action) in entries {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {key:<14}"),
                Style::default()
                    .fg(theme.heading_2)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(action, Style::default().fg(theme.foreground)),
        ]));
    }

    let help = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border_focused))
                .title(" Keys ")
                .style(Style::default().bg(theme.background)),
        )
        .style(Style::default().fg(theme.foreground));

    frame.render_widget(Clear, popup);
    frame.render_widget(help, popup);
}

/// Truncate to a display width, honoring wide characters.
fn truncate_to_width(text: &str, max_width: usize) -> String {
    let mut width = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > max_width {
            out.push('\u{2026}');
            break;
        }
        width += w;
        out.push(c);
    }
    out
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);
    let horizontal = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(vertical[1]);
    horizontal[1]
}
