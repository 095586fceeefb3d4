use crate::keybindings::{Action, KeybindingMode};
use crate::render::{Element, Figure, SOLUTION_LABEL};
use crate::tui::app::{App, Focus, RowKind};
use crate::tui::theme::Theme;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, Clear, List, ListItem, Paragraph, Scrollbar, ScrollbarOrientation, Wrap,
};
use strum::IntoEnumIterator;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let [title_area, content_area, status_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_title_bar(frame, app, title_area);

    if app.sidebar_visible {
        let sidebar_width = app.sidebar_width();
        let [sidebar_area, reader_area] = Layout::horizontal([
            Constraint::Percentage(sidebar_width),
            Constraint::Percentage(100 - sidebar_width),
        ])
        .areas(content_area);
        render_sidebar(frame, app, sidebar_area);
        render_content(frame, app, reader_area);
    } else {
        render_content(frame, app, content_area);
    }

    render_status_bar(frame, app, status_area);

    if app.show_help {
        render_help_popup(frame, app, area);
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let books = app.library.books.len();
    let chapters: usize = app.library.books.iter().map(|b| b.chapters.len()).sum();
    let title_text = format!("folio - {} books - {} chapters", books, chapters);

    let title = Paragraph::new(title_text)
        .style(
            Style::default()
                .fg(app.theme.title_bar_fg)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(title, area);
}

fn render_sidebar(frame: &mut Frame, app: &mut App, area: Rect) {
    let theme = &app.theme;
    let available = area.width.saturating_sub(4) as usize;

    let items: Vec<ListItem> = app
        .sidebar_rows
        .iter()
        .map(|row| {
            let expand_indicator = if row.expandable {
                if row.expanded { "▼ " } else { "▶ " }
            } else {
                "  "
            };

            let line = match row.kind {
                RowKind::Book { .. } => Line::from(Span::styled(
                    format!(
                        "{}{}",
                        expand_indicator,
                        truncate_to_width(&row.text, available.saturating_sub(2))
                    ),
                    Style::default()
                        .fg(theme.book_fg)
                        .add_modifier(Modifier::BOLD),
                )),
                RowKind::Chapter { .. } => {
                    let style = if row.active {
                        Style::default()
                            .fg(theme.active_fg)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(theme.chapter_fg)
                    };
                    Line::from(Span::styled(
                        format!(
                            "  {}{}",
                            expand_indicator,
                            truncate_to_width(&row.text, available.saturating_sub(4))
                        ),
                        style,
                    ))
                }
                RowKind::Section { .. } => {
                    let marker = row.marker.as_deref().unwrap_or("");
                    let pad = 6usize.saturating_sub(marker.width());
                    let title_style = if row.active {
                        Style::default()
                            .fg(theme.active_fg)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(theme.section_fg)
                    };
                    Line::from(vec![
                        Span::raw("      "),
                        Span::styled(
                            format!("{}{} ", marker, " ".repeat(pad)),
                            Style::default().fg(theme.section_marker_fg),
                        ),
                        Span::styled(
                            truncate_to_width(&row.text, available.saturating_sub(13)),
                            title_style,
                        ),
                    ])
                }
            };

            ListItem::new(line)
        })
        .collect();

    let block_style = theme.border_style(app.focus == Focus::Sidebar);

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(block_style)
                .title(" Library "),
        )
        .highlight_style(theme.selection_style())
        .highlight_symbol("► ");

    frame.render_stateful_widget(list, area, &mut app.sidebar_state);

    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(Some("↑"))
        .end_symbol(Some("↓"));

    frame.render_stateful_widget(
        scrollbar,
        area.inner(ratatui::layout::Margin {
            vertical: 1,
            horizontal: 0,
        }),
        &mut app.sidebar_scroll_state,
    );
}

fn render_content(frame: &mut Frame, app: &mut App, area: Rect) {
    let block_style = app.theme.border_style(app.focus == Focus::Content);

    let title = if app.document_title.is_empty() {
        " Content ".to_string()
    } else {
        format!(" {} ", app.document_title)
    };

    let lines = document_lines(&app.elements, &app.theme);
    app.set_content_height(lines.len());

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(block_style)
                .title(title),
        )
        .wrap(Wrap { trim: false })
        .scroll((app.content_scroll, 0));

    frame.render_widget(paragraph, area);

    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(Some("↑"))
        .end_symbol(Some("↓"));

    frame.render_stateful_widget(
        scrollbar,
        area.inner(ratatui::layout::Margin {
            vertical: 1,
            horizontal: 0,
        }),
        &mut app.content_scroll_state,
    );
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(ref msg) = app.status_message {
        let status = Paragraph::new(msg.clone()).style(
            Style::default()
                .bg(app.theme.status_bg)
                .fg(app.theme.status_fg)
                .add_modifier(Modifier::BOLD),
        );
        frame.render_widget(status, area);
        return;
    }

    let hints = "j/k: move • Enter: open • c: collapse all • w: sidebar • Tab: focus • ?: help • q: quit";
    let status = Paragraph::new(hints).style(Style::default().fg(app.theme.hint_fg));
    frame.render_widget(status, area);
}

fn render_help_popup(frame: &mut Frame, app: &App, area: Rect) {
    let popup = centered_rect(50, 60, area);
    frame.render_widget(Clear, popup);

    let mut lines = vec![Line::from(Span::styled(
        "Keybindings",
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    lines.push(Line::raw(""));

    for action in Action::iter() {
        let keys = app
            .keybindings
            .keys_for_action(KeybindingMode::Normal, action);
        if keys.is_empty() {
            continue;
        }
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<12}", keys.join(", ")),
                Style::default().fg(app.theme.section_marker_fg),
            ),
            Span::raw(action.description()),
        ]));
    }

    let help = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border_focused))
                .title(" Help "),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(help, popup);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let [_, vertical, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(area);
    let [_, horizontal, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(vertical);
    horizontal
}

/// Materialize the abstract element tree into ratatui lines.
///
/// This is the thin adapter between the display-agnostic renderer and the
/// terminal; nothing here inspects content nodes directly.
pub(crate) fn document_lines(elements: &[Element], theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for element in elements {
        push_element(&mut lines, element, theme);
    }
    // Drop the trailing spacer so short documents don't end on a blank.
    if lines.last().is_some_and(|line| line.width() == 0) {
        lines.pop();
    }
    lines
}

fn push_element(lines: &mut Vec<Line<'static>>, element: &Element, theme: &Theme) {
    match element {
        Element::Paragraph { text, solution } => {
            let style = if *solution {
                Style::default()
                    .fg(theme.solution_fg)
                    .add_modifier(Modifier::ITALIC)
            } else {
                Style::default()
            };
            for text_line in text.lines() {
                lines.push(Line::from(Span::styled(text_line.to_string(), style)));
            }
            lines.push(Line::raw(""));
        }
        Element::Heading { text, .. } => {
            lines.push(Line::from(Span::styled(
                text.clone(),
                Style::default()
                    .fg(theme.heading_fg)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            )));
            lines.push(Line::raw(""));
        }
        Element::Note { text } => {
            for text_line in text.lines() {
                lines.push(Line::from(vec![
                    Span::styled("│ ", Style::default().fg(theme.note_border_fg)),
                    Span::styled(
                        text_line.to_string(),
                        Style::default().fg(theme.note_fg),
                    ),
                ]));
            }
            lines.push(Line::raw(""));
        }
        Element::Problem {
            heading,
            statement,
            figure,
            solution,
        } => {
            lines.push(Line::from(Span::styled(
                heading.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )));
            for text_line in statement.lines() {
                lines.push(Line::raw(text_line.to_string()));
            }
            if let Some(figure) = figure {
                push_figure(lines, figure, theme);
            }
            if let Some(solution) = solution {
                let mut first = true;
                for text_line in solution.lines() {
                    if first {
                        lines.push(Line::from(vec![
                            Span::styled(
                                format!("{SOLUTION_LABEL} "),
                                Style::default()
                                    .fg(theme.solution_fg)
                                    .add_modifier(Modifier::BOLD),
                            ),
                            Span::styled(
                                text_line.to_string(),
                                Style::default().fg(theme.solution_fg),
                            ),
                        ]));
                        first = false;
                    } else {
                        lines.push(Line::from(Span::styled(
                            text_line.to_string(),
                            Style::default().fg(theme.solution_fg),
                        )));
                    }
                }
            }
            lines.push(Line::raw(""));
        }
        Element::Equation { math, tag } => {
            let mut spans = vec![Span::styled(
                format!("  {math}"),
                Style::default().fg(theme.equation_fg),
            )];
            if let Some(tag) = tag {
                spans.push(Span::styled(
                    format!("  ({tag})"),
                    Style::default().fg(theme.equation_tag_fg),
                ));
            }
            lines.push(Line::from(spans));
            lines.push(Line::raw(""));
        }
        Element::Figure(figure) => {
            push_figure(lines, figure, theme);
            lines.push(Line::raw(""));
        }
        Element::Container {
            title,
            depth,
            children,
            ..
        } => {
            let style = if *depth == 0 {
                Style::default()
                    .fg(theme.heading_fg)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default()
                    .fg(theme.heading_fg)
                    .add_modifier(Modifier::BOLD)
            };
            lines.push(Line::from(Span::styled(title.clone(), style)));
            lines.push(Line::raw(""));
            for child in children {
                push_element(lines, child, theme);
            }
        }
    }
}

fn push_figure(lines: &mut Vec<Line<'static>>, figure: &Figure, theme: &Theme) {
    lines.push(Line::from(Span::styled(
        format!("[figure] {}", figure.path.display()),
        Style::default().fg(theme.figure_fg),
    )));
    if let Some(caption) = &figure.caption {
        lines.push(Line::from(Span::styled(
            caption.clone(),
            Style::default()
                .fg(theme.caption_fg)
                .add_modifier(Modifier::ITALIC),
        )));
    }
}

/// Truncate a string to a display width, appending an ellipsis when cut.
fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("a longer title", 8), "a longe…");
    }

    #[test]
    fn test_problem_without_optional_blocks_renders_two_lines() {
        let theme = Theme::default();
        let element = Element::Problem {
            heading: "17. Projectile range".to_string(),
            statement: "Find R.".to_string(),
            figure: None,
            solution: None,
        };

        let lines = document_lines(std::slice::from_ref(&element), &theme);
        // Header + statement, spacer trimmed; no figure or solution lines.
        assert_eq!(lines.len(), 2);
        let rendered: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
        assert_eq!(rendered, ["17. Projectile range", "Find R."]);
    }

    #[test]
    fn test_figure_caption_rendered() {
        let theme = Theme::default();
        let element = Element::Figure(Figure {
            path: PathBuf::from("/srv/book/images/fig.png"),
            caption: Some("Fig. 1".to_string()),
        });

        let lines = document_lines(std::slice::from_ref(&element), &theme);
        let rendered: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
        assert_eq!(rendered, ["[figure] /srv/book/images/fig.png", "Fig. 1"]);
    }

    #[test]
    fn test_container_children_follow_heading() {
        let theme = Theme::default();
        let element = Element::Container {
            title: "Outer".to_string(),
            anchor: None,
            depth: 0,
            children: vec![Element::Paragraph {
                text: "inner".to_string(),
                solution: false,
            }],
        };

        let lines = document_lines(std::slice::from_ref(&element), &theme);
        let rendered: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
        assert_eq!(rendered, ["Outer", "", "inner"]);
    }
}
