//! Drawing the browser with ratatui

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, List, ListItem, ListState, Paragraph};

use crate::output::{NumberFormat, SIZE_GAP, indent, size_cell, size_column_width};
use crate::view::{Controller, Marker, Row, Sort, SortKey};

use super::keys::ThresholdPrompt;

/// First visible row, kept so the cursor stays on screen without jumping.
#[derive(Debug, Clone, Copy, Default)]
pub struct Viewport {
    offset: usize,
}

impl Viewport {
    /// Scroll just enough that `cursor` is inside a window of `height` rows.
    pub fn follow(&mut self, cursor: usize, height: usize) -> usize {
        let height = height.max(1);
        if cursor < self.offset {
            self.offset = cursor;
        } else if cursor >= self.offset + height {
            self.offset = cursor + 1 - height;
        }
        self.offset
    }
}

/// Draw one frame and return the number of tree rows that fit on screen.
pub fn draw(
    frame: &mut Frame,
    controller: &Controller,
    viewport: &mut Viewport,
    prompt: Option<&ThresholdPrompt>,
) -> usize {
    let [list_area, footer_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(2)]).areas(frame.area());
    let height = usize::from(list_area.height);

    draw_rows(frame, list_area, controller, viewport, height);
    frame.render_widget(Paragraph::new(footer_lines(controller)), footer_area);

    if let Some(prompt) = prompt {
        draw_prompt(frame, list_area, prompt);
    }

    height
}

fn draw_rows(
    frame: &mut Frame,
    area: Rect,
    controller: &Controller,
    viewport: &mut Viewport,
    height: usize,
) {
    let format = controller.number_format();
    let width = size_column_width(controller.root_size(), format);
    let visible = controller.visible();

    let offset = viewport.follow(controller.cursor(), height);
    let end = (offset + height).min(visible.len());

    let items: Vec<ListItem> = visible[offset..end]
        .iter()
        .map(|&id| ListItem::new(row_line(&Row::new(controller.tree(), id), width, format)))
        .collect();

    let list = List::new(items).highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut state = ListState::default().with_selected(Some(controller.cursor() - offset));
    frame.render_stateful_widget(list, area, &mut state);
}

fn row_line(row: &Row, width: usize, format: NumberFormat) -> Line<'static> {
    let name_style = match row.marker {
        Marker::Leaf => Style::default(),
        Marker::Open | Marker::Closed => Style::default()
            .fg(Color::Blue)
            .add_modifier(Modifier::BOLD),
    };
    Line::from(vec![
        Span::raw(indent(row.depth)),
        Span::styled(size_cell(row.size, width, format), Style::default().fg(Color::Cyan)),
        Span::raw(SIZE_GAP),
        Span::styled(row.marker.as_str(), Style::default().fg(Color::DarkGray)),
        Span::styled(row.name.clone(), name_style),
    ])
}

fn sort_label(sort: Option<Sort>) -> String {
    match sort {
        None => "none".to_string(),
        Some(sort) => {
            let key = match sort.key {
                SortKey::Size => "size",
                SortKey::Name => "name",
            };
            let arrow = if sort.descending { "desc" } else { "asc" };
            format!("{} {}", key, arrow)
        }
    }
}

fn footer_lines(controller: &Controller) -> Vec<Line<'static>> {
    let key = Style::default().add_modifier(Modifier::BOLD);
    let threshold = controller.number_format().format(controller.threshold());
    vec![
        Line::from(vec![
            Span::styled(" (Q)", key),
            Span::raw("uit  "),
            Span::styled("(\u{2192})", key),
            Span::raw(" Expand  "),
            Span::styled("(\u{2190})", key),
            Span::raw(" Collapse/Up  "),
            Span::styled("(\u{2191} \u{2193} PgUp PgDn)", key),
            Span::raw(" Scroll"),
        ]),
        Line::from(vec![
            Span::styled(" (T)", key),
            Span::raw(format!("hreshold: {}  ", threshold)),
            Span::styled("(H)", key),
            Span::raw(format!("uman [{}]  Sort ", controller.number_format().label())),
            Span::styled("(S)", key),
            Span::raw("ize/"),
            Span::styled("(N)", key),
            Span::raw(format!("ame [{}]", sort_label(controller.sort()))),
        ]),
    ]
}

fn draw_prompt(frame: &mut Frame, area: Rect, prompt: &ThresholdPrompt) {
    let popup = Rect {
        x: area.x + 2,
        y: area.y + 2,
        width: area.width.saturating_sub(4),
        height: 3,
    }
    .intersection(area);

    let text = Line::from(vec![
        Span::raw("Hide nodes with size less than: "),
        Span::styled(prompt.input().to_string(), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("_"),
    ]);
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(text).block(Block::bordered()), popup);
}
