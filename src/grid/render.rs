//! Rendering: header, windowed body between spacer regions, loading
//! skeletons, empty placeholder, and the pager footer. Render is a pure
//! function of current state plus the live viewport geometry; the only thing
//! it writes back is the hit-test layout and freshly measured row heights.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::column::{ColumnRole, LayoutColumn};
use crate::nav::Focus;
use crate::pagination::PaginationMode;
use crate::selection::SelectionState;
use crate::theme::GridTheme;
use crate::util::truncate_to_width;

use super::{ColumnSpan, Drag, Grid, RenderLayout};

/// Gap between adjacent columns, in cells
const COLUMN_GAP: u16 = 1;

impl<T: Sync> Grid<T> {
    /// Render the grid into `area` and capture hit-test geometry for the
    /// next round of pointer events.
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.layout = RenderLayout::default();
        if area.width == 0 || area.height == 0 {
            return;
        }

        let theme = self.props().theme.clone();

        // Empty and not loading: placeholder instead of header+body.
        if !self.is_loading() && self.display_len() == 0 {
            let placeholder = Paragraph::new("No data").style(theme.placeholder.to_ratatui());
            frame.render_widget(placeholder, area);
            return;
        }

        let has_footer = !matches!(self.pager(), PaginationMode::None) && area.height >= 3;
        let footer_height = u16::from(has_footer);
        let body = Rect {
            x: area.x,
            y: area.y + 1,
            width: area.width,
            height: area.height.saturating_sub(1 + footer_height),
        };

        let spans = self.column_spans(area);
        self.layout = RenderLayout {
            valid: true,
            header_y: area.y,
            body,
            columns: spans.clone(),
            prev_hit: None,
            next_hit: None,
            footer_y: None,
        };

        self.render_header(frame, area, &spans, &theme);

        if self.is_loading() {
            self.render_skeleton(frame, body, &spans, &theme);
        } else {
            self.render_body(frame, body, &spans, &theme);
        }

        if has_footer {
            self.render_footer(frame, area, &theme);
        }
    }

    /// Horizontal extents for the visible columns, clipped to the area
    fn column_spans(&self, area: Rect) -> Vec<ColumnSpan> {
        let right = area.x + area.width;
        let mut spans = Vec::new();
        let mut x = area.x;

        for LayoutColumn { def_index, width } in self.visible_columns() {
            if x >= right {
                break;
            }
            let width = width.min(right - x);
            spans.push(ColumnSpan {
                def_index,
                x,
                width,
            });
            x += width + COLUMN_GAP;
        }
        spans
    }

    fn render_header(
        &self,
        frame: &mut Frame,
        area: Rect,
        spans: &[ColumnSpan],
        theme: &GridTheme,
    ) {
        let sort = self.sort().clone();
        let multi = sort.entries().len() > 1;
        let summary_state = self.selection_summary().state;
        let dragged = match self.drag() {
            Drag::Reorder { def_index, .. } => Some(def_index),
            _ => None,
        };

        for span in spans {
            let def = &self.props().columns[span.def_index];

            let text = match def.role {
                ColumnRole::Selection => match summary_state {
                    SelectionState::None => "[ ]".to_string(),
                    SelectionState::Some => "[~]".to_string(),
                    SelectionState::All => "[x]".to_string(),
                },
                ColumnRole::Data => {
                    let mut text = def.title.clone();
                    if let Some(direction) = sort.direction_of(&def.id) {
                        text.push(' ');
                        text.push_str(direction.indicator());
                        if multi {
                            if let Some(precedence) = sort.precedence_of(&def.id) {
                                text.push_str(&precedence.to_string());
                            }
                        }
                    }
                    text
                }
                ColumnRole::Action => def.title.clone(),
            };

            let mut style = if sort.direction_of(&def.id).is_some() {
                theme.header_sorted.to_ratatui()
            } else {
                theme.header.to_ratatui()
            };
            if dragged == Some(span.def_index) {
                style = style.add_modifier(ratatui::style::Modifier::REVERSED);
            }

            let cell = Rect {
                x: span.x,
                y: area.y,
                width: span.width,
                height: 1,
            };
            let text = truncate_to_width(&text, usize::from(span.width));
            frame.render_widget(Paragraph::new(text).style(style), cell);
        }
    }

    /// A fixed number of placeholder rows while data loads; no windowing.
    fn render_skeleton(
        &self,
        frame: &mut Frame,
        body: Rect,
        spans: &[ColumnSpan],
        theme: &GridTheme,
    ) {
        let style = theme.skeleton.to_ratatui();
        let count = Self::skeleton_rows().min(usize::from(body.height));

        for i in 0..count {
            let y = body.y + i as u16;
            for span in spans {
                let cell = Rect {
                    x: span.x,
                    y,
                    width: span.width,
                    height: 1,
                };
                let fill = "▒".repeat(usize::from(span.width));
                frame.render_widget(Paragraph::new(fill).style(style), cell);
            }
        }
    }

    fn render_body(&mut self, frame: &mut Frame, body: Rect, spans: &[ColumnSpan], theme: &GridTheme) {
        if body.height == 0 {
            return;
        }
        let len = self.display_len();

        if self.pager().is_client() {
            // Whole-page rendering: client paging and windowing are mutually
            // exclusive, so rows stack from the top until the page or the
            // viewport runs out.
            let mut y = body.y;
            for display_index in 0..len {
                if y >= body.y + body.height {
                    break;
                }
                let height = self.display_row_height(display_index) as u16;
                self.render_row(frame, body, spans, theme, display_index, y, height);
                y += height;
            }
            return;
        }

        self.clamp_scroll();
        let overscan = self.props().overscan;
        let scroll_offset = self.scroll_offset();
        let viewport = usize::from(body.height);
        let window = self
            .window_mut()
            .compute(viewport, scroll_offset, len, overscan);

        // Measure materialized rows; offsets catch up on the next compute.
        if self.props().row_height.is_some() {
            let heights: Vec<(usize, usize)> = (window.start..window.end)
                .map(|i| (i, self.display_row_height(i)))
                .collect();
            for (index, height) in heights {
                self.window_mut().measure(index, height);
            }
        }

        for display_index in window.start..window.end {
            let top = self.window_mut().offset_of(display_index, len);
            // Overscan rows above or below the viewport have nothing to draw.
            if top + self.display_row_height(display_index) <= scroll_offset {
                continue;
            }
            if top >= scroll_offset + viewport {
                break;
            }
            let y_offset = top.saturating_sub(scroll_offset);
            let y = body.y + y_offset as u16;
            let height = self.display_row_height(display_index) as u16;
            let height = height.min(body.y + body.height - y);
            self.render_row(frame, body, spans, theme, display_index, y, height);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn render_row(
        &self,
        frame: &mut Frame,
        body: Rect,
        spans: &[ColumnSpan],
        theme: &GridTheme,
        display_index: usize,
        y: u16,
        height: u16,
    ) {
        if height == 0 || y < body.y {
            return;
        }
        let height = height.min(body.y + body.height - y);

        let Some(row) = self.display_row(display_index) else {
            return;
        };
        let id = self.display_id(display_index).unwrap_or_default().to_string();

        let style = if self.focus() == Focus::Row(display_index) {
            theme.row_focused.to_ratatui()
        } else if self.is_selected(&id) {
            theme.row_selected.to_ratatui()
        } else {
            theme.row.to_ratatui()
        };

        for span in spans {
            let def = &self.props().columns[span.def_index];
            let text = match def.role {
                ColumnRole::Selection => {
                    if self.is_selected(&id) {
                        "[x]".to_string()
                    } else {
                        "[ ]".to_string()
                    }
                }
                _ => (def.accessor)(row),
            };

            let cell = Rect {
                x: span.x,
                y,
                width: span.width,
                height,
            };
            let text = truncate_to_width(&text, usize::from(span.width));
            frame.render_widget(
                Paragraph::new(Line::from(Span::raw(text))).style(style),
                cell,
            );
        }
    }

    fn render_footer(&mut self, frame: &mut Frame, area: Rect, theme: &GridTheme) {
        let y = area.y + area.height - 1;
        let style = theme.footer.to_ratatui();

        let (info, has_prev, has_next) = match self.pager() {
            PaginationMode::Client(pager) => {
                let len = self.row_model().len();
                let index = self.controlled.page_index.unwrap_or(pager.page_index());
                let info = format!("Page {}/{} · {} rows", index + 1, pager.page_count(len), len);
                (info, index > 0, index + 1 < pager.page_count(len))
            }
            PaginationMode::Cursor(cursor) => (
                String::new(),
                cursor.has_previous_page,
                cursor.has_next_page,
            ),
            PaginationMode::None => return,
        };

        let prev_label = "‹ Prev";
        let next_label = "Next ›";
        let prev_style = if has_prev {
            style
        } else {
            style.add_modifier(ratatui::style::Modifier::DIM)
        };
        let next_style = if has_next {
            style
        } else {
            style.add_modifier(ratatui::style::Modifier::DIM)
        };

        let line = Line::from(vec![
            Span::styled(prev_label, prev_style),
            Span::raw("  "),
            Span::styled(next_label, next_style),
            Span::raw("   "),
            Span::styled(info, style),
        ]);
        frame.render_widget(
            Paragraph::new(line),
            Rect {
                x: area.x,
                y,
                width: area.width,
                height: 1,
            },
        );

        let prev_width = prev_label.chars().count() as u16;
        let next_start = area.x + prev_width + 2;
        let next_width = next_label.chars().count() as u16;
        self.layout.footer_y = Some(y);
        self.layout.prev_hit = Some(area.x..area.x + prev_width);
        self.layout.next_hit = Some(next_start..next_start + next_width);
    }
}
