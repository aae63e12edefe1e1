use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
};

use super::Component;
use crate::action::Action;
use crate::state::Entry;

pub const CARD_WIDTH: u16 = 22;
pub const CARD_HEIGHT: u16 = 4;

/// Grid of entry cards.
pub struct ListingView;

pub struct ListingViewProps<'a> {
    pub entries: &'a [Entry],
    pub scroll: usize,
    pub loading: bool,
}

/// Card grid geometry of an area. Scroll positions are first rows of this grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListingGrid {
    pub columns: usize,
    pub visible_rows: usize,
}

impl Default for ListingGrid {
    fn default() -> Self {
        Self {
            columns: 1,
            visible_rows: 1,
        }
    }
}

impl ListingGrid {
    pub fn for_area(area: Rect) -> Self {
        Self {
            columns: usize::from((area.width / CARD_WIDTH).max(1)),
            visible_rows: usize::from((area.height / CARD_HEIGHT).max(1)),
        }
    }

    /// Last first-row that still fills the screen.
    pub fn max_row(&self, total: usize) -> usize {
        let rows = total.div_ceil(self.columns.max(1));
        rows.saturating_sub(self.visible_rows.max(1))
    }

    pub fn clamp(&self, row: usize, total: usize) -> usize {
        row.min(self.max_row(total))
    }

    /// Move from `row` by `delta` rows, starting from the row actually shown.
    pub fn scrolled(&self, row: usize, delta: isize, total: usize) -> usize {
        let shown = self.clamp(row, total);
        self.clamp(shown.saturating_add_signed(delta), total)
    }
}

fn render_card(frame: &mut Frame, area: Rect, entry: &Entry) {
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            entry.display_name(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
    let lines = vec![
        Line::from(Span::styled(
            format!("#{:03}", entry.id),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(format!("Type: {}", entry.types.join(", "))),
    ];
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

impl Component<Action> for ListingView {
    type Props<'a> = ListingViewProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        if props.entries.is_empty() {
            let message = if props.loading {
                "Loading Pokédex..."
            } else {
                "No Pokémon loaded. Press l to reload."
            };
            let paragraph = Paragraph::new(message)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            frame.render_widget(paragraph, area);
            return;
        }

        let grid = ListingGrid::for_area(area);
        let (columns, visible_rows) = (grid.columns, grid.visible_rows);
        let first_row = grid.clamp(props.scroll, props.entries.len());

        let visible = props
            .entries
            .iter()
            .skip(first_row * columns)
            .take(visible_rows * columns);
        for (index, entry) in visible.enumerate() {
            let row = (index / columns) as u16;
            let col = (index % columns) as u16;
            let card = Rect {
                x: area.x + col * CARD_WIDTH,
                y: area.y + row * CARD_HEIGHT,
                width: CARD_WIDTH.min(area.width),
                height: CARD_HEIGHT.min(area.height),
            };
            if card.bottom() > area.bottom() || card.right() > area.right() {
                continue;
            }
            render_card(frame, card, entry);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_for_narrow_terminal() {
        let grid = ListingGrid::for_area(Rect::new(0, 0, 10, 2));
        assert_eq!(grid, ListingGrid::default());

        let grid = ListingGrid::for_area(Rect::new(0, 0, CARD_WIDTH * 3 + 5, CARD_HEIGHT * 3));
        assert_eq!(grid.columns, 3);
        assert_eq!(grid.visible_rows, 3);
    }

    #[test]
    fn test_grid_clamp() {
        // 25 entries in 4 columns = 7 rows; 3 visible rows leave 4 scrollable
        let grid = ListingGrid {
            columns: 4,
            visible_rows: 3,
        };
        assert_eq!(grid.clamp(10, 25), 4);
        assert_eq!(grid.clamp(2, 25), 2);
        assert_eq!(grid.clamp(5, 3), 0);
    }

    #[test]
    fn test_grid_scroll_starts_from_shown_row() {
        let grid = ListingGrid {
            columns: 3,
            visible_rows: 5,
        };
        // 150 entries = 50 rows, last first-row is 45
        assert_eq!(grid.scrolled(0, 500, 150), 45);
        assert_eq!(grid.scrolled(120, -1, 150), 44);
        assert_eq!(grid.scrolled(2, -5, 150), 0);
    }
}
