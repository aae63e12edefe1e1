use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
};
use tui_dispatch::DataResource;

use super::{Component, EntryDetail, EntryDetailProps};
use crate::action::Action;
use crate::state::Entry;

pub const NOT_FOUND_MESSAGE: &str = "Pokémon not found. Please check the spelling and try again!";

/// Result slot of the last name lookup.
pub struct SearchView;

pub struct SearchViewProps<'a> {
    pub result: &'a DataResource<Entry>,
}

impl Component<Action> for SearchView {
    type Props<'a> = SearchViewProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        if let Some(entry) = props.result.data() {
            let [detail] =
                Layout::vertical([Constraint::Max(EntryDetail::height_for(entry))]).areas(area);
            let mut detail_view = EntryDetail;
            detail_view.render(
                frame,
                detail,
                EntryDetailProps {
                    entry,
                    accent: Color::Yellow,
                },
            );
            return;
        }

        let (message, style) = if props.result.is_failed() {
            (NOT_FOUND_MESSAGE, Style::default().fg(Color::Red))
        } else if props.result.is_loading() {
            ("Searching...", Style::default().fg(Color::DarkGray))
        } else {
            (
                "Press / to look up a Pokémon by name.",
                Style::default().fg(Color::DarkGray),
            )
        };
        let paragraph = Paragraph::new(message)
            .style(style)
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
    }
}
