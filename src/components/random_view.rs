use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph, Wrap},
};

use super::{Component, EntryDetail, EntryDetailProps};
use crate::action::Action;
use crate::state::{Move, RandomPick};

/// Random pick detail plus its move list.
pub struct RandomView;

pub struct RandomViewProps<'a> {
    pub pick: Option<&'a RandomPick>,
    pub loading: bool,
}

fn move_line(mv: &Move) -> Line<'static> {
    let name = Span::styled(
        mv.name.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    );
    match &mv.description {
        Some(description) => Line::from(vec![name, Span::raw(format!(" - {description}"))]),
        None => Line::from(name),
    }
}

impl Component<Action> for RandomView {
    type Props<'a> = RandomViewProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let Some(pick) = props.pick else {
            let message = if props.loading {
                "Drawing a random Pokémon..."
            } else {
                "Press r to draw a random Pokémon."
            };
            let paragraph = Paragraph::new(message)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            frame.render_widget(paragraph, area);
            return;
        };

        let [detail_area, moves_area] = Layout::vertical([
            Constraint::Length(EntryDetail::height_for(&pick.entry)),
            Constraint::Min(3),
        ])
        .areas(area);

        let mut detail = EntryDetail;
        detail.render(
            frame,
            detail_area,
            EntryDetailProps {
                entry: &pick.entry,
                accent: Color::Magenta,
            },
        );

        let lines: Vec<Line> = if pick.moves.is_empty() {
            vec![Line::from(Span::styled(
                "No moves known.",
                Style::default().fg(Color::DarkGray),
            ))]
        } else {
            pick.moves.iter().map(move_line).collect()
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Moves ");
        let moves = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(moves, moves_area);
    }
}
