use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph, Wrap},
};

use super::Component;
use crate::action::Action;
use crate::state::Entry;

const LABEL: Style = Style::new().fg(Color::DarkGray);

/// Name, types, sprite and stat lines of one entry.
pub struct EntryDetail;

pub struct EntryDetailProps<'a> {
    pub entry: &'a Entry,
    pub accent: Color,
}

impl EntryDetail {
    /// Rows needed to show `entry` without clipping (borders included).
    pub fn height_for(entry: &Entry) -> u16 {
        // id, types, sprite, blank, stats..., total, 2 borders
        (entry.stats.len() as u16) + 7
    }

    fn lines(entry: &Entry) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(vec![Span::styled("#", LABEL), Span::raw(format!("{:03}", entry.id))]),
            Line::from(vec![
                Span::styled("Type: ", LABEL),
                Span::raw(entry.types.join(", ")),
            ]),
            Line::from(vec![
                Span::styled("Sprite: ", LABEL),
                Span::raw(entry.sprite.clone().unwrap_or_else(|| "-".into())),
            ]),
            Line::default(),
        ];
        lines.extend(entry.stats.iter().map(|stat| {
            Line::from(vec![
                Span::styled(format!("{}: ", stat.name), LABEL),
                Span::raw(stat.value.to_string()),
            ])
        }));
        lines.push(Line::from(vec![
            Span::styled("Total: ", LABEL),
            Span::styled(
                entry.total().to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]));
        lines
    }
}

impl Component<Action> for EntryDetail {
    type Props<'a> = EntryDetailProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(props.accent))
            .title(Span::styled(
                format!(" {} ", props.entry.display_name()),
                Style::default()
                    .fg(props.accent)
                    .add_modifier(Modifier::BOLD),
            ));
        let paragraph = Paragraph::new(Self::lines(props.entry))
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}
