use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, BorderType, Paragraph},
};

use super::{Component, EntryDetail, EntryDetailProps};
use crate::action::Action;
use crate::dex::{BattleChart, ChartSide};
use crate::state::Battle;

const BAR_GAP: u16 = 4;
const LEFT_COLOR: Color = Color::Blue;
const RIGHT_COLOR: Color = Color::Red;

fn side_color(side: ChartSide) -> Color {
    match side {
        ChartSide::Left => LEFT_COLOR,
        ChartSide::Right => RIGHT_COLOR,
    }
}

/// Both fighters, the winner line, and the totals chart.
pub struct BattleView;

pub struct BattleViewProps<'a> {
    pub battle: Option<&'a Battle>,
    pub loading: bool,
}

fn chart_widget(chart: &BattleChart, area: Rect) -> BarChart<'static> {
    let inner_width = area.width.saturating_sub(2);
    let bar_width = (inner_width.saturating_sub(BAR_GAP) / 2).clamp(1, 24);

    let bars: Vec<Bar> = chart
        .datasets
        .iter()
        .map(|dataset| {
            Bar::default()
                .value(dataset.value)
                .label(Line::from(dataset.label.clone()))
                .text_value(dataset.value.to_string())
                .style(Style::default().fg(side_color(dataset.side)))
                .value_style(
                    Style::default()
                        .fg(Color::White)
                        .bg(side_color(dataset.side)),
                )
        })
        .collect();

    BarChart::default()
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(format!(" {} ", chart.category)),
        )
        .data(
            BarGroup::default()
                .label(Line::from(chart.category).alignment(Alignment::Center))
                .bars(&bars),
        )
        .bar_width(bar_width)
        .bar_gap(BAR_GAP)
        .max(chart.axis_max())
}

fn legend(chart: &BattleChart) -> Line<'static> {
    let mut spans = Vec::new();
    for (index, dataset) in chart.datasets.iter().enumerate() {
        if index > 0 {
            spans.push(Span::raw("   "));
        }
        spans.push(Span::styled(
            "■ ",
            Style::default().fg(side_color(dataset.side)),
        ));
        spans.push(Span::raw(dataset.label.clone()));
    }
    Line::from(spans).alignment(Alignment::Center)
}

impl Component<Action> for BattleView {
    type Props<'a> = BattleViewProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let Some(battle) = props.battle else {
            let message = if props.loading {
                "Drawing two fighters..."
            } else {
                "Press b to start a random battle."
            };
            let paragraph = Paragraph::new(message)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            frame.render_widget(paragraph, area);
            return;
        };

        let fighters_height =
            EntryDetail::height_for(&battle.left).max(EntryDetail::height_for(&battle.right));
        let [title_area, fighters_area, winner_area, chart_area, legend_area] =
            Layout::vertical([
                Constraint::Length(1),
                Constraint::Length(fighters_height),
                Constraint::Length(1),
                Constraint::Min(5),
                Constraint::Length(1),
            ])
            .areas(area);

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "Pokémon Battle!",
                Style::default().add_modifier(Modifier::BOLD),
            )))
            .alignment(Alignment::Center),
            title_area,
        );

        let [left_area, vs_area, right_area] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(4),
            Constraint::Fill(1),
        ])
        .areas(fighters_area);

        let mut detail = EntryDetail;
        detail.render(
            frame,
            left_area,
            EntryDetailProps {
                entry: &battle.left,
                accent: LEFT_COLOR,
            },
        );
        detail.render(
            frame,
            right_area,
            EntryDetailProps {
                entry: &battle.right,
                accent: RIGHT_COLOR,
            },
        );
        let [_, vs_line, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(vs_area);
        frame.render_widget(
            Paragraph::new("VS").alignment(Alignment::Center),
            vs_line,
        );

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::raw("Winner: "),
                Span::styled(
                    battle.outcome.label(),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
            ]))
            .alignment(Alignment::Center),
            winner_area,
        );

        let chart = BattleChart::from_battle(battle);
        frame.render_widget(chart_widget(&chart, chart_area), chart_area);
        frame.render_widget(Paragraph::new(legend(&chart)), legend_area);
    }
}
