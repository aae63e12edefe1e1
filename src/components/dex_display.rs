use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Layout};
use ratatui::prelude::{Frame, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::{
    BattleView, BattleViewProps, Component, ListingGrid, ListingView, ListingViewProps,
    RandomView, RandomViewProps, SearchView, SearchViewProps,
};
use crate::action::Action;
use crate::dex;
use crate::state::{AppState, View};

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// Props for DexDisplay - read-only view of state
pub struct DexDisplayProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// Header, the active view, and the key hints
#[derive(Default)]
pub struct DexDisplay {
    /// Listing grid as last rendered; scroll keys clamp against it
    grid: ListingGrid,
}

impl DexDisplay {
    fn scroll(&self, state: &AppState, delta: isize) -> Action {
        let row = self
            .grid
            .scrolled(state.listing_scroll, delta, state.listing.len());
        Action::ListingScrollTo(row)
    }

    fn page(&self) -> isize {
        self.grid.visible_rows.max(1) as isize
    }
}

fn header(state: &AppState) -> Line<'static> {
    let mut spans = vec![
        Span::styled(
            " Pokédex ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(state.view.title(), Style::default().fg(Color::Cyan)),
    ];
    if state.is_busy() {
        let frame = SPINNER[state.tick_count as usize % SPINNER.len()];
        spans.push(Span::styled(
            format!("  {frame} loading"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

impl Component<Action> for DexDisplay {
    type Props<'a> = DexDisplayProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }

        // Ids and shuffle seeds are drawn here; the reducer never touches an rng
        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Char('/') => Some(Action::SearchOpen),
                KeyCode::Char('s') => Some(Action::ListingShuffle {
                    seed: rand::random(),
                }),
                KeyCode::Char('r') => Some(Action::RandomFetch {
                    id: dex::draw_entry_id(&mut rand::thread_rng()),
                }),
                KeyCode::Char('b') => {
                    let (left, right) = dex::draw_battle_ids(&mut rand::thread_rng());
                    Some(Action::BattleFetch { left, right })
                }
                KeyCode::Char('l') | KeyCode::F(5) => Some(Action::ListingReload),
                KeyCode::Up | KeyCode::Char('k') => Some(self.scroll(props.state, -1)),
                KeyCode::Down | KeyCode::Char('j') => Some(self.scroll(props.state, 1)),
                KeyCode::PageUp => Some(self.scroll(props.state, -self.page())),
                KeyCode::PageDown => Some(self.scroll(props.state, self.page())),
                KeyCode::Home => Some(Action::ListingScrollTo(0)),
                KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: DexDisplayProps<'_>) {
        let state = props.state;
        let chunks = Layout::vertical([
            Constraint::Length(1), // Header
            Constraint::Length(1), // Spacer
            Constraint::Min(1),    // Active view
            Constraint::Length(1), // Help bar
        ])
        .split(area);

        frame.render_widget(Paragraph::new(header(state)), chunks[0]);

        let body = chunks[2];
        self.grid = ListingGrid::for_area(body);
        match state.view {
            View::Listing => ListingView.render(
                frame,
                body,
                ListingViewProps {
                    entries: &state.listing,
                    scroll: state.listing_scroll,
                    loading: state.listing_loading,
                },
            ),
            View::Search => SearchView.render(
                frame,
                body,
                SearchViewProps {
                    result: &state.search,
                },
            ),
            View::Random => RandomView.render(
                frame,
                body,
                RandomViewProps {
                    pick: state.random.as_ref(),
                    loading: state.random_loading,
                },
            ),
            View::Battle => BattleView.render(
                frame,
                body,
                BattleViewProps {
                    battle: state.battle.as_ref(),
                    loading: state.battle_loading,
                },
            ),
        }

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            chunks[3],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("/", "search"),
                    StatusBarHint::new("s", "shuffle"),
                    StatusBarHint::new("r", "random"),
                    StatusBarHint::new("b", "battle"),
                    StatusBarHint::new("l", "reload"),
                    StatusBarHint::new("q", "quit"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reducer::reducer;
    use crate::state::{Entry, Stat};
    use crossterm::event::{KeyEvent, KeyModifiers};
    use tui_dispatch::DataResource;
    use tui_dispatch::testing::*;

    fn events(keys: &str, is_focused: bool) -> Vec<Action> {
        let mut component = DexDisplay::default();
        let state = AppState::default();
        let props = DexDisplayProps {
            state: &state,
            is_focused,
        };
        component
            .handle_event(&EventKind::Key(key(keys)), props)
            .into_iter()
            .collect()
    }

    #[test]
    fn test_handle_event_search_and_quit() {
        let actions = events("/", true);
        actions.assert_count(1);
        actions.assert_first(Action::SearchOpen);

        events("q", true).assert_first(Action::Quit);
        events("l", true).assert_first(Action::ListingReload);
    }

    #[test]
    fn test_handle_event_random_id_in_range() {
        for _ in 0..50 {
            let actions = events("r", true);
            match actions.as_slice() {
                [Action::RandomFetch { id }] => {
                    assert!((1..=dex::MAX_ENTRY_ID).contains(id));
                }
                other => panic!("unexpected actions: {other:?}"),
            }
        }
    }

    #[test]
    fn test_handle_event_battle_draws_two_ids() {
        let actions = events("b", true);
        match actions.as_slice() {
            [Action::BattleFetch { left, right }] => {
                assert!((1..=dex::MAX_ENTRY_ID).contains(left));
                assert!((1..=dex::MAX_ENTRY_ID).contains(right));
            }
            other => panic!("unexpected actions: {other:?}"),
        }
    }

    #[test]
    fn test_handle_event_shuffle() {
        let actions = events("s", true);
        assert!(matches!(
            actions.as_slice(),
            [Action::ListingShuffle { .. }]
        ));
    }

    #[test]
    fn test_handle_event_unfocused_ignores() {
        events("r", false).assert_empty();
    }

    #[test]
    fn test_render_header_spinner_while_loading() {
        let mut render = RenderHarness::new(80, 20);
        let mut component = DexDisplay::default();
        let state = AppState {
            listing_loading: true,
            ..Default::default()
        };

        let output = render.render_to_string_plain(|frame| {
            let props = DexDisplayProps {
                state: &state,
                is_focused: true,
            };
            component.render(frame, frame.area(), props);
        });

        assert!(output.contains("Pokédex"));
        assert!(output.contains("loading"));
        assert!(output.contains("Loading Pokédex..."));
    }

    #[test]
    fn test_render_follows_view_tag() {
        let mut render = RenderHarness::new(80, 24);
        let mut component = DexDisplay::default();
        let state = AppState {
            view: View::Search,
            search: DataResource::Loaded(Entry {
                id: 25,
                name: "pikachu".into(),
                sprite: None,
                types: vec!["electric".into()],
                stats: vec![Stat {
                    name: "speed".into(),
                    value: 90,
                }],
            }),
            listing: vec![Entry {
                id: 1,
                name: "bulbasaur".into(),
                sprite: None,
                types: vec!["grass".into()],
                stats: Vec::new(),
            }],
            ..Default::default()
        };

        let output = render.render_to_string_plain(|frame| {
            let props = DexDisplayProps {
                state: &state,
                is_focused: true,
            };
            component.render(frame, frame.area(), props);
        });

        assert!(output.contains("PIKACHU"));
        assert!(!output.contains("BULBASAUR"));
    }

    fn card(id: u32) -> Entry {
        Entry {
            id,
            name: format!("mon-{id}"),
            sprite: None,
            types: vec!["normal".into()],
            stats: Vec::new(),
        }
    }

    fn draw(render: &mut RenderHarness, component: &mut DexDisplay, state: &AppState) -> String {
        render.render_to_string_plain(|frame| {
            let props = DexDisplayProps {
                state,
                is_focused: true,
            };
            component.render(frame, frame.area(), props);
        })
    }

    fn press(component: &mut DexDisplay, state: &mut AppState, code: KeyCode) {
        let event = EventKind::Key(KeyEvent::new(code, KeyModifiers::NONE));
        let actions: Vec<_> = {
            let props = DexDisplayProps {
                state: &*state,
                is_focused: true,
            };
            component.handle_event(&event, props).into_iter().collect()
        };
        for action in actions {
            reducer(state, action);
        }
    }

    #[test]
    fn test_scroll_up_from_bottom_moves_grid() {
        let mut render = RenderHarness::new(80, 24);
        let mut component = DexDisplay::default();
        let mut state = AppState {
            listing: (1..=150).map(card).collect(),
            ..Default::default()
        };
        let top = draw(&mut render, &mut component, &state);

        for _ in 0..200 {
            press(&mut component, &mut state, KeyCode::Down);
        }
        let bottom = draw(&mut render, &mut component, &state);
        // 3 columns, 5 visible rows, 50 rows in total
        assert_eq!(state.listing_scroll, 45);
        assert_ne!(top, bottom);
        assert!(bottom.contains("#150"));

        press(&mut component, &mut state, KeyCode::Up);
        let after_up = draw(&mut render, &mut component, &state);
        assert_eq!(state.listing_scroll, 44);
        assert_ne!(bottom, after_up);
        assert!(!after_up.contains("#150"));
    }

    #[test]
    fn test_page_keys_step_by_visible_rows() {
        let mut render = RenderHarness::new(80, 24);
        let mut component = DexDisplay::default();
        let mut state = AppState {
            listing: (1..=150).map(card).collect(),
            ..Default::default()
        };
        draw(&mut render, &mut component, &state);

        press(&mut component, &mut state, KeyCode::PageDown);
        assert_eq!(state.listing_scroll, 5);
        for _ in 0..20 {
            press(&mut component, &mut state, KeyCode::PageDown);
        }
        assert_eq!(state.listing_scroll, 45);
        press(&mut component, &mut state, KeyCode::PageUp);
        assert_eq!(state.listing_scroll, 40);
        press(&mut component, &mut state, KeyCode::Home);
        assert_eq!(state.listing_scroll, 0);
    }
}
