//! Pokédex Arena - browse, search, draw and battle Pokémon in the terminal

use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use pokedex_arena::action::Action;
use pokedex_arena::api::{API_BASE, Catalogue};
use pokedex_arena::components::{
    Component, DexDisplay, DexDisplayProps, SearchOverlay, SearchOverlayProps,
};
use pokedex_arena::effect::Effect;
use pokedex_arena::logging;
use pokedex_arena::reducer::reducer;
use pokedex_arena::state::{AppState, DEFAULT_LISTING_LIMIT, LOADING_TICK_MS};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::Rect};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext,
};
use tui_dispatch_components::centered_rect;
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

/// Pokédex Arena - a Pokémon catalogue and stat battles in the terminal
#[derive(Parser, Debug)]
#[command(name = "pokedex-arena")]
#[command(about = "Browse, search, draw and battle Pokémon from the PokéAPI")]
struct Args {
    /// Base URL of the PokéAPI
    #[arg(long, default_value = API_BASE)]
    api_base: String,

    /// Number of entries in the listing (minimum 1)
    #[arg(long, default_value_t = DEFAULT_LISTING_LIMIT as u64, value_parser = clap::value_parser!(u64).range(1..))]
    listing_limit: u64,

    /// Log file (defaults to the user cache directory)
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum DexComponentId {
    Display,
    Search,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum DexContext {
    Main,
    Search,
}

impl EventRoutingState<DexComponentId, DexContext> for AppState {
    fn focused(&self) -> Option<DexComponentId> {
        if self.search_mode {
            Some(DexComponentId::Search)
        } else {
            Some(DexComponentId::Display)
        }
    }

    fn modal(&self) -> Option<DexComponentId> {
        if self.search_mode {
            Some(DexComponentId::Search)
        } else {
            None
        }
    }

    fn binding_context(&self, id: DexComponentId) -> DexContext {
        match id {
            DexComponentId::Display => DexContext::Main,
            DexComponentId::Search => DexContext::Search,
        }
    }

    fn default_context(&self) -> DexContext {
        DexContext::Main
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        api_base,
        listing_limit,
        log_file,
        debug: debug_args,
    } = Args::parse();
    let listing_limit = usize::try_from(listing_limit).unwrap_or(DEFAULT_LISTING_LIMIT);

    let log_path = log_file.unwrap_or_else(logging::default_log_path);
    if logging::init(&log_path) {
        tracing::info!(api_base = %api_base, listing_limit, "starting");
    }

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let state = debug
        .load_state_or_else_async(move || async move {
            Ok::<AppState, io::Error>(AppState::new(listing_limit))
        })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);
    let catalogue = Catalogue::http(api_base);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, catalogue, replay_actions).await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    tracing::info!("exiting");
    Ok(())
}

struct DexUi {
    display: DexDisplay,
    search: SearchOverlay,
}

impl DexUi {
    fn new() -> Self {
        Self {
            display: DexDisplay::default(),
            search: SearchOverlay::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<DexComponentId>,
    ) {
        event_ctx.set_component_area(DexComponentId::Display, area);

        let props = DexDisplayProps {
            state,
            is_focused: render_ctx.is_focused() && !state.search_mode,
        };
        self.display.render(frame, area, props);

        self.search.set_open(state.search_mode);
        if state.search_mode {
            let modal_area = centered_rect(60, 8, area);
            event_ctx.set_component_area(DexComponentId::Search, modal_area);
            let props = SearchOverlayProps {
                input: &state.search_input,
                is_focused: render_ctx.is_focused(),
                on_change: Action::SearchInputChange,
                on_submit: Action::SearchSubmit,
            };
            self.search.render(frame, area, props);
        } else {
            event_ctx.component_areas.remove(&DexComponentId::Search);
        }
    }

    fn handle_display_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = DexDisplayProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self
            .display
            .handle_event(event, props)
            .into_iter()
            .collect();
        if actions.is_empty() {
            HandlerResponse::ignored()
        } else {
            HandlerResponse {
                actions,
                consumed: true,
                needs_render: false,
            }
        }
    }

    fn handle_search_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        self.search.set_open(state.search_mode);
        let props = SearchOverlayProps {
            input: &state.search_input,
            is_focused: true,
            on_change: Action::SearchInputChange,
            on_submit: Action::SearchSubmit,
        };
        let actions: Vec<_> = self.search.handle_event(event, props).into_iter().collect();
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    catalogue: Catalogue,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(DexUi::new()));
    let mut bus: EventBus<AppState, Action, DexComponentId, DexContext> = EventBus::new();
    let keybindings: Keybindings<DexContext> = Keybindings::new();

    let ui_display = Rc::clone(&ui);
    bus.register(DexComponentId::Display, move |event, state| {
        ui_display
            .borrow_mut()
            .handle_display_event(&event.kind, state)
    });

    let ui_search = Rc::clone(&ui);
    bus.register(DexComponentId::Search, move |event, state| {
        ui_search
            .borrow_mut()
            .handle_search_event(&event.kind, state)
    });

    // Re-render on terminal resize (no action needed, just redraw)
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::Init),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }

                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(LOADING_TICK_MS),
                    || Action::Tick,
                );
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            move |effect, ctx| handle_effect(effect, ctx, &catalogue),
        )
        .await
}

/// Handle effects by spawning one task per request kind
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>, catalogue: &Catalogue) {
    let catalogue = catalogue.clone();
    match effect {
        Effect::LoadListing { token, limit } => {
            ctx.tasks().spawn("listing", async move {
                match catalogue.load_listing(limit).await {
                    Ok(entries) => Action::ListingDidLoad { token, entries },
                    Err(err) => {
                        tracing::error!(%err, limit, "listing failed");
                        Action::ListingDidError {
                            token,
                            error: err.to_string(),
                        }
                    }
                }
            });
        }
        Effect::SearchEntry { token, name } => {
            ctx.tasks().spawn("search", async move {
                match catalogue.entry_by_name(&name).await {
                    Ok(entry) => Action::SearchDidLoad { token, entry },
                    Err(err) => {
                        tracing::error!(%err, name = %name, "search failed");
                        Action::SearchDidError {
                            token,
                            error: err.to_string(),
                        }
                    }
                }
            });
        }
        Effect::LoadRandom { token, id } => {
            ctx.tasks().spawn("random", async move {
                match catalogue.random_pick(id).await {
                    Ok(pick) => Action::RandomDidLoad { token, pick },
                    Err(err) => {
                        tracing::error!(%err, id, "random pick failed");
                        Action::RandomDidError {
                            token,
                            error: err.to_string(),
                        }
                    }
                }
            });
        }
        Effect::LoadBattle { token, left, right } => {
            ctx.tasks().spawn("battle", async move {
                match catalogue.battle_pair(left, right).await {
                    Ok((left, right)) => Action::BattleDidLoad { token, left, right },
                    Err(err) => {
                        tracing::error!(%err, left, right, "battle failed");
                        Action::BattleDidError {
                            token,
                            error: err.to_string(),
                        }
                    }
                }
            });
        }
    }
}
