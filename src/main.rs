use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Frame, Terminal};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext, TaskKey,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem};

use dexview::action::Action;
use dexview::api;
use dexview::components::{
    Component, DetailScreen, DetailScreenProps, ListScreen, ListScreenProps,
};
use dexview::effect::Effect;
use dexview::reducer::reducer;
use dexview::state::{AppState, Route, HIGHLIGHT_CLEAR_MS, LOADING_TICK_MS};

#[derive(Parser, Debug)]
#[command(name = "dexview")]
#[command(about = "Pokedex catalog browser TUI")]
struct Args {
    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum DexComponentId {
    List,
    Detail,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum DexContext {
    List,
    Detail,
}

impl EventRoutingState<DexComponentId, DexContext> for AppState {
    fn focused(&self) -> Option<DexComponentId> {
        match self.route {
            Route::List => Some(DexComponentId::List),
            Route::Detail => Some(DexComponentId::Detail),
        }
    }

    fn modal(&self) -> Option<DexComponentId> {
        None
    }

    fn binding_context(&self, id: DexComponentId) -> DexContext {
        match id {
            DexComponentId::List => DexContext::List,
            DexComponentId::Detail => DexContext::Detail,
        }
    }

    fn default_context(&self) -> DexContext {
        DexContext::List
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    let debug = DebugSession::new(args.debug);

    let state = debug
        .load_state_or_else_async(|| async { Ok::<AppState, io::Error>(AppState::default()) })
        .await
        .map_err(debug_error)?;
    let replay_actions = debug.load_replay_items().map_err(debug_error)?;
    let (middleware, recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions).await;

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
    debug.save_actions(recorder.as_ref()).map_err(debug_error)?;
    Ok(())
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

struct DexUi {
    list: ListScreen,
    detail: DetailScreen,
}

impl DexUi {
    fn new() -> Self {
        Self {
            list: ListScreen::new(),
            detail: DetailScreen::new(),
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
        match state.route {
            Route::List => {
                event_ctx.set_component_area(DexComponentId::List, area);
                event_ctx.component_areas.remove(&DexComponentId::Detail);
                self.list.render(
                    frame,
                    area,
                    ListScreenProps {
                        state,
                        is_focused: render_ctx.is_focused(),
                    },
                );
            }
            Route::Detail => {
                event_ctx.set_component_area(DexComponentId::Detail, area);
                event_ctx.component_areas.remove(&DexComponentId::List);
                self.detail.render(
                    frame,
                    area,
                    DetailScreenProps {
                        state,
                        is_focused: render_ctx.is_focused(),
                    },
                );
            }
        }
    }

    fn handle_list_event(&mut self, event: &EventKind, state: &AppState) -> HandlerResponse<Action> {
        let actions: Vec<_> = self
            .list
            .handle_event(
                event,
                ListScreenProps {
                    state,
                    is_focused: true,
                },
            )
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

    fn handle_detail_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let actions: Vec<_> = self
            .detail
            .handle_event(
                event,
                DetailScreenProps {
                    state,
                    is_focused: true,
                },
            )
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
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(DexUi::new()));
    let mut bus: EventBus<AppState, Action, DexComponentId, DexContext> = EventBus::new();
    let keybindings: Keybindings<DexContext> = Keybindings::new();

    let ui_list = Rc::clone(&ui);
    bus.register(DexComponentId::List, move |event, state| {
        ui_list.borrow_mut().handle_list_event(&event.kind, state)
    });

    let ui_detail = Rc::clone(&ui);
    bus.register(DexComponentId::Detail, move |event, state| {
        ui_detail
            .borrow_mut()
            .handle_detail_event(&event.kind, state)
    });

    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(width, height) => {
            HandlerResponse::action(Action::UiTerminalResize(width, height)).with_render()
        }
        EventKind::Key(key) => match key.code {
            crossterm::event::KeyCode::Char('q') => HandlerResponse::action(Action::Quit),
            _ => HandlerResponse::ignored(),
        },
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
                runtime
                    .subscriptions()
                    .interval("tick", Duration::from_millis(LOADING_TICK_MS), || {
                        Action::Tick
                    });
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            handle_effect,
        )
        .await
}

/// Handle effects by spawning tasks
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>) {
    match effect {
        Effect::FetchList { limit, offset } => {
            ctx.tasks().spawn(TaskKey::new("list"), async move {
                match api::fetch_list(limit, offset).await {
                    Ok(entries) => Action::ListDidLoad(entries),
                    Err(err) => Action::ListDidError(err.to_string()),
                }
            });
        }
        Effect::FetchDetails { name } => {
            let key = format!("detail_{name}");
            ctx.tasks().spawn(TaskKey::new(key), async move {
                match api::fetch_details(&name).await {
                    Ok(details) => Action::DetailDidLoad { name, details },
                    Err(err) => Action::DetailDidError {
                        name,
                        error: err.to_string(),
                    },
                }
            });
        }
        Effect::ScheduleHighlightClear => {
            ctx.tasks().spawn(TaskKey::new("highlight_clear"), async {
                tokio::time::sleep(Duration::from_millis(HIGHLIGHT_CLEAR_MS)).await;
                Action::HighlightExpired
            });
        }
        Effect::CancelHighlightClear => {
            ctx.tasks().cancel(&TaskKey::new("highlight_clear"));
        }
    }
}
