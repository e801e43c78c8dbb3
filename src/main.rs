//! PhotoCast - current weather for where you are

use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use photocast::action::Action;
use photocast::api::{self, WeatherClient};
use photocast::components::{Component, HomeScreen, HomeScreenProps};
use photocast::effect::{Effect, EffectRunner};
use photocast::location::{self, FixedLocator, IpLocator, Locator, PermissionStatus};
use photocast::logging;
use photocast::reducer::reducer;
use photocast::state::{AppState, Coordinates, Position, SPINNER_TICK_MS};
use photocast::time::{ClockStyle, ViewerZone};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::Rect};
use tracing::info;
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

/// PhotoCast - current weather for where you are
#[derive(Parser, Debug)]
#[command(name = "photocast")]
#[command(about = "Shows the current weather, sunrise and sunset for your location")]
struct Args {
    /// Latitude of a fixed position (skips the IP lookup)
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Longitude of a fixed position
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Place name shown for a fixed position
    #[arg(long, requires = "lat")]
    place: Option<String>,

    /// Refuse location access
    #[arg(long, env = "PHOTOCAST_NO_LOCATION")]
    no_location: bool,

    /// Clock style for sunrise and sunset
    #[arg(long, value_enum, default_value_t = ClockStyle::TwentyFourHour)]
    clock: ClockStyle,

    /// Open-Meteo base URL
    #[arg(long, env = "PHOTOCAST_WEATHER_URL", default_value = api::DEFAULT_BASE_URL)]
    weather_url: String,

    /// IP geolocation base URL
    #[arg(long, env = "PHOTOCAST_GEOIP_URL", default_value = location::DEFAULT_IP_LOOKUP_URL)]
    geoip_url: String,

    /// Log file (defaults to the user cache dir)
    #[arg(long, env = "PHOTOCAST_LOG")]
    log_file: Option<PathBuf>,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum PhotocastComponentId {
    Screen,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum PhotocastContext {
    Main,
}

impl EventRoutingState<PhotocastComponentId, PhotocastContext> for AppState {
    fn focused(&self) -> Option<PhotocastComponentId> {
        Some(PhotocastComponentId::Screen)
    }

    fn modal(&self) -> Option<PhotocastComponentId> {
        None
    }

    fn binding_context(&self, id: PhotocastComponentId) -> PhotocastContext {
        match id {
            PhotocastComponentId::Screen => PhotocastContext::Main,
        }
    }

    fn default_context(&self) -> PhotocastContext {
        PhotocastContext::Main
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        lat,
        lon,
        place,
        no_location,
        clock,
        weather_url,
        geoip_url,
        log_file,
        debug: debug_args,
    } = Args::parse();

    match logging::init(log_file) {
        Ok(log_path) => info!(log = %log_path.display(), "photocast starting"),
        Err(e) => eprintln!("photocast: logging disabled: {e}"),
    }

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let state = debug
        .load_state_or_else_async(move || async move {
            Ok::<AppState, io::Error>(AppState::new(clock, ViewerZone::Local))
        })
        .await
        .map_err(debug_error)?;

    let permission = if no_location {
        PermissionStatus::Denied
    } else {
        PermissionStatus::Granted
    };
    let locator: Arc<dyn Locator> = match (lat, lon) {
        (Some(lat), Some(lon)) => Arc::new(
            FixedLocator::new(Position {
                coordinates: Coordinates::new(lat, lon),
                place,
            })
            .with_permission(permission),
        ),
        _ => Arc::new(IpLocator::new(geoip_url, !no_location)),
    };
    let runner = EffectRunner::new(locator, WeatherClient::new(weather_url));

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, runner, replay_actions).await;

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

    info!("photocast exiting");
    Ok(())
}

struct PhotocastUi {
    screen: HomeScreen,
}

impl PhotocastUi {
    fn new() -> Self {
        Self { screen: HomeScreen }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<PhotocastComponentId>,
    ) {
        event_ctx.set_component_area(PhotocastComponentId::Screen, area);

        let props = HomeScreenProps {
            state,
            is_focused: render_ctx.is_focused(),
        };
        self.screen.render(frame, area, props);
    }

    fn handle_screen_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = HomeScreenProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self
            .screen
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
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    runner: EffectRunner,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(PhotocastUi::new()));
    let mut bus: EventBus<AppState, Action, PhotocastComponentId, PhotocastContext> =
        EventBus::new();
    let keybindings: Keybindings<PhotocastContext> = Keybindings::new();

    let ui_screen = Rc::clone(&ui);
    bus.register(PhotocastComponentId::Screen, move |event, state| {
        ui_screen
            .borrow_mut()
            .handle_screen_event(&event.kind, state)
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
            Some(Action::ScreenActivate),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }

                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(SPINNER_TICK_MS),
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
            move |effect, ctx| handle_effect(&runner, effect, ctx),
        )
        .await
}

/// Handle effects by spawning one task per step
fn handle_effect(runner: &EffectRunner, effect: Effect, ctx: &mut EffectContext<Action>) {
    let key = effect.task_key();
    let runner = runner.clone();
    ctx.tasks()
        .spawn(key, async move { runner.run(effect).await });
}
