use artbox::{
    Alignment as ArtAlignment, Color as ArtColor, Fill, LinearGradient, Renderer, fonts,
    integrations::ratatui::ArtBox,
};
use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Frame, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::{Component, SunTimes, SunTimesProps, WeatherCard, WeatherCardProps};
use crate::action::Action;
use crate::state::{AppState, ScreenState, WeatherSnapshot};

pub const TITLE: &str = "PhotoCast";
pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Banner rows: miniwi(4), falling back to plain text.
const TITLE_HEIGHT: u16 = 4;

/// Props for HomeScreen - read-only view of state
pub struct HomeScreenProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// The weather screen: loading, error or the card with sun times
#[derive(Default)]
pub struct HomeScreen;

impl Component<Action> for HomeScreen {
    type Props<'a> = HomeScreenProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }

        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Char('r') | KeyCode::F(5) => Some(Action::ScreenActivate),
                KeyCode::Char('c') => Some(Action::UiToggleClock),
                KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: HomeScreenProps<'_>) {
        let chunks = Layout::vertical([
            Constraint::Min(1),    // Main content
            Constraint::Length(1), // Help bar
        ])
        .split(area);

        let state = props.state;
        match &state.screen {
            ScreenState::Loading => render_loading(frame, chunks[0], state),
            ScreenState::Error(message) => render_error(frame, chunks[0], message),
            ScreenState::Ready(weather) => render_ready(frame, chunks[0], state, weather),
        }

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            chunks[1],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("r", "reload"),
                    StatusBarHint::new("c", "clock"),
                    StatusBarHint::new("q", "quit"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}

fn render_loading(frame: &mut Frame, area: Rect, state: &AppState) {
    let [line_area] = Layout::vertical([Constraint::Length(1)])
        .flex(Flex::Center)
        .areas(area);

    let spinner = SPINNER_FRAMES[state.spinner_tick as usize % SPINNER_FRAMES.len()];
    let line = Line::from(vec![
        Span::styled(spinner, Style::default().fg(Color::Cyan)),
        Span::styled(
            format!(" {}...", state.stage.status()),
            Style::default().fg(Color::DarkGray),
        ),
    ])
    .centered();
    frame.render_widget(Paragraph::new(line), line_area);
}

fn render_error(frame: &mut Frame, area: Rect, message: &str) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // message
        Constraint::Length(1), // blank
        Constraint::Length(1), // hint
    ])
    .flex(Flex::Center)
    .split(area);

    frame.render_widget(
        Paragraph::new(
            Line::from(Span::styled(
                message.to_string(),
                Style::default().fg(Color::Red),
            ))
            .centered(),
        ),
        chunks[0],
    );
    frame.render_widget(
        Paragraph::new(
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::DarkGray)),
                Span::styled("r", Style::default().fg(Color::Cyan).bold()),
                Span::styled(" to try again", Style::default().fg(Color::DarkGray)),
            ])
            .centered(),
        ),
        chunks[2],
    );
}

fn render_ready(frame: &mut Frame, area: Rect, state: &AppState, weather: &WeatherSnapshot) {
    let chunks = Layout::vertical([
        Constraint::Max(TITLE_HEIGHT),
        Constraint::Length(1),
        Constraint::Length(WeatherCard::HEIGHT),
        Constraint::Length(1),
        Constraint::Length(SunTimes::HEIGHT),
    ])
    .flex(Flex::Center)
    .split(area);

    let renderer = Renderer::new(fonts::stack(&["miniwi"]))
        .with_plain_fallback()
        .with_alignment(ArtAlignment::Center)
        .with_fill(title_gradient());
    frame.render_widget(ArtBox::new(&renderer, TITLE), chunks[0]);

    let mut card = WeatherCard;
    card.render(
        frame,
        chunks[2],
        WeatherCardProps {
            name: &weather.name,
            temperature: weather.temperature,
            description: &weather.description,
            high: weather.high,
            low: weather.low,
        },
    );

    let mut sun = SunTimes;
    sun.render(
        frame,
        chunks[4],
        SunTimesProps {
            sunrise: weather.sunrise,
            sunset: weather.sunset,
            zone: state.zone,
            clock: state.clock,
        },
    );
}

fn title_gradient() -> Fill {
    Fill::Linear(LinearGradient::horizontal(
        ArtColor::rgb(255, 180, 80),
        ArtColor::rgb(255, 120, 160),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Stage, MSG_PERMISSION_DENIED};
    use tui_dispatch::testing::*;

    fn render(state: &AppState) -> String {
        let mut render = RenderHarness::new(60, 24);
        let mut component = HomeScreen;
        render.render_to_string_plain(|frame| {
            let props = HomeScreenProps {
                state,
                is_focused: true,
            };
            component.render(frame, frame.area(), props);
        })
    }

    #[test]
    fn test_handle_event_reload() {
        let mut component = HomeScreen;
        let state = AppState::default();
        let props = HomeScreenProps {
            state: &state,
            is_focused: true,
        };

        let actions: Vec<_> = component
            .handle_event(&EventKind::Key(key("r")), props)
            .into_iter()
            .collect();
        actions.assert_count(1);
        actions.assert_first(Action::ScreenActivate);
    }

    #[test]
    fn test_handle_event_clock() {
        let mut component = HomeScreen;
        let state = AppState::default();
        let props = HomeScreenProps {
            state: &state,
            is_focused: true,
        };

        let actions: Vec<_> = component
            .handle_event(&EventKind::Key(key("c")), props)
            .into_iter()
            .collect();
        actions.assert_first(Action::UiToggleClock);
    }

    #[test]
    fn test_handle_event_unfocused_ignores() {
        let mut component = HomeScreen;
        let state = AppState::default();
        let props = HomeScreenProps {
            state: &state,
            is_focused: false,
        };

        let actions: Vec<_> = component
            .handle_event(&EventKind::Key(key("q")), props)
            .into_iter()
            .collect();
        actions.assert_empty();
    }

    #[test]
    fn test_render_loading_shows_stage() {
        let state = AppState {
            stage: Stage::Position,
            spinner_tick: 3,
            ..Default::default()
        };

        let output = render(&state);

        assert!(output.contains("Finding your location"), "{output}");
        assert!(output.contains(SPINNER_FRAMES[3]), "{output}");
    }

    #[test]
    fn test_render_error_message() {
        let state = AppState {
            screen: ScreenState::Error(MSG_PERMISSION_DENIED.into()),
            stage: Stage::Done,
            ..Default::default()
        };

        let output = render(&state);

        assert!(output.contains(MSG_PERMISSION_DENIED));
        assert!(output.contains("try again"));
    }
}
