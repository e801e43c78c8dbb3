//! Render tests using RenderHarness

use photocast::{
    components::{Component, HomeScreen, HomeScreenProps},
    state::{AppState, ScreenState, Stage, WeatherSnapshot, MSG_WEATHER_FAILED},
    time::{ClockStyle, ViewerZone},
};
use pretty_assertions::assert_eq;
use tui_dispatch::testing::*;

fn paris() -> WeatherSnapshot {
    WeatherSnapshot {
        name: "Paris".into(),
        temperature: 21.0,
        weather_code: 0,
        description: "clear sky".into(),
        sunrise: 1_700_000_000,
        sunset: 1_700_030_000,
        high: Some(23.0),
        low: Some(12.0),
    }
}

fn ready_state(clock: ClockStyle) -> AppState {
    AppState {
        screen: ScreenState::Ready(paris()),
        stage: Stage::Done,
        clock,
        zone: ViewerZone::UTC,
        ..Default::default()
    }
}

fn render(state: &AppState, width: u16, height: u16) -> String {
    let mut render = RenderHarness::new(width, height);
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
fn test_render_ready_screen() {
    let output = render(&ready_state(ClockStyle::TwentyFourHour), 60, 24);

    assert!(output.contains("Paris"), "Should show place:\n{output}");
    assert!(output.contains("21°C"), "Should show temperature:\n{output}");
    assert!(output.contains("clear sky"), "Should show description:\n{output}");
    assert!(output.contains("Sunrise: 22:13"), "Should show sunrise:\n{output}");
    assert!(output.contains("Sunset: 06:33"), "Should show sunset:\n{output}");
}

#[test]
fn test_render_ready_twelve_hour() {
    let output = render(&ready_state(ClockStyle::TwelveHour), 60, 24);

    assert!(output.contains("Sunrise: 10:13 PM"), "{output}");
    assert!(output.contains("Sunset: 06:33 AM"), "{output}");
}

#[test]
fn test_render_is_stable() {
    let state = ready_state(ClockStyle::TwentyFourHour);
    assert_eq!(render(&state, 60, 24), render(&state, 60, 24));
}

#[test]
fn test_render_loading_has_no_card() {
    let state = AppState {
        stage: Stage::Weather,
        ..Default::default()
    };

    let output = render(&state, 60, 24);

    assert!(output.contains("Fetching weather"), "{output}");
    assert!(!output.contains("Sunrise"));
}

#[test]
fn test_render_error_state() {
    let state = AppState {
        screen: ScreenState::Error(MSG_WEATHER_FAILED.into()),
        stage: Stage::Done,
        ..Default::default()
    };

    let output = render(&state, 50, 20);

    assert!(output.contains(MSG_WEATHER_FAILED), "Should show message");
    assert!(!output.contains("Sunrise"), "Error hides the card");
}

#[test]
fn test_render_help_bar() {
    let output = render(&AppState::default(), 80, 24);

    assert!(output.contains("reload"), "Should show reload hint");
    assert!(output.contains("clock"), "Should show clock hint");
    assert!(output.contains("quit"), "Should show quit hint");
}
