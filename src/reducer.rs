//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{
    AppState, ScreenState, Stage, MSG_PERMISSION_DENIED, MSG_POSITION_FAILED, MSG_WEATHER_FAILED,
};

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Screen actions =====
        Action::ScreenActivate => {
            if state.stage.in_flight() {
                return DispatchResult::unchanged();
            }
            state.screen = ScreenState::Loading;
            state.stage = Stage::Permission;
            state.position = None;
            state.spinner_tick = 0;
            DispatchResult::changed_with(Effect::RequestPermission)
        }

        // ===== Location actions =====
        Action::LocationPermissionDidGrant => {
            if state.stage != Stage::Permission {
                return DispatchResult::unchanged();
            }
            state.stage = Stage::Position;
            DispatchResult::changed_with(Effect::FixPosition)
        }

        Action::LocationPermissionDidDeny => {
            if state.stage != Stage::Permission {
                return DispatchResult::unchanged();
            }
            finish(state, ScreenState::Error(MSG_PERMISSION_DENIED.into()))
        }

        Action::LocationDidFix(position) => {
            if state.stage != Stage::Position {
                return DispatchResult::unchanged();
            }
            let effect = Effect::FetchWeather {
                coordinates: position.coordinates,
                place: position.place.clone(),
            };
            state.position = Some(position);
            state.stage = Stage::Weather;
            DispatchResult::changed_with(effect)
        }

        Action::LocationDidError(_) => {
            if state.stage != Stage::Position {
                return DispatchResult::unchanged();
            }
            finish(state, ScreenState::Error(MSG_POSITION_FAILED.into()))
        }

        // ===== Weather actions =====
        Action::WeatherDidLoad(weather) => {
            if state.stage != Stage::Weather {
                return DispatchResult::unchanged();
            }
            finish(state, ScreenState::Ready(weather))
        }

        Action::WeatherDidFail => {
            if state.stage != Stage::Weather {
                return DispatchResult::unchanged();
            }
            finish(state, ScreenState::Error(MSG_WEATHER_FAILED.into()))
        }

        // ===== UI actions =====
        Action::UiToggleClock => {
            state.clock = state.clock.toggle();
            DispatchResult::changed()
        }

        // ===== Global actions =====
        Action::Tick => {
            if state.screen.is_loading() {
                state.spinner_tick = state.spinner_tick.wrapping_add(1);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

fn finish(state: &mut AppState, screen: ScreenState) -> DispatchResult<Effect> {
    state.screen = screen;
    state.stage = Stage::Done;
    DispatchResult::changed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Coordinates, Position, WeatherSnapshot};
    use crate::time::ClockStyle;

    fn paris() -> Position {
        Position {
            coordinates: Coordinates::new(48.8566, 2.3522),
            place: Some("Paris".into()),
        }
    }

    #[test]
    fn test_activate_requests_permission() {
        let mut state = AppState::default();
        state.spinner_tick = 9;

        let result = reducer(&mut state, Action::ScreenActivate);

        assert!(result.changed);
        assert!(state.screen.is_loading());
        assert_eq!(state.stage, Stage::Permission);
        assert_eq!(state.spinner_tick, 0);
        assert_eq!(result.effects.len(), 1);
        assert!(matches!(result.effects[0], Effect::RequestPermission));
    }

    #[test]
    fn test_activate_ignored_while_in_flight() {
        let mut state = AppState {
            stage: Stage::Position,
            ..Default::default()
        };

        let result = reducer(&mut state, Action::ScreenActivate);

        assert!(!result.changed);
        assert!(result.effects.is_empty());
        assert_eq!(state.stage, Stage::Position);
    }

    #[test]
    fn test_denied_ends_without_fetch() {
        let mut state = AppState::default();
        reducer(&mut state, Action::ScreenActivate);

        let result = reducer(&mut state, Action::LocationPermissionDidDeny);

        assert!(result.changed);
        assert!(result.effects.is_empty());
        assert_eq!(state.screen.error(), Some(MSG_PERMISSION_DENIED));
        assert_eq!(state.stage, Stage::Done);
    }

    #[test]
    fn test_fix_emits_fetch_with_place() {
        let mut state = AppState {
            stage: Stage::Position,
            ..Default::default()
        };

        let result = reducer(&mut state, Action::LocationDidFix(paris()));

        assert!(result.changed);
        assert_eq!(state.stage, Stage::Weather);
        assert_eq!(state.position, Some(paris()));
        match &result.effects[..] {
            [Effect::FetchWeather { coordinates, place }] => {
                assert_eq!(*coordinates, Coordinates::new(48.8566, 2.3522));
                assert_eq!(place.as_deref(), Some("Paris"));
            }
            other => panic!("unexpected effects: {other:?}"),
        }
    }

    #[test]
    fn test_position_error_is_terminal() {
        let mut state = AppState {
            stage: Stage::Position,
            ..Default::default()
        };

        reducer(&mut state, Action::LocationDidError("timeout".into()));

        assert_eq!(state.screen.error(), Some(MSG_POSITION_FAILED));
        assert_eq!(state.stage, Stage::Done);
    }

    #[test]
    fn test_weather_fail_is_terminal() {
        let mut state = AppState {
            stage: Stage::Weather,
            ..Default::default()
        };

        reducer(&mut state, Action::WeatherDidFail);

        assert_eq!(state.screen.error(), Some(MSG_WEATHER_FAILED));
        assert_eq!(state.stage, Stage::Done);
    }

    #[test]
    fn test_stale_results_ignored() {
        let mut state = AppState {
            screen: ScreenState::Error(MSG_PERMISSION_DENIED.into()),
            stage: Stage::Done,
            ..Default::default()
        };

        for action in [
            Action::LocationPermissionDidGrant,
            Action::LocationDidFix(paris()),
            Action::WeatherDidLoad(WeatherSnapshot::default()),
            Action::WeatherDidFail,
        ] {
            let result = reducer(&mut state, action);
            assert!(!result.changed);
            assert!(result.effects.is_empty());
        }
        assert_eq!(state.screen.error(), Some(MSG_PERMISSION_DENIED));
    }

    #[test]
    fn test_reactivate_from_error() {
        let mut state = AppState {
            screen: ScreenState::Error(MSG_WEATHER_FAILED.into()),
            stage: Stage::Done,
            position: Some(paris()),
            ..Default::default()
        };

        let result = reducer(&mut state, Action::ScreenActivate);

        assert!(result.changed);
        assert!(state.screen.is_loading());
        assert_eq!(state.position, None);
        assert_eq!(state.stage, Stage::Permission);
    }

    #[test]
    fn test_toggle_clock() {
        let mut state = AppState::default();
        assert_eq!(state.clock, ClockStyle::TwentyFourHour);

        reducer(&mut state, Action::UiToggleClock);
        assert_eq!(state.clock, ClockStyle::TwelveHour);

        reducer(&mut state, Action::UiToggleClock);
        assert_eq!(state.clock, ClockStyle::TwentyFourHour);
    }

    #[test]
    fn test_tick_only_while_loading() {
        let mut state = AppState::default();
        let result = reducer(&mut state, Action::Tick);
        assert!(result.changed);
        assert_eq!(state.spinner_tick, 1);

        state.screen = ScreenState::Ready(WeatherSnapshot::default());
        let result = reducer(&mut state, Action::Tick);
        assert!(!result.changed);
        assert_eq!(state.spinner_tick, 1);
    }
}
