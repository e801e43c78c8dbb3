use ratatui::{
    layout::{Constraint, Layout},
    prelude::{Frame, Rect},
    style::{Color, Style},
    text::Line,
    widgets::Paragraph,
};

use super::Component;
use crate::action::Action;
use crate::time::{ClockStyle, ViewerZone};

/// Sunrise and sunset times
pub struct SunTimes;

pub struct SunTimesProps {
    pub sunrise: i64,
    pub sunset: i64,
    pub zone: ViewerZone,
    pub clock: ClockStyle,
}

impl SunTimes {
    pub const HEIGHT: u16 = 2;
}

impl Component<Action> for SunTimes {
    type Props<'a> = SunTimesProps;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chunks = Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).split(area);
        let style = Style::default().fg(Color::White);

        let sunrise = format!(
            "\u{2600}\u{fe0f} Sunrise: {}",
            props.zone.format(props.sunrise, props.clock)
        );
        let sunset = format!(
            "\u{1f307} Sunset: {}",
            props.zone.format(props.sunset, props.clock)
        );

        frame.render_widget(
            Paragraph::new(Line::styled(sunrise, style).centered()),
            chunks[0],
        );
        frame.render_widget(
            Paragraph::new(Line::styled(sunset, style).centered()),
            chunks[1],
        );
    }
}
