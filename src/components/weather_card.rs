use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Frame, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
};

use super::Component;
use crate::action::Action;

/// Weather summary card: place, temperature, description
pub struct WeatherCard;

pub struct WeatherCardProps<'a> {
    pub name: &'a str,
    pub temperature: f64,
    pub description: &'a str,
    pub high: Option<f64>,
    pub low: Option<f64>,
}

impl WeatherCard {
    /// Border + name, temperature, description, high/low.
    pub const HEIGHT: u16 = 6;
    const WIDTH: u16 = 40;
}

/// `21.0` renders as `21°C`, `21.4` as `21.4°C`.
pub fn format_temperature(celsius: f64) -> String {
    format!("{celsius}°C")
}

impl Component<Action> for WeatherCard {
    type Props<'a> = WeatherCardProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let [card_area] = Layout::horizontal([Constraint::Max(Self::WIDTH)])
            .flex(Flex::Center)
            .areas(area);

        let mut lines = vec![
            Line::from(Span::styled(
                props.name.to_string(),
                Style::default().fg(Color::White),
            )),
            Line::from(Span::styled(
                format_temperature(props.temperature),
                Style::default().fg(Color::White).bold(),
            )),
            Line::from(Span::styled(
                props.description.to_string(),
                Style::default().fg(Color::Gray),
            )),
        ];
        if let (Some(high), Some(low)) = (props.high, props.low) {
            lines.push(Line::from(Span::styled(
                format!("H {high:.0}° · L {low:.0}°"),
                Style::default().fg(Color::DarkGray),
            )));
        }

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray));
        frame.render_widget(Paragraph::new(lines).centered().block(block), card_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_dispatch::testing::*;

    fn render(props: WeatherCardProps<'_>) -> String {
        let mut render = RenderHarness::new(50, WeatherCard::HEIGHT);
        let mut card = WeatherCard;
        render.render_to_string_plain(|frame| card.render(frame, frame.area(), props))
    }

    #[test]
    fn test_format_temperature() {
        assert_eq!(format_temperature(21.0), "21°C");
        assert_eq!(format_temperature(21.4), "21.4°C");
        assert_eq!(format_temperature(-3.5), "-3.5°C");
    }

    #[test]
    fn test_render_card() {
        let output = render(WeatherCardProps {
            name: "Paris",
            temperature: 21.0,
            description: "clear sky",
            high: Some(24.1),
            low: Some(14.2),
        });

        assert!(output.contains("Paris"));
        assert!(output.contains("21°C"));
        assert!(output.contains("clear sky"));
        assert!(output.contains("H 24° · L 14°"), "{output}");
    }

    #[test]
    fn test_render_card_without_range() {
        let output = render(WeatherCardProps {
            name: "Oslo",
            temperature: -2.0,
            description: "Snow",
            high: None,
            low: None,
        });

        assert!(output.contains("-2°C"));
        assert!(!output.contains("H "));
    }
}
