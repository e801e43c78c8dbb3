pub mod home_screen;
pub mod sun_times;
pub mod weather_card;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use home_screen::{HomeScreen, HomeScreenProps, SPINNER_FRAMES, TITLE};
pub use sun_times::{SunTimes, SunTimesProps};
pub use weather_card::{format_temperature, WeatherCard, WeatherCardProps};
