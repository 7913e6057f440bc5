pub mod news;
pub mod social;
pub mod tides;
pub mod weather;

pub use news::{NewsLimits, NewsWidget};
pub use social::SocialWidget;
pub use tides::TidesWidget;
pub use weather::WeatherWidget;
