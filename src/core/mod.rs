pub mod bootstrap;
pub mod site_config;
pub mod sparkline;

pub use crate::domain::model::{
    BrandConfig, Coordinates, NewsItem, SiteConfig, SocialEntry, WeatherReading,
};
pub use crate::domain::ports::{
    FeedSource, GeoLocator, Presentation, RenderContext, SiteConfigSource, Storage, Surface,
    SurfaceLookup, Widget, WeatherSource,
};
pub use crate::utils::error::Result;
