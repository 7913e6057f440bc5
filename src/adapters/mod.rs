// Adapters layer: concrete implementations for external systems (http APIs, page surfaces).

pub mod feeds;
pub mod geo;
pub mod http;
pub mod page;
pub mod weather;
