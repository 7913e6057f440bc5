// Domain layer: site models and ports (interfaces) the widgets and adapters meet at.

pub mod model;
pub mod ports;
