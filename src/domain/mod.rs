// Domain layer: models and ports. No HTTP or filesystem concerns here.

pub mod model;
pub mod ports;
