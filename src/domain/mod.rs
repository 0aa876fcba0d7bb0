// Domain layer: classification table, parameters model and ports (interfaces).

pub mod model;
pub mod partition;
pub mod ports;
