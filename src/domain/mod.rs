// Domain layer: request/response models, region tables and ports (interfaces).

pub mod model;
pub mod ports;
pub mod region;
