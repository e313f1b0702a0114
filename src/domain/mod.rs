// Domain layer: records, derived views and the ports the core talks through.

pub mod model;
pub mod ports;
