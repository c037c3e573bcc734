// Domain layer: the normalized pet record and the ports adapters plug into.

pub mod model;
pub mod ports;
