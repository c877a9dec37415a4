// Domain layer: the stored config model and the ports (interfaces) the store is built on.

pub mod model;
pub mod ports;
