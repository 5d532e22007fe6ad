// Domain layer: wire models of the remote API, the rendered view, and ports (interfaces).

pub mod model;
pub mod ports;
pub mod view;
