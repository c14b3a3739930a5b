// Domain layer: questionnaire models and ports (interfaces). No web or file I/O here.

pub mod model;
pub mod ports;
