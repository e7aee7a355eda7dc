// Domain layer - Core synchronization logic

pub mod model;
pub mod rules;
