// Application layer - Use case interactors

pub mod compose_interactor;
pub mod container;
pub mod offset_calculator;
pub mod timestamp_resolver;

// Re-export interactors
pub use compose_interactor::ComposeInteractor;
pub use offset_calculator::OffsetCalculator;
pub use timestamp_resolver::TimestampResolver;
