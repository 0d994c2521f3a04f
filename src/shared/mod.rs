// Shared Kernel - Domain Driven Design
// Following Clean Architecture + Hexagonal Architecture patterns

pub mod config; // API endpoint configuration
pub mod errors; // Shared error types
pub mod utils; // Shared utilities

// Re-exports for convenience
pub use config::ApiConfig;
pub use errors::{AppError, AppResult};
