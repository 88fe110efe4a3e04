/// Database configuration and connection management
pub mod database;

/// Dhikr preset and calculation-method configuration
pub mod presets;
