//! Core business logic - framework-agnostic operations behind every screen.

/// Local calendar-date helpers and time-ordered record identifiers
pub mod dates;
/// Typed key-value JSON document persistence shared by all stores
pub mod documents;
/// Spiritual journal store
pub mod journal;
/// Onboarding profile and settings store
pub mod onboarding;
/// Daily prayer status tracker
pub mod prayers;
/// Qibla bearing calculation
pub mod qibla;
/// Derived views over the daily prayer schedule
pub mod schedule;
/// Tasbih counting state machine and session recorder
pub mod tasbih;
