//! Business logic services (use cases).
//!
//! Services orchestrate repository calls and formatting. They depend on
//! traits (ports) -- never on concrete infrastructure implementations.

pub mod card_format;
pub mod card_list;
