// Presentation layer - Operator console
pub mod console;
