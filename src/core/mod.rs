pub mod analyzer;
pub mod progress;
pub mod scanner;
