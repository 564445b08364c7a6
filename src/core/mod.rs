// Core modules
pub mod types;
