pub mod body;
pub mod error;
pub mod initial_parameters;
pub mod system;
pub mod units;
