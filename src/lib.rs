//! Sun and planets under mutual Newtonian gravity, advanced with a fixed
//! semi-implicit Euler step.

pub mod sim;
