pub mod core;
pub mod device;
pub mod engine;
pub mod error;
pub mod interrupt;
pub mod region;
pub mod sim;
