pub mod board;
pub mod dragons_lair;
pub mod galaxian;
pub mod laserdisc;
pub mod registry;
pub mod space_ace;

pub use board::{Board, Family, Variant};
