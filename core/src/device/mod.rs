pub mod ay38910;

pub use ay38910::{Ay38910, AyPort};
