pub mod bus;
pub mod clock;
pub mod game;

pub use bus::{BankSwitch, BusPort, BusTiming, InterruptLine};
pub use clock::{Clock, Probe, elapsed_ms};
pub use game::{CustomFunction, Game};
