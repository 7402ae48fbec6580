use crate::error::IctResult;

/// Physical interrupt input on the target CPU socket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InterruptLine {
    Irq0, // Z80 /INT
    Nmi,  // Z80 /NMI
}

impl std::fmt::Display for InterruptLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Irq0 => f.write_str("INT"),
            Self::Nmi => f.write_str("NMI"),
        }
    }
}

/// Bus cycle timing the port should generate for a board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BusTiming {
    /// Plain Z80 memory cycles, /WAIT never sampled.
    NoWait,
    /// One extra wait state on memory-mapped I/O accesses (0xC000 and above),
    /// as inserted by boards that stretch cycles to the sound chip.
    IoWaitState,
}

/// Access to the target board through the CPU socket.
///
/// The implementation drives the address/data/control lines directly; the
/// board's own CPU is held off the bus. Every operation is fallible: a port
/// that loses the target reports a [`PortFault`](crate::error::PortFault)
/// wrapped in [`IctError::Bus`](crate::error::IctError::Bus).
pub trait BusPort {
    fn read(&mut self, addr: u16) -> IctResult<u8>;
    fn write(&mut self, addr: u16, data: u8) -> IctResult<()>;

    /// Return the control lines to their inactive state.
    fn idle(&mut self) -> IctResult<()>;

    /// Block until `line` reaches `active_high` or `timeout_ms` elapses.
    ///
    /// A zero timeout samples the line once. On expiry the port returns
    /// [`IctError::Timeout`](crate::error::IctError::Timeout).
    fn wait_for_interrupt(
        &mut self,
        line: InterruptLine,
        active_high: bool,
        timeout_ms: u32,
    ) -> IctResult<()>;

    /// Run an interrupt-acknowledge cycle (/M1 + /IORQ) and return the byte
    /// found on the data bus. Also clears a pending request on boards that
    /// latch it until acknowledged.
    fn acknowledge_interrupt(&mut self) -> IctResult<u8>;
}

/// Selects a ROM/RAM bank before an access by writing a latch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BankSwitch {
    pub latch: u16,
    pub value: u8,
}

impl BankSwitch {
    /// Put the bank in place. `None` means the region is not banked.
    pub fn select(bank: Option<BankSwitch>, bus: &mut dyn BusPort) -> IctResult<()> {
        match bank {
            Some(bank) => bus.write(bank.latch, bank.value),
            None => Ok(()),
        }
    }
}
