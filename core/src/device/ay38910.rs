use crate::core::bus::BusPort;
use crate::error::IctResult;

const REG_ENABLE: u8 = 0x07;
const REG_PORT_A: u8 = 0x0E;
const REG_PORT_B: u8 = 0x0F;

// Tone and noise off on all channels, both ports input.
const ENABLE_PORTS_INPUT: u8 = 0x3F;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AyPort {
    A,
    B,
}

/// General Instrument AY-3-8910 PSG, reached through the target's bus.
///
/// The chip is memory-mapped with separate addresses for register select,
/// data read and data write. Its two 8-bit I/O ports are wired to DIP switch
/// banks on the laserdisc boards.
///
/// Register 7 (mixer/enable) bits 6 and 7 set the port directions; both must
/// be 0 for the ports to read the switches. Registers 14 and 15 hold the
/// port A and port B pin states.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ay38910 {
    select: u16,
    read: u16,
    write: u16,
}

impl Ay38910 {
    pub const fn new(select: u16, read: u16, write: u16) -> Self {
        Self {
            select,
            read,
            write,
        }
    }

    pub fn read_register(&self, bus: &mut dyn BusPort, register: u8) -> IctResult<u8> {
        bus.write(self.select, register & 0x0F)?;
        bus.read(self.read)
    }

    pub fn write_register(&self, bus: &mut dyn BusPort, register: u8, data: u8) -> IctResult<()> {
        bus.write(self.select, register & 0x0F)?;
        bus.write(self.write, data)
    }

    /// Switch both ports to input and return the pin state of `port`.
    pub fn read_port(&self, bus: &mut dyn BusPort, port: AyPort) -> IctResult<u8> {
        self.write_register(bus, REG_ENABLE, ENABLE_PORTS_INPUT)?;
        let register = match port {
            AyPort::A => REG_PORT_A,
            AyPort::B => REG_PORT_B,
        };
        self.read_register(bus, register)
    }
}
