//! Periodic interrupt handshakes.
//!
//! Two board styles exist. Video boards gate their VBLANK interrupt through a
//! latch with an enable bit in a control register: the check toggles the
//! enable and proves the latch sets and clears. Boards with a free-running
//! interrupt source hold /INT until an acknowledge cycle: the check times the
//! interval between consecutive interrupts.

use crate::core::bus::{BusPort, InterruptLine};
use crate::core::clock::{Clock, elapsed_ms};
use crate::error::{IctError, IctResult, Report};

/// Interrupt enable latch behind a control register.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MaskRegister {
    pub control: u16,
    pub unmask: u8,
    pub mask: u8,
    pub iterations: u32,
    pub timeout_ms: u32,
}

/// Free-running interrupt cleared by an acknowledge cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AcknowledgeCycle {
    pub passes: u32,
    pub timeout_ms: u32,
    /// Accepted interval between interrupts, inclusive.
    pub min_period_ms: u32,
    pub max_period_ms: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InterruptProtocol {
    MaskRegister(MaskRegister),
    AcknowledgeCycle(AcknowledgeCycle),
}

impl InterruptProtocol {
    pub fn run(
        &self,
        bus: &mut dyn BusPort,
        clock: &dyn Clock,
        line: InterruptLine,
    ) -> IctResult {
        match self {
            Self::MaskRegister(protocol) => protocol.run(bus, clock, line),
            Self::AcknowledgeCycle(protocol) => protocol.run(bus, clock, line),
        }
    }

    /// Put the interrupt source back in its masked power-on state.
    pub fn quiesce(&self, bus: &mut dyn BusPort) -> IctResult<()> {
        match self {
            Self::MaskRegister(protocol) => bus.write(protocol.control, protocol.mask),
            Self::AcknowledgeCycle(_) => Ok(()),
        }
    }
}

impl MaskRegister {
    pub fn run(
        &self,
        bus: &mut dyn BusPort,
        clock: &dyn Clock,
        line: InterruptLine,
    ) -> IctResult {
        for _ in 0..self.iterations {
            bus.write(self.control, self.unmask)?;
            let started = clock.millis();
            bus.wait_for_interrupt(line, true, self.timeout_ms)
                .map_err(|e| with_elapsed(e, elapsed_ms(started, clock.millis())))?;

            // Masking also resets the latch.
            bus.write(self.control, self.mask)?;
            expect_absent(bus, line, 0, "masked")?;

            // A latch that survived the mask would show up immediately here.
            bus.write(self.control, self.unmask)?;
            expect_absent(bus, line, 0, "latch not cleared")?;

            bus.write(self.control, self.mask)?;
            expect_absent(bus, line, self.timeout_ms, "masked")?;
        }
        Ok(Report::ok())
    }
}

impl AcknowledgeCycle {
    pub fn run(
        &self,
        bus: &mut dyn BusPort,
        clock: &dyn Clock,
        line: InterruptLine,
    ) -> IctResult {
        // Clear whatever is already pending before timing starts.
        bus.acknowledge_interrupt()?;
        let mut last = clock.millis();

        for pass in 0..self.passes {
            let waited = bus.wait_for_interrupt(line, true, self.timeout_ms);
            let now = clock.millis();
            let interval = elapsed_ms(last, now);
            waited.map_err(|e| with_elapsed(e, interval))?;

            bus.acknowledge_interrupt()?;
            last = now;

            // The entry acknowledge shifts the phase of the first interval.
            if pass > 0 && !(self.min_period_ms..=self.max_period_ms).contains(&interval) {
                return Err(IctError::OutOfTolerance {
                    measured_ms: interval,
                    min_ms: self.min_period_ms,
                    max_ms: self.max_period_ms,
                });
            }
        }
        Ok(Report::ok())
    }
}

fn expect_absent(
    bus: &mut dyn BusPort,
    line: InterruptLine,
    timeout_ms: u32,
    phase: &'static str,
) -> IctResult<()> {
    match bus.wait_for_interrupt(line, true, timeout_ms) {
        Ok(()) => Err(IctError::UnexpectedSignal { line, phase }),
        Err(IctError::Timeout { .. }) => Ok(()),
        Err(e) => Err(e),
    }
}

fn with_elapsed(err: IctError, measured: u32) -> IctError {
    match err {
        IctError::Timeout { line, .. } => IctError::Timeout {
            line,
            elapsed_ms: measured,
        },
        other => other,
    }
}
