//! Behavioral stand-in for a target board.
//!
//! Models what the diagnostics can observe through the CPU socket: a flat
//! 64 KiB address space, an optional interrupt-enable latch behind a control
//! register, a periodic interrupt source with per-interval overrides, and a
//! millisecond clock that only advances while something waits. Faults can be
//! injected to exercise failure paths.
//!
//! [`SimBoard`] is a cheap handle; the bus, clock and probe it hands out share
//! its state so a test can inspect what a procedure did.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::core::bus::{BusPort, BusTiming, InterruptLine};
use crate::core::clock::{Clock, Probe};
use crate::error::{IctError, IctResult, PortFault};
use crate::interrupt::InterruptProtocol;
use crate::region::RomRegion;

/// Default interrupt period (laserdisc boards, /INT every 33 ms).
pub const DEFAULT_PERIOD_MS: u32 = 33;

struct MaskLatch {
    control: u16,
    unmask: u8,
}

struct SimState {
    memory: Vec<u8>,
    writes: Vec<(u16, u8)>,
    write_attempts: usize,
    reads: usize,

    // Time and interrupt source
    now: u32,
    period_ms: u32,
    overrides: VecDeque<u32>,
    last_fire: u32,
    next_fire: u32,
    pending: bool,
    latch: Option<MaskLatch>,
    masked: bool,
    acknowledges: usize,

    // Faults
    fail_write_at: Option<usize>,
    fail_read_at: Option<u16>,
    fail_idle: bool,
    assert_while_masked: bool,
    mask_blinds_only: bool,
    latch_while_masked: bool,

    idles: usize,
    opened: Vec<BusTiming>,
}

impl SimState {
    fn new(period_ms: u32) -> Self {
        let period_ms = period_ms.max(1);
        Self {
            memory: vec![0; 0x10000],
            writes: Vec::new(),
            write_attempts: 0,
            reads: 0,
            now: 0,
            period_ms,
            overrides: VecDeque::new(),
            last_fire: 0,
            next_fire: period_ms,
            pending: false,
            latch: None,
            masked: false,
            acknowledges: 0,
            fail_write_at: None,
            fail_read_at: None,
            fail_idle: false,
            assert_while_masked: false,
            mask_blinds_only: false,
            latch_while_masked: false,
            idles: 0,
            opened: Vec::new(),
        }
    }

    fn next_interval(&mut self) -> u32 {
        self.overrides.pop_front().unwrap_or(self.period_ms).max(1)
    }

    fn asserted(&self) -> bool {
        if self.masked {
            self.assert_while_masked || (self.latch_while_masked && self.pending)
        } else {
            self.pending
        }
    }

    /// Advance to the next scheduled interrupt if it is due within `budget`.
    /// Returns the time consumed, or `None` if nothing fires in the budget.
    fn step(&mut self, budget: u32) -> Option<u32> {
        let gap = self.next_fire.wrapping_sub(self.now);
        if gap > budget {
            return None;
        }
        self.now = self.next_fire;
        self.last_fire = self.now;
        if !self.masked || self.latch_while_masked {
            self.pending = true;
        }
        let interval = self.next_interval();
        self.next_fire = self.now.wrapping_add(interval);
        Some(gap)
    }

    fn advance(&mut self, ms: u32) {
        let mut remaining = ms;
        while let Some(used) = self.step(remaining) {
            remaining -= used;
        }
        self.now = self.now.wrapping_add(remaining);
    }

    fn wait(&mut self, line: InterruptLine, active_high: bool, timeout_ms: u32) -> IctResult<()> {
        if self.asserted() == active_high {
            return Ok(());
        }
        let mut remaining = timeout_ms;
        while let Some(used) = self.step(remaining) {
            remaining -= used;
            if self.asserted() == active_high {
                return Ok(());
            }
        }
        self.now = self.now.wrapping_add(remaining);
        Err(IctError::Timeout {
            line,
            elapsed_ms: timeout_ms,
        })
    }
}

/// Handle on a simulated board.
#[derive(Clone)]
pub struct SimBoard {
    state: Rc<RefCell<SimState>>,
}

impl SimBoard {
    /// A board with a free-running interrupt every [`DEFAULT_PERIOD_MS`].
    pub fn new() -> Self {
        Self::with_period(DEFAULT_PERIOD_MS)
    }

    pub fn with_period(period_ms: u32) -> Self {
        Self {
            state: Rc::new(RefCell::new(SimState::new(period_ms))),
        }
    }

    /// A board whose interrupt sits behind the latch a protocol drives.
    /// The latch powers up masked.
    pub fn for_protocol(protocol: &InterruptProtocol, period_ms: u32) -> Self {
        let sim = Self::with_period(period_ms);
        if let InterruptProtocol::MaskRegister(mask) = protocol {
            sim.mask_register(mask.control, mask.unmask);
        }
        sim
    }

    /// Gate the interrupt with an enable latch at `control`; writing `unmask`
    /// enables it, anything else masks it and clears a pending request.
    pub fn mask_register(&self, control: u16, unmask: u8) {
        let mut state = self.state.borrow_mut();
        state.latch = Some(MaskLatch { control, unmask });
        state.masked = true;
        state.pending = false;
    }

    /// Replace the next inter-interrupt intervals, measured from the last
    /// interrupt (or power-up). The regular period resumes afterwards.
    pub fn schedule(&self, intervals: &[u32]) {
        let mut state = self.state.borrow_mut();
        state.overrides = intervals.iter().copied().collect();
        let first = state.next_interval();
        let since_last = state.now.wrapping_sub(state.last_fire);
        state.next_fire = if first < since_last {
            state.now
        } else {
            state.last_fire.wrapping_add(first)
        };
    }

    pub fn assert_while_masked(&self, enabled: bool) {
        self.state.borrow_mut().assert_while_masked = enabled;
    }

    /// Masking only hides the line; a request latched before the mask
    /// write is still there when the line is unmasked.
    pub fn mask_blinds_only(&self, enabled: bool) {
        self.state.borrow_mut().mask_blinds_only = enabled;
    }

    /// Interrupts arriving while masked still latch and drive the line.
    pub fn latch_while_masked(&self, enabled: bool) {
        self.state.borrow_mut().latch_while_masked = enabled;
    }

    /// Fail the `n`th write attempt (1-based).
    pub fn fail_write_at(&self, n: usize) {
        self.state.borrow_mut().fail_write_at = Some(n);
    }

    /// Fail every read of `addr`.
    pub fn fail_read_at(&self, addr: u16) {
        self.state.borrow_mut().fail_read_at = Some(addr);
    }

    /// Make `idle()` fail, as a port that lost the target would.
    pub fn fail_idle(&self) {
        self.state.borrow_mut().fail_idle = true;
    }

    pub fn poke(&self, addr: u16, data: u8) {
        self.state.borrow_mut().memory[addr as usize] = data;
    }

    pub fn peek(&self, addr: u16) -> u8 {
        self.state.borrow().memory[addr as usize]
    }

    /// Place each ROM's spot-check bytes where the engine will look for them.
    pub fn seed_spot_checks(&self, roms: &[RomRegion]) {
        for rom in roms {
            for (addr, data) in rom.spot_checks() {
                self.poke(addr, data);
            }
        }
    }

    /// Successful writes, in order.
    pub fn writes(&self) -> Vec<(u16, u8)> {
        self.state.borrow().writes.clone()
    }

    pub fn write_attempts(&self) -> usize {
        self.state.borrow().write_attempts
    }

    pub fn clear_writes(&self) {
        let mut state = self.state.borrow_mut();
        state.writes.clear();
        state.write_attempts = 0;
    }

    pub fn reads(&self) -> usize {
        self.state.borrow().reads
    }

    pub fn now(&self) -> u32 {
        self.state.borrow().now
    }

    /// Move the clock without firing anything, e.g. close to wrap-around.
    pub fn set_now(&self, now: u32) {
        let mut state = self.state.borrow_mut();
        let until_fire = state.next_fire.wrapping_sub(state.now);
        let since_fire = state.now.wrapping_sub(state.last_fire);
        state.now = now;
        state.next_fire = now.wrapping_add(until_fire);
        state.last_fire = now.wrapping_sub(since_fire);
    }

    pub fn idles(&self) -> usize {
        self.state.borrow().idles
    }

    pub fn acknowledges(&self) -> usize {
        self.state.borrow().acknowledges
    }

    pub fn is_masked(&self) -> bool {
        self.state.borrow().masked
    }

    /// Timing modes the probe was asked to open ports with.
    pub fn opened(&self) -> Vec<BusTiming> {
        self.state.borrow().opened.clone()
    }

    pub fn bus(&self) -> SimBus {
        SimBus {
            state: Rc::clone(&self.state),
        }
    }

    pub fn clock(&self) -> SimClock {
        SimClock {
            state: Rc::clone(&self.state),
        }
    }

    pub fn probe(&self) -> SimProbe {
        SimProbe { board: self.clone() }
    }
}

impl Default for SimBoard {
    fn default() -> Self {
        Self::new()
    }
}

pub struct SimBus {
    state: Rc<RefCell<SimState>>,
}

impl BusPort for SimBus {
    fn read(&mut self, addr: u16) -> IctResult<u8> {
        let mut state = self.state.borrow_mut();
        state.reads += 1;
        if state.fail_read_at == Some(addr) {
            return Err(PortFault::at(addr, "read fault").into());
        }
        Ok(state.memory[addr as usize])
    }

    fn write(&mut self, addr: u16, data: u8) -> IctResult<()> {
        let mut state = self.state.borrow_mut();
        state.write_attempts += 1;
        if state.fail_write_at == Some(state.write_attempts) {
            return Err(PortFault::at(addr, "write fault").into());
        }
        state.memory[addr as usize] = data;
        state.writes.push((addr, data));

        let gate = state
            .latch
            .as_ref()
            .filter(|latch| latch.control == addr)
            .map(|latch| data != latch.unmask);
        if let Some(masked) = gate {
            state.masked = masked;
            if masked && !state.mask_blinds_only {
                state.pending = false;
            }
        }
        Ok(())
    }

    fn idle(&mut self) -> IctResult<()> {
        let mut state = self.state.borrow_mut();
        state.idles += 1;
        if state.fail_idle {
            return Err(PortFault::new("bus will not idle").into());
        }
        Ok(())
    }

    fn wait_for_interrupt(
        &mut self,
        line: InterruptLine,
        active_high: bool,
        timeout_ms: u32,
    ) -> IctResult<()> {
        self.state.borrow_mut().wait(line, active_high, timeout_ms)
    }

    fn acknowledge_interrupt(&mut self) -> IctResult<u8> {
        let mut state = self.state.borrow_mut();
        state.acknowledges += 1;
        state.pending = false;
        // Nothing drives the data bus during the cycle.
        Ok(0xFF)
    }
}

pub struct SimClock {
    state: Rc<RefCell<SimState>>,
}

impl Clock for SimClock {
    fn millis(&self) -> u32 {
        self.state.borrow().now
    }

    fn delay_ms(&mut self, ms: u32) {
        self.state.borrow_mut().advance(ms);
    }
}

pub struct SimProbe {
    board: SimBoard,
}

impl Probe for SimProbe {
    fn open_bus(&mut self, timing: BusTiming) -> IctResult<Box<dyn BusPort>> {
        self.board.state.borrow_mut().opened.push(timing);
        Ok(Box::new(self.board.bus()))
    }

    fn clock(&mut self) -> Box<dyn Clock> {
        Box::new(self.board.clock())
    }
}
