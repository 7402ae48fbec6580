//! Board families and their ROM-set variants.
//!
//! A [`Family`] is everything the ROM sets on one PCB have in common: the
//! memory map, the custom tests and the interrupt handshake. A [`Variant`]
//! names one ROM set of a family, the bus timing it needs and any auxiliary
//! chip fitted. A [`Board`] is a variant brought up against the tester.

use phosphor_ict_core::core::{
    BusPort, BusTiming, Clock, CustomFunction, Game, InterruptLine, Probe,
};
use phosphor_ict_core::device::Ay38910;
use phosphor_ict_core::error::IctResult;
use phosphor_ict_core::interrupt::InterruptProtocol;
use phosphor_ict_core::region::{RegionMap, RomRegion};

/// Shared definition of one PCB.
pub struct Family {
    pub name: &'static str,
    pub regions: RegionMap,
    /// Menu order: quick signal checks before long sweeps.
    pub custom_functions: &'static [CustomFunction<Board>],
    pub interrupt: InterruptProtocol,
    pub interrupt_line: InterruptLine,
    /// True when acknowledge returns no usable vector.
    pub interrupt_auto_vectored: bool,
    /// Nominal interrupt period, for simulating the board.
    pub interrupt_period_ms: u32,
}

/// One ROM set of a family.
pub struct Variant {
    pub family: &'static Family,
    /// Selector name, at most 15 characters.
    pub name: &'static str,
    pub roms: &'static [RomRegion],
    pub timing: BusTiming,
    /// Sound chip carrying the DIP switches, where the board has one.
    pub aux: Option<Ay38910>,
}

/// A variant under test, owning the port to the target.
pub struct Board {
    variant: &'static Variant,
    // Field order is drop order: the peripheral goes before the port it
    // is reached through.
    aux: Option<Ay38910>,
    bus: Box<dyn BusPort>,
    clock: Box<dyn Clock>,
}

impl Board {
    /// Open the port in the variant's timing mode and idle it.
    pub fn new(variant: &'static Variant, probe: &mut dyn Probe) -> IctResult<Self> {
        let mut bus = probe.open_bus(variant.timing)?;
        bus.idle()?;
        let clock = probe.clock();
        log::debug!("{}: bus open, {:?}", variant.name, variant.timing);

        Ok(Self {
            variant,
            aux: variant.aux,
            bus,
            clock,
        })
    }

    /// [`Board::new`] behind the selector's [`Game`] interface.
    pub fn create(variant: &'static Variant, probe: &mut dyn Probe) -> IctResult<Box<dyn Game>> {
        Ok(Box::new(Self::new(variant, probe)?))
    }

    pub fn family(&self) -> &'static Family {
        self.variant.family
    }

    pub fn clock(&mut self) -> &mut dyn Clock {
        self.clock.as_mut()
    }

    pub fn aux(&self) -> Option<Ay38910> {
        self.aux
    }

    /// Re-mask the interrupt source and idle the bus.
    fn settle(&mut self) -> IctResult<()> {
        let masked = self.family().interrupt.quiesce(self.bus.as_mut());
        let idled = self.bus.idle();
        masked.and(idled)
    }
}

impl Drop for Board {
    fn drop(&mut self) {
        log::debug!("{}: released", self.variant.name);
    }
}

impl Game for Board {
    fn name(&self) -> &'static str {
        self.variant.name
    }

    fn regions(&self) -> &'static RegionMap {
        &self.variant.family.regions
    }

    fn rom_regions(&self) -> &'static [RomRegion] {
        self.variant.roms
    }

    fn custom_function_labels(&self) -> Vec<&'static str> {
        self.family().custom_functions.iter().map(|f| f.label).collect()
    }

    fn run_custom_function(&mut self, index: usize) -> Option<IctResult> {
        let function = self.family().custom_functions.get(index)?;
        log::trace!("{}: {}", self.variant.name, function.label);
        let result = (function.run)(self);
        let settled = self.settle();
        Some(result.and_then(|report| settled.map(|()| report)))
    }

    fn interrupt_check(&mut self) -> IctResult {
        let family = self.family();
        let result = family
            .interrupt
            .run(self.bus.as_mut(), self.clock.as_ref(), family.interrupt_line);
        let settled = self.settle();
        result.and_then(|report| settled.map(|()| report))
    }

    fn interrupt_line(&self) -> InterruptLine {
        self.family().interrupt_line
    }

    fn interrupt_auto_vectored(&self) -> bool {
        self.family().interrupt_auto_vectored
    }

    fn bus(&mut self) -> &mut dyn BusPort {
        self.bus.as_mut()
    }
}
