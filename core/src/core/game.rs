use crate::core::bus::{BusPort, InterruptLine};
use crate::error::IctResult;
use crate::region::{RegionMap, RomRegion};

/// A board-specific diagnostic beyond the generic RAM/ROM/I-O checks.
///
/// `B` is the board type the procedure runs against; the board is passed in
/// explicitly so procedures can reach its bus, clock and peripherals.
pub struct CustomFunction<B: ?Sized> {
    /// Menu label, at most 10 characters.
    pub label: &'static str,
    pub run: fn(&mut B) -> IctResult,
}

impl<B: ?Sized> CustomFunction<B> {
    pub const fn new(label: &'static str, run: fn(&mut B) -> IctResult) -> Self {
        Self { label, run }
    }
}

impl<B: ?Sized> Clone for CustomFunction<B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B: ?Sized> Copy for CustomFunction<B> {}

impl<B: ?Sized> std::fmt::Debug for CustomFunction<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomFunction")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Board-agnostic interface to one ROM-set variant under test.
///
/// The generic engine and the selector only see this trait: the region tables
/// to walk, the custom functions to offer, and the interrupt check.
pub trait Game {
    /// Selector name of the ROM set (e.g., "DrgnsLair F2").
    fn name(&self) -> &'static str;

    /// Region tables shared by every variant of the board family.
    fn regions(&self) -> &'static RegionMap;

    /// ROM chips and their expected contents for this variant.
    fn rom_regions(&self) -> &'static [RomRegion];

    /// Labels of the custom functions, in menu order.
    fn custom_function_labels(&self) -> Vec<&'static str>;

    /// Run the custom function at `index`. Returns `None` when out of range.
    ///
    /// The bus is left idle afterwards whatever the outcome.
    fn run_custom_function(&mut self, index: usize) -> Option<IctResult>;

    /// Verify the periodic interrupt using the family's handshake.
    fn interrupt_check(&mut self) -> IctResult;

    fn interrupt_line(&self) -> InterruptLine;

    /// True when no vector is read from the bus during acknowledge.
    fn interrupt_auto_vectored(&self) -> bool;

    /// The port, for the generic engine's region walk.
    fn bus(&mut self) -> &mut dyn BusPort;
}
