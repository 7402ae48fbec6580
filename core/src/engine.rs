//! Generic region-driven checks.
//!
//! Walks a [`Game`]'s region tables through its bus port: RAM by pattern and
//! pseudo-random fills, ROM by power-of-two spot checks, inputs by reading
//! and outputs by writing. Then runs the custom functions and the interrupt
//! check. Nothing here knows which board it is talking to.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::bus::{BankSwitch, BusPort};
use crate::core::game::Game;
use crate::error::{IctError, IctResult, Report};
use crate::region::{InputRegion, OutputRegion, RamRegion, RomRegion};

const RAM_PATTERNS: [u8; 4] = [0x00, 0xFF, 0x55, 0xAA];
const RANDOM_SEED: u64 = 0x1C7_5EED;

/// A group of checks in the order a session runs them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Ram,
    Rom,
    Io,
    Custom,
    Interrupt,
}

impl Step {
    pub const ALL: [Step; 5] = [Step::Ram, Step::Rom, Step::Io, Step::Custom, Step::Interrupt];
}

/// The outcome of one check in a session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Finding {
    pub step: Step,
    pub label: String,
    pub result: IctResult,
}

impl Finding {
    fn new(step: Step, label: impl Into<String>, result: IctResult) -> Self {
        Self {
            step,
            label: label.into(),
            result,
        }
    }

    pub fn passed(&self) -> bool {
        self.result.is_ok()
    }
}

/// Fill the block with each pattern, then verify the whole block. Catches
/// address line faults that per-byte readback misses.
pub fn check_ram(bus: &mut dyn BusPort, region: &RamRegion) -> IctResult {
    BankSwitch::select(region.bank, bus)?;
    for pattern in RAM_PATTERNS {
        for addr in region.addresses() {
            bus.write(addr, pattern)?;
        }
        for addr in region.addresses() {
            verify(bus, addr, pattern, region.mask)?;
        }
    }

    let mut rng = StdRng::seed_from_u64(RANDOM_SEED);
    for addr in region.addresses() {
        bus.write(addr, rng.r#gen::<u8>())?;
    }
    let mut rng = StdRng::seed_from_u64(RANDOM_SEED);
    for addr in region.addresses() {
        verify(bus, addr, rng.r#gen::<u8>(), region.mask)?;
    }
    Ok(Report::ok())
}

/// Write and immediately read back each address on its own.
pub fn check_ram_byte_only(bus: &mut dyn BusPort, region: &RamRegion) -> IctResult {
    BankSwitch::select(region.bank, bus)?;
    for addr in region.addresses() {
        for pattern in RAM_PATTERNS {
            bus.write(addr, pattern)?;
            verify(bus, addr, pattern, region.mask)?;
        }
    }
    Ok(Report::ok())
}

/// Exercise RAM the CPU cannot read back. Only bus faults can be detected.
pub fn exercise_ram_write_only(bus: &mut dyn BusPort, region: &RamRegion) -> IctResult {
    BankSwitch::select(region.bank, bus)?;
    for pattern in RAM_PATTERNS {
        for addr in region.addresses() {
            bus.write(addr, pattern)?;
        }
    }
    Ok(Report::ok())
}

/// Compare the bytes at power-of-two offsets with the expected image.
/// A pass reports the CRC the external verifier should find.
pub fn check_rom(bus: &mut dyn BusPort, rom: &RomRegion) -> IctResult {
    BankSwitch::select(rom.bank, bus)?;
    for (addr, expected) in rom.spot_checks() {
        verify(bus, addr, expected, 0xFF)?;
    }
    Ok(Report::note(&format!("{:08X}", rom.crc32)))
}

/// Read an input and report its masked value.
pub fn read_input(bus: &mut dyn BusPort, input: &InputRegion) -> IctResult {
    BankSwitch::select(input.bank, bus)?;
    let data = bus.read(input.address)?;
    Ok(Report::value(data & input.mask))
}

pub fn write_output(bus: &mut dyn BusPort, output: &OutputRegion) -> IctResult {
    BankSwitch::select(output.bank, bus)?;
    bus.write(output.address, output.value & output.mask)?;
    Ok(Report::ok())
}

fn verify(bus: &mut dyn BusPort, addr: u16, expected: u8, mask: u8) -> IctResult<()> {
    let actual = bus.read(addr)?;
    if (actual ^ expected) & mask != 0 {
        return Err(IctError::Mismatch {
            address: addr,
            expected: expected & mask,
            actual: actual & mask,
        });
    }
    Ok(())
}

/// Run the requested steps against a game and collect what happened.
///
/// With `stop_on_failure` the walk ends at the first failing check.
pub fn walk(game: &mut dyn Game, steps: &[Step], stop_on_failure: bool) -> Vec<Finding> {
    let mut findings = Vec::new();
    let record = |findings: &mut Vec<Finding>, finding: Finding| {
        let failed = !finding.passed();
        findings.push(finding);
        failed && stop_on_failure
    };

    for &step in Step::ALL.iter().filter(|s| steps.contains(s)) {
        match step {
            Step::Ram => {
                let regions = game.regions();
                let checks: [(&[RamRegion], fn(&mut dyn BusPort, &RamRegion) -> IctResult); 3] = [
                    (regions.ram, check_ram),
                    (regions.ram_byte_only, check_ram_byte_only),
                    (regions.ram_write_only, exercise_ram_write_only),
                ];
                for (table, check) in checks {
                    for region in table {
                        log::trace!("RAM {} {}", region.location, region.description);
                        let result = check(game.bus(), region);
                        let label = format!("{} {}", region.location, region.description);
                        if record(&mut findings, Finding::new(step, label, result)) {
                            return findings;
                        }
                    }
                }
            }
            Step::Rom => {
                for rom in game.rom_regions() {
                    log::trace!("ROM {}", rom.location);
                    let result = check_rom(game.bus(), rom);
                    if record(&mut findings, Finding::new(step, rom.location, result)) {
                        return findings;
                    }
                }
            }
            Step::Io => {
                let regions = game.regions();
                for input in regions.input {
                    let result = read_input(game.bus(), input);
                    let label = format!("{} {}", input.location, input.description);
                    if record(&mut findings, Finding::new(step, label, result)) {
                        return findings;
                    }
                }
                for output in regions.output {
                    let result = write_output(game.bus(), output);
                    let label = format!("{} {}", output.location, output.description);
                    if record(&mut findings, Finding::new(step, label, result)) {
                        return findings;
                    }
                }
            }
            Step::Custom => {
                for (index, label) in game.custom_function_labels().into_iter().enumerate() {
                    let Some(result) = game.run_custom_function(index) else {
                        break;
                    };
                    if record(&mut findings, Finding::new(step, label, result)) {
                        return findings;
                    }
                }
            }
            Step::Interrupt => {
                let label = format!("{} check", game.interrupt_line());
                let result = game.interrupt_check();
                if record(&mut findings, Finding::new(step, label, result)) {
                    return findings;
                }
            }
        }
    }
    findings
}
