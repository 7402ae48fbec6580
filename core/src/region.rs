//! Declarative board description.
//!
//! A board is described by static tables of regions: RAM blocks, ROM chips,
//! input bits and output bits. The generic engine walks these tables so no
//! per-board code is needed for the standard checks. Tables are ordered by
//! silkscreen position so reports read in the same order as the board.
//!
//! The same address may appear more than once with different masks, e.g. a
//! whole input byte followed by one entry per switch on that byte.

use crate::core::bus::BankSwitch;
use crate::error::{IctError, IctResult};

/// Width of [`location`](RamRegion::location) labels ("U3 ", " 7P").
pub const LOCATION_WIDTH: usize = 3;
/// Width of [`description`](RamRegion::description) labels ("Prog. ").
pub const DESCRIPTION_WIDTH: usize = 6;

/// A block of read/write memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RamRegion {
    pub bank: Option<BankSwitch>,
    /// First address (inclusive).
    pub start: u16,
    /// Last address (inclusive).
    pub end: u16,
    /// Bytes per storage unit. Always 1 on these boards.
    pub width: u8,
    /// Data bits backed by this chip (0x0F for the low nibble of a 2114 pair).
    pub mask: u8,
    pub location: &'static str,
    pub description: &'static str,
}

impl RamRegion {
    pub fn len(&self) -> usize {
        self.end as usize - self.start as usize + 1
    }

    pub fn addresses(&self) -> std::ops::RangeInclusive<u16> {
        self.start..=self.end
    }
}

/// A ROM chip with the data expected in it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RomRegion {
    pub bank: Option<BankSwitch>,
    pub start: u16,
    /// Size in bytes.
    pub length: u32,
    /// Expected bytes at offsets 0x0001, 0x0002, 0x0004, ... from `start`.
    /// Quick data/address line check; empty when not transcribed.
    pub data2n: &'static [u8],
    /// CRC-32 of the whole chip, checked by the external CRC machinery.
    pub crc32: u32,
    pub location: &'static str,
}

impl RomRegion {
    /// Offsets and expected bytes of the power-of-two spot checks that fall
    /// inside the chip.
    pub fn spot_checks(&self) -> impl Iterator<Item = (u16, u8)> + '_ {
        self.data2n
            .iter()
            .enumerate()
            .map(|(bit, &expected)| (1u32 << bit, expected))
            .filter(|&(offset, _)| offset < self.length)
            .map(|(offset, expected)| ((self.start as u32 + offset) as u16, expected))
    }

    /// Last address (inclusive) on the 16-bit bus.
    pub fn end(&self) -> u32 {
        self.start as u32 + self.length - 1
    }
}

/// A readable input (switch, status bit, data latch).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputRegion {
    pub bank: Option<BankSwitch>,
    pub address: u16,
    pub mask: u8,
    pub location: &'static str,
    pub description: &'static str,
}

/// A writable output, exercised by writing `value`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutputRegion {
    pub bank: Option<BankSwitch>,
    pub address: u16,
    pub value: u8,
    pub mask: u8,
    pub location: &'static str,
    pub description: &'static str,
}

/// Every region table a board family shares.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegionMap {
    /// RAM tested with whole-block fills.
    pub ram: &'static [RamRegion],
    /// RAM that only tolerates per-byte write/readback.
    pub ram_byte_only: &'static [RamRegion],
    /// RAM whose contents cannot be read back by the CPU.
    pub ram_write_only: &'static [RamRegion],
    pub input: &'static [InputRegion],
    pub output: &'static [OutputRegion],
}

impl RegionMap {
    /// Check every table against the descriptor invariants.
    pub fn validate(&self) -> IctResult<()> {
        for table in [self.ram, self.ram_byte_only, self.ram_write_only] {
            for region in table {
                check_labels(region.location, region.description)?;
                if region.start > region.end {
                    return Err(region_error(region.location, "start after end"));
                }
                if region.width != 1 {
                    return Err(region_error(region.location, "unsupported width"));
                }
                if region.mask == 0 {
                    return Err(region_error(region.location, "empty mask"));
                }
            }
        }
        for region in self.input {
            check_labels(region.location, region.description)?;
            if region.mask == 0 {
                return Err(region_error(region.location, "empty mask"));
            }
        }
        for region in self.output {
            check_labels(region.location, region.description)?;
            if region.mask == 0 {
                return Err(region_error(region.location, "empty mask"));
            }
        }
        Ok(())
    }
}

/// Check a ROM table against the descriptor invariants.
pub fn validate_roms(roms: &[RomRegion]) -> IctResult<()> {
    for rom in roms {
        if rom.location.len() != LOCATION_WIDTH {
            return Err(region_error(rom.location, "location width"));
        }
        if rom.length == 0 {
            return Err(region_error(rom.location, "zero length"));
        }
        if rom.end() > 0xFFFF {
            return Err(region_error(rom.location, "beyond 16-bit bus"));
        }
        if rom.crc32 == 0 {
            return Err(region_error(rom.location, "missing CRC"));
        }
    }
    Ok(())
}

fn check_labels(location: &'static str, description: &'static str) -> IctResult<()> {
    if location.len() != LOCATION_WIDTH {
        return Err(region_error(location, "location width"));
    }
    if description.len() != DESCRIPTION_WIDTH {
        return Err(region_error(location, "description width"));
    }
    if location.trim().is_empty() {
        return Err(region_error(location, "blank label"));
    }
    Ok(())
}

fn region_error(label: &'static str, reason: &'static str) -> IctError {
    IctError::Region { label, reason }
}
