//! Galaxian hardware (Namco/Midway) and the Super Galaxians bootleg.
//!
//! Z80 at 3.072 MHz, 16 KB ROM space, 1 KB work RAM at 0x4000, a 32x32
//! tile video RAM at 0x5000 and a 256-byte object RAM at 0x5800 holding
//! sprite attributes and the shell/missile table. VBLANK drives NMI through
//! an enable latch at 0x7001.

use phosphor_ict_core::core::{BusTiming, CustomFunction, Game, InterruptLine, Probe};
use phosphor_ict_core::error::{IctResult, Report};
use phosphor_ict_core::interrupt::{InterruptProtocol, MaskRegister};
use phosphor_ict_core::region::{InputRegion, OutputRegion, RamRegion, RegionMap, RomRegion};

use crate::board::{Board, Family, Variant};
use crate::registry::GameEntry;

pub const VIDEO_RAM: u16 = 0x5000;
pub const VIDEO_RAM_LEN: u16 = 0x400;
pub const OBJECT_RAM: u16 = 0x5800;
pub const OBJECT_RAM_LEN: u16 = 0x100;
/// Shell and missile entries, four bytes per projectile.
pub const SHELL_TABLE: u16 = 0x60;
pub const PROJECTILES: u8 = 8;

/// Blank tile 0x160 in 8x8 background units.
pub const BLANK_TILE: u8 = 0x2C;
/// The same tile in 16x16 object units.
pub const BLANK_OBJECT: u8 = 0x0B;

/// Full sweeps of the projectile positions.
pub const SWEEP_REPEATS: u32 = 10;
/// Visible lines a projectile steps through per sweep.
pub const SWEEP_POSITIONS: u8 = 224;

const NMI_ENABLE: u16 = 0x7001;
const VBLANK_TIMEOUT_MS: u32 = 1000;

// ---------------------------------------------------------------------------
// Memory map
// ---------------------------------------------------------------------------

const fn ram(
    start: u16,
    end: u16,
    mask: u8,
    location: &'static str,
    description: &'static str,
) -> RamRegion {
    RamRegion {
        bank: None,
        start,
        end,
        width: 1,
        mask,
        location,
        description,
    }
}

// Work RAM is a pair of 2114s, one per nibble.
static RAM: [RamRegion; 3] = [
    ram(0x4000, 0x43FF, 0x0F, "WRK", "Wrk Lo"),
    ram(0x4000, 0x43FF, 0xF0, "WRK", "Wrk Hi"),
    ram(0x5000, 0x53FF, 0xFF, "VID", "Video "),
];

// Object RAM is shared with the sprite engine and only answers to
// single-byte cycles.
static RAM_BYTE_ONLY: [RamRegion; 1] = [ram(0x5800, 0x58FF, 0xFF, "OBJ", "Object")];

const fn input(
    address: u16,
    mask: u8,
    location: &'static str,
    description: &'static str,
) -> InputRegion {
    InputRegion {
        bank: None,
        address,
        mask,
        location,
        description,
    }
}

static INPUTS: [InputRegion; 15] = [
    input(0x6000, 0xFF, "IN0", "IN0   "),
    input(0x6000, 0x01, "IN0", "Coin1 "),
    input(0x6000, 0x02, "IN0", "Coin2 "),
    input(0x6000, 0x04, "IN0", "Left1 "),
    input(0x6000, 0x08, "IN0", "Right1"),
    input(0x6000, 0x10, "IN0", "Fire1 "),
    input(0x6000, 0x40, "IN0", "Servce"),
    input(0x6800, 0xFF, "IN1", "IN1   "),
    input(0x6800, 0x01, "IN1", "Start1"),
    input(0x6800, 0x02, "IN1", "Start2"),
    input(0x6800, 0x04, "IN1", "Left2 "),
    input(0x6800, 0x08, "IN1", "Right2"),
    input(0x6800, 0x10, "IN1", "Fire2 "),
    input(0x6800, 0xC0, "IN1", "Coinag"),
    input(0x7000, 0xFF, "DSW", "DSW   "),
];

const fn output(address: u16, location: &'static str, description: &'static str) -> OutputRegion {
    OutputRegion {
        bank: None,
        address,
        value: 0x01,
        mask: 0x01,
        location,
        description,
    }
}

static OUTPUTS: [OutputRegion; 7] = [
    output(0x6000, "OUT", "Lamp1 "),
    output(0x6001, "OUT", "Lamp2 "),
    output(0x6002, "OUT", "CoinLk"),
    output(0x6003, "OUT", "CoinCt"),
    output(0x7004, "VID", "Stars "),
    output(0x7006, "VID", "FlipX "),
    output(0x7007, "VID", "FlipY "),
];

// ---------------------------------------------------------------------------
// Custom functions
// ---------------------------------------------------------------------------

/// Fill the tile and object RAM with the blank tile.
fn clear_video(board: &mut Board) -> IctResult {
    let bus = board.bus();
    for addr in VIDEO_RAM..VIDEO_RAM + VIDEO_RAM_LEN {
        bus.write(addr, BLANK_TILE)?;
    }
    for addr in OBJECT_RAM..OBJECT_RAM + OBJECT_RAM_LEN {
        bus.write(addr, BLANK_OBJECT)?;
    }
    Ok(Report::ok())
}

/// The two object RAM writes that place `projectile` at `position`.
///
/// Projectiles are staggered two lines apart so all eight stay visible.
pub fn shell_entry(position: u8, projectile: u8) -> [(u16, u8); 2] {
    let entry = OBJECT_RAM + SHELL_TABLE + 4 * projectile as u16;
    let line = position.wrapping_add(2 * projectile);
    [(entry + 1, line), (entry + 3, line)]
}

/// Walk every projectile down the screen, one step per VBLANK.
fn shell_missile_sweep(board: &mut Board) -> IctResult {
    let line = board.interrupt_line();
    let bus = board.bus();
    for _ in 0..SWEEP_REPEATS {
        for position in 0..SWEEP_POSITIONS {
            // Re-arm the latch so the wait sees the next VBLANK.
            bus.write(NMI_ENABLE, 0x00)?;
            bus.write(NMI_ENABLE, 0x01)?;
            bus.wait_for_interrupt(line, true, VBLANK_TIMEOUT_MS)?;
            for projectile in 0..PROJECTILES {
                for (addr, data) in shell_entry(position, projectile) {
                    bus.write(addr, data)?;
                }
            }
        }
    }
    Ok(Report::ok())
}

static CUSTOM_FUNCTIONS: [CustomFunction<Board>; 2] = [
    CustomFunction::new("Clear Vid.", clear_video),
    CustomFunction::new("Shell Mis.", shell_missile_sweep),
];

// ---------------------------------------------------------------------------
// Family
// ---------------------------------------------------------------------------

pub static GALAXIAN: Family = Family {
    name: "Galaxian",
    regions: RegionMap {
        ram: &RAM,
        ram_byte_only: &RAM_BYTE_ONLY,
        ram_write_only: &[],
        input: &INPUTS,
        output: &OUTPUTS,
    },
    custom_functions: &CUSTOM_FUNCTIONS,
    interrupt: InterruptProtocol::MaskRegister(MaskRegister {
        control: NMI_ENABLE,
        unmask: 0x01,
        mask: 0x00,
        iterations: 4,
        timeout_ms: VBLANK_TIMEOUT_MS,
    }),
    interrupt_line: InterruptLine::Nmi,
    interrupt_auto_vectored: true,
    interrupt_period_ms: 16,
};

// ---------------------------------------------------------------------------
// ROM sets
// ---------------------------------------------------------------------------

// Spot bytes are not recorded for these sets; the CRC check covers them.
const fn rom(start: u16, location: &'static str, crc32: u32) -> RomRegion {
    RomRegion {
        bank: None,
        start,
        length: 0x800,
        data2n: &[],
        crc32,
        location,
    }
}

static ROMS_GALMIDW: [RomRegion; 5] = [
    rom(0x0000, "U  ", 0x745E_2D61),
    rom(0x0800, "V  ", 0x9C99_9A40),
    rom(0x1000, "W  ", 0xB589_4925),
    rom(0x1800, "Y  ", 0x6B3C_A10B),
    rom(0x2000, "7L ", 0x1B93_3207),
];

static ROMS_SUPERG: [RomRegion; 5] = [
    rom(0x0000, "U  ", 0xE8F3_AA67),
    rom(0x0800, "V  ", 0xF582_83E3),
    rom(0x1000, "W  ", 0xDDEA_BDAE),
    rom(0x1800, "Y  ", 0x9463_F753),
    rom(0x2000, "Z  ", 0xE631_2E35),
];

pub static GALMIDW: Variant = Variant {
    family: &GALAXIAN,
    name: "Galaxian Midway",
    roms: &ROMS_GALMIDW,
    timing: BusTiming::NoWait,
    aux: None,
};

pub static SUPERG: Variant = Variant {
    family: &GALAXIAN,
    name: "Super Galaxians",
    roms: &ROMS_SUPERG,
    timing: BusTiming::NoWait,
    aux: None,
};

// ---------------------------------------------------------------------------
// Game registry
// ---------------------------------------------------------------------------

pub fn create_galmidw(probe: &mut dyn Probe) -> IctResult<Box<dyn Game>> {
    Board::create(&GALMIDW, probe)
}

pub fn create_superg(probe: &mut dyn Probe) -> IctResult<Box<dyn Game>> {
    Board::create(&SUPERG, probe)
}

inventory::submit! {
    GameEntry::new("galmidw", &GALMIDW, create_galmidw)
}

inventory::submit! {
    GameEntry::new("superg", &SUPERG, create_superg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_entries_stay_in_table() {
        for projectile in 0..PROJECTILES {
            for (addr, _) in shell_entry(0, projectile) {
                assert!(addr >= OBJECT_RAM + SHELL_TABLE);
                assert!(addr < OBJECT_RAM + OBJECT_RAM_LEN);
            }
        }
    }

    #[test]
    fn projectile_positions_wrap() {
        assert_eq!(shell_entry(250, 7)[0].1, 8);
    }
}
