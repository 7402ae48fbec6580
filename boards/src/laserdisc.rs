//! Cinematronics laserdisc PCB shared by Dragon's Lair and Space Ace.
//!
//! Z80 at 4 MHz with 2 KB of program RAM at 0xA000, two input latches, a
//! laserdisc player interface, a 16-digit scoreboard and an AY-3-8910
//! whose I/O ports carry the two DIP switch banks. A free-running timer
//! holds /INT until the CPU acknowledges it, roughly every 33 ms.

use std::ops::RangeInclusive;

use phosphor_ict_core::core::{CustomFunction, Game, InterruptLine};
use phosphor_ict_core::device::{Ay38910, AyPort};
use phosphor_ict_core::error::{IctResult, PortFault, Report};
use phosphor_ict_core::interrupt::{AcknowledgeCycle, InterruptProtocol};
use phosphor_ict_core::region::{InputRegion, OutputRegion, RamRegion, RegionMap};

use crate::board::{Board, Family};

/// Scoreboard digit latches; P1 on the low eight, P2 on the high eight.
pub const SCOREBOARD_DIGITS: RangeInclusive<u16> = 0xE030..=0xE03F;
/// How long each segment code stays on the digits.
pub const SCOREBOARD_HOLD_MS: u32 = 500;
/// Code left on every digit when the sweep ends.
pub const SEGMENTS_ON: u8 = 0x08;

/// Sound chip on the production boards: select 0xE010, read 0xC000,
/// write 0xE000.
pub const AY: Ay38910 = Ay38910::new(0xE010, 0xC000, 0xE000);

// ---------------------------------------------------------------------------
// Memory map
// ---------------------------------------------------------------------------

static RAM: [RamRegion; 1] = [RamRegion {
    bank: None,
    start: 0xA000,
    end: 0xA7FF,
    width: 1,
    mask: 0xFF,
    location: " U3",
    description: "Prog. ",
}];

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

const fn output(
    address: u16,
    value: u8,
    mask: u8,
    location: &'static str,
    description: &'static str,
) -> OutputRegion {
    OutputRegion {
        bank: None,
        address,
        value,
        mask,
        location,
        description,
    }
}

static INPUTS: [InputRegion; 19] = [
    input(0xC008, 0xFF, " U8", "IN CPA"),
    input(0xC010, 0xFF, "U14", "IN CPB"),
    input(0xC008, 0x01, " U8", "Up    "),
    input(0xC008, 0x02, " U8", "Down  "),
    input(0xC008, 0x04, " U8", "Left  "),
    input(0xC008, 0x08, " U8", "Right "),
    input(0xC008, 0x10, " U8", "Action"),
    input(0xC008, 0x20, " U8", "Skill1"),
    input(0xC008, 0x40, " U8", "Skill2"),
    input(0xC008, 0x80, " U8", "Skill3"),
    input(0xC010, 0x01, "U14", "Start1"),
    input(0xC010, 0x02, "U14", "Start2"),
    input(0xC010, 0x04, "U14", "Coin1 "),
    input(0xC010, 0x08, "U14", "Coin2 "),
    input(0xC010, 0x10, "U14", "AUX4  "),
    input(0xC010, 0x20, "U14", "AUX5  "),
    input(0xC010, 0x40, "U14", "FAN   "),
    input(0xC010, 0x80, "U14", "LD-RDY"),
    input(0xC020, 0xFF, "U20", "LD-DAT"),
];

static OUTPUTS: [OutputRegion; 6] = [
    output(0xE020, 0x02, 0xFF, "LD ", "LD-Ply"),
    output(0xE020, 0x04, 0xFF, "LD ", "LD-Stp"),
    output(0xE008, 0x0D, 0xFF, "LD ", "LD-Wrt"),
    output(0xE008, 0x01, 0xFF, "U16", "CoinCt"),
    output(0xE030, 0x07, 0x0F, "J3 ", "Score1"),
    output(0xE038, 0x07, 0x0F, "J3 ", "Score2"),
];

// ---------------------------------------------------------------------------
// Custom functions
// ---------------------------------------------------------------------------

/// Cycle every segment code across all scoreboard digits.
fn scoreboard_sweep(board: &mut Board) -> IctResult {
    for code in 0x00..=0x0F {
        for digit in SCOREBOARD_DIGITS {
            board.bus().write(digit, code)?;
        }
        board.clock().delay_ms(SCOREBOARD_HOLD_MS);
    }
    for digit in SCOREBOARD_DIGITS {
        board.bus().write(digit, SEGMENTS_ON)?;
    }
    Ok(Report::ok())
}

fn read_switches(board: &mut Board, port: AyPort) -> IctResult {
    let Some(ay) = board.aux() else {
        return Err(PortFault::new("No AY-3-8910").into());
    };
    let data = ay.read_port(board.bus(), port)?;
    Ok(Report::value(data))
}

fn dip_switch_a(board: &mut Board) -> IctResult {
    read_switches(board, AyPort::A)
}

fn dip_switch_b(board: &mut Board) -> IctResult {
    read_switches(board, AyPort::B)
}

static CUSTOM_FUNCTIONS: [CustomFunction<Board>; 3] = [
    CustomFunction::new("DIP Sw. A", dip_switch_a),
    CustomFunction::new("DIP Sw. B", dip_switch_b),
    CustomFunction::new("Scoreboard", scoreboard_sweep),
];

// ---------------------------------------------------------------------------
// Family
// ---------------------------------------------------------------------------

pub static LASERDISC: Family = Family {
    name: "Cinematronics LD",
    regions: RegionMap {
        ram: &RAM,
        ram_byte_only: &RAM,
        ram_write_only: &[],
        input: &INPUTS,
        output: &OUTPUTS,
    },
    custom_functions: &CUSTOM_FUNCTIONS,
    interrupt: InterruptProtocol::AcknowledgeCycle(AcknowledgeCycle {
        passes: 10,
        timeout_ms: 1000,
        min_period_ms: 31,
        max_period_ms: 35,
    }),
    interrupt_line: InterruptLine::Irq0,
    interrupt_auto_vectored: true,
    interrupt_period_ms: 33,
};
