//! Space Ace ROM sets on the laserdisc PCB.
//!
//! Five 8 KB program EPROMs at U1-U5 (0x0000-0x9FFF). The A2 and A3
//! revisions change only U1.

use phosphor_ict_core::core::{BusTiming, Game, Probe};
use phosphor_ict_core::error::IctResult;
use phosphor_ict_core::region::RomRegion;

use crate::board::{Board, Variant};
use crate::laserdisc::{AY, LASERDISC};
use crate::registry::GameEntry;

const fn rom(start: u16, location: &'static str, data2n: &'static [u8], crc32: u32) -> RomRegion {
    RomRegion {
        bank: None,
        start,
        length: 0x2000,
        data2n,
        crc32,
        location,
    }
}

const A_U1: &[u8] = &[0x3F, 0xE0, 0xCC, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x21, 0x01, 0x3E, 0xFF, 0xFF];
const A_U2: &[u8] = &[0xC1, 0xE6, 0xCB, 0x01, 0xCD, 0x0F, 0x4B, 0xE6, 0x8D, 0xE0, 0x01, 0x13, 0x1D];
const A_U3: &[u8] = &[0x00, 0x13, 0x01, 0x84, 0x00, 0x00, 0x1A, 0x01, 0x1A, 0x1C, 0x45, 0xFF, 0x01];
const A_U4: &[u8] = &[0x1B, 0x2F, 0x12, 0x24, 0x01, 0x15, 0x99, 0x1C, 0x16, 0xFF, 0x13, 0x82, 0xFF];
const A_U5: &[u8] = &[0x63, 0x10, 0x24, 0x63, 0x20, 0x80, 0x84, 0x01, 0x12, 0x49, 0xFF, 0x32, 0x1D];

// U1 differs between A, A2 and A3.
const fn roms_a(u1_crc: u32) -> [RomRegion; 5] {
    [
        rom(0x0000, "rU1", A_U1, u1_crc),
        rom(0x2000, "rU2", A_U2, 0x18D0_262D),
        rom(0x4000, "rU3", A_U3, 0x4646_832D),
        rom(0x6000, "rU4", A_U4, 0x57DB_2A79),
        rom(0x8000, "rU5", A_U5, 0x85CB_CDC4),
    ]
}

// ---------------------------------------------------------------------------
// ROM sets
// ---------------------------------------------------------------------------

static ROMS_A: [RomRegion; 5] = roms_a(0x8EB1_889E);
static ROMS_A2: [RomRegion; 5] = roms_a(0x71B3_9E27);
static ROMS_A3: [RomRegion; 5] = roms_a(0x4275_22D0);

static ROMS_SAE10: [RomRegion; 5] = [
    rom(
        0x0000,
        "rU1",
        &[0x3F, 0xE0, 0xCC, 0xFF, 0xFF, 0xFF, 0x20, 0x41, 0x21, 0x01, 0x3E, 0x21, 0xFF],
        0xCBC5_E425,
    ),
    rom(
        0x2000,
        "rU2",
        &[0x70, 0x61, 0x65, 0x65, 0x6E, 0x2D, 0x62, 0x74, 0x20, 0x2E, 0x01, 0x01, 0x00],
        0x71A2_6F47,
    ),
    rom(
        0x4000,
        "rU3",
        &[0x70, 0x61, 0x65, 0x65, 0x6E, 0x2D, 0x62, 0x74, 0x20, 0x2E, 0x17, 0x13, 0x23],
        0xBAC5_CDD8,
    ),
    rom(
        0x6000,
        "rU4",
        &[0x70, 0x61, 0x65, 0x65, 0x6E, 0x2D, 0x62, 0x74, 0x20, 0x2E, 0x5E, 0x0A, 0x00],
        0xE183_80F9,
    ),
    rom(
        0x8000,
        "rU5",
        &[0x70, 0x61, 0x65, 0x65, 0x6E, 0x2D, 0x62, 0x74, 0x20, 0x2E, 0x11, 0x17, 0xFF],
        0x8A53_6CB0,
    ),
];

pub static SET_A: Variant = Variant {
    family: &LASERDISC,
    name: "Space Ace A",
    roms: &ROMS_A,
    timing: BusTiming::IoWaitState,
    aux: Some(AY),
};

pub static SET_A2: Variant = Variant {
    family: &LASERDISC,
    name: "Space Ace A2",
    roms: &ROMS_A2,
    timing: BusTiming::IoWaitState,
    aux: Some(AY),
};

pub static SET_A3: Variant = Variant {
    family: &LASERDISC,
    name: "Space Ace A3",
    roms: &ROMS_A3,
    timing: BusTiming::IoWaitState,
    aux: Some(AY),
};

pub static SET_SAE10: Variant = Variant {
    family: &LASERDISC,
    name: "Space Ace SAE10",
    roms: &ROMS_SAE10,
    timing: BusTiming::IoWaitState,
    aux: Some(AY),
};

// ---------------------------------------------------------------------------
// Game registry
// ---------------------------------------------------------------------------

pub fn create_set_a(probe: &mut dyn Probe) -> IctResult<Box<dyn Game>> {
    Board::create(&SET_A, probe)
}

pub fn create_set_a2(probe: &mut dyn Probe) -> IctResult<Box<dyn Game>> {
    Board::create(&SET_A2, probe)
}

pub fn create_set_a3(probe: &mut dyn Probe) -> IctResult<Box<dyn Game>> {
    Board::create(&SET_A3, probe)
}

pub fn create_set_sae10(probe: &mut dyn Probe) -> IctResult<Box<dyn Game>> {
    Board::create(&SET_SAE10, probe)
}

inventory::submit! {
    GameEntry::new("sace_a", &SET_A, create_set_a)
}

inventory::submit! {
    GameEntry::new("sace_a2", &SET_A2, create_set_a2)
}

inventory::submit! {
    GameEntry::new("sace_a3", &SET_A3, create_set_a3)
}

inventory::submit! {
    GameEntry::new("sace_sae10", &SET_SAE10, create_set_sae10)
}
