//! Dragon's Lair ROM sets on the laserdisc PCB.
//!
//! Four 8 KB program EPROMs at U1-U4 (0x0000-0x7FFF). DLE 2.1 is the
//! enhancement set and fits only U1-U3.

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

// Spot bytes are shared by the F and F2 revisions; only the CRCs differ.
const F_U1: &[u8] = &[0x47, 0x11, 0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0x7E, 0x21, 0x01, 0x04, 0xFF, 0xFF];
const F_U2: &[u8] = &[0x06, 0x08, 0x09, 0x00, 0x00, 0x01, 0x07, 0x88, 0x0A, 0x53, 0x0A, 0x0B, 0x4A];
const F_U3: &[u8] = &[0x00, 0x00, 0x65, 0x04, 0x00, 0x16, 0x66, 0x5F, 0x69, 0x01, 0x06, 0x04, 0x51];
const F_U4: &[u8] = &[0x10, 0x17, 0x00, 0x10, 0x00, 0x80, 0x88, 0x0F, 0x40, 0x64, 0x00, 0x18, 0xFF];

// ---------------------------------------------------------------------------
// ROM sets
// ---------------------------------------------------------------------------

static ROMS_F: [RomRegion; 4] = [
    rom(0x0000, "rU1", F_U1, 0x06FC_6941),
    rom(0x2000, "rU2", F_U2, 0xDCC1_DFF2),
    rom(0x4000, "rU3", F_U3, 0xAB51_4E5B),
    rom(0x6000, "rU4", F_U4, 0xA817_324E),
];

static ROMS_F2: [RomRegion; 4] = [
    rom(0x0000, "rU1", F_U1, 0xF5EA_3B9D),
    rom(0x2000, "rU2", F_U2, 0xDCC1_DFF2),
    rom(0x4000, "rU3", F_U3, 0xAB51_4E5B),
    rom(0x6000, "rU4", F_U4, 0xF5EC_23D2),
];

static ROMS_DLE21: [RomRegion; 3] = [
    rom(
        0x0000,
        "rU1",
        &[0xA8, 0x0B, 0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0x7E, 0x21, 0x01, 0x04, 0xCB, 0xFF],
        0x4F8A_F481,
    ),
    rom(
        0x2000,
        "rU2",
        &[0x72, 0x61, 0x6F, 0x20, 0x45, 0x53, 0x30, 0x63, 0x20, 0x00, 0x04, 0x80, 0x59],
        0x5FCA_04C5,
    ),
    rom(
        0x4000,
        "rU3",
        &[0x72, 0x61, 0x6F, 0x20, 0x45, 0x53, 0x30, 0x63, 0x20, 0x0B, 0x45, 0x09, 0x91],
        0xC14F_36B3,
    ),
];

pub static SET_F: Variant = Variant {
    family: &LASERDISC,
    name: "DrgnsLair F",
    roms: &ROMS_F,
    timing: BusTiming::IoWaitState,
    aux: Some(AY),
};

pub static SET_F2: Variant = Variant {
    family: &LASERDISC,
    name: "DrgnsLair F2",
    roms: &ROMS_F2,
    timing: BusTiming::IoWaitState,
    aux: Some(AY),
};

pub static SET_DLE21: Variant = Variant {
    family: &LASERDISC,
    name: "DrgnsLair DLE21",
    roms: &ROMS_DLE21,
    timing: BusTiming::IoWaitState,
    aux: Some(AY),
};

// ---------------------------------------------------------------------------
// Game registry
// ---------------------------------------------------------------------------

pub fn create_set_f(probe: &mut dyn Probe) -> IctResult<Box<dyn Game>> {
    Board::create(&SET_F, probe)
}

pub fn create_set_f2(probe: &mut dyn Probe) -> IctResult<Box<dyn Game>> {
    Board::create(&SET_F2, probe)
}

pub fn create_set_dle21(probe: &mut dyn Probe) -> IctResult<Box<dyn Game>> {
    Board::create(&SET_DLE21, probe)
}

inventory::submit! {
    GameEntry::new("dlair_f", &SET_F, create_set_f)
}

inventory::submit! {
    GameEntry::new("dlair_f2", &SET_F2, create_set_f2)
}

inventory::submit! {
    GameEntry::new("dlair_dle21", &SET_DLE21, create_set_dle21)
}
