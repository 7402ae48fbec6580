use phosphor_ict_boards::{Board, Variant};
use phosphor_ict_boards::dragons_lair::{SET_DLE21, SET_F, SET_F2};
use phosphor_ict_boards::laserdisc::{LASERDISC, SCOREBOARD_HOLD_MS, SEGMENTS_ON};
use phosphor_ict_boards::space_ace::{SET_A, SET_SAE10};
use phosphor_ict_core::core::{BusTiming, Game};
use phosphor_ict_core::engine::{self, Step};
use phosphor_ict_core::error::{IctError, Report};
use phosphor_ict_core::sim::SimBoard;

const DIP_A: usize = 0;
const DIP_B: usize = 1;
const SCOREBOARD: usize = 2;

// Laserdisc PCB with the sound chip socket left empty.
static NO_AY: Variant = Variant {
    family: &LASERDISC,
    name: "LD no AY",
    roms: &[],
    timing: BusTiming::IoWaitState,
    aux: None,
};

fn laserdisc_sim() -> SimBoard {
    SimBoard::for_protocol(&LASERDISC.interrupt, LASERDISC.interrupt_period_ms)
}

// =================================================================
// Construction
// =================================================================

#[test]
fn test_construction_opens_with_wait_state_and_idles() {
    let sim = laserdisc_sim();
    let board = Board::new(&SET_F2, &mut sim.probe()).unwrap();
    assert_eq!(board.name(), "DrgnsLair F2");
    assert_eq!(sim.opened(), vec![BusTiming::IoWaitState]);
    assert_eq!(sim.idles(), 1);
    assert!(sim.writes().is_empty());
}

#[test]
fn test_construction_fails_when_port_cannot_idle() {
    let sim = laserdisc_sim();
    sim.fail_idle();
    let result = Board::new(&SET_F, &mut sim.probe());
    assert!(matches!(result, Err(IctError::Bus(_))));
}

#[test]
fn test_selector_names_fit_display() {
    for variant in [&SET_F, &SET_F2, &SET_DLE21, &SET_A, &SET_SAE10] {
        assert!(variant.name.len() <= 15, "{}", variant.name);
    }
}

// =================================================================
// Shared family contract
// =================================================================

#[test]
fn test_siblings_share_regions_and_functions() {
    let sim = laserdisc_sim();
    let dragons_lair = Board::new(&SET_F, &mut sim.probe()).unwrap();
    let space_ace = Board::new(&SET_A, &mut sim.probe()).unwrap();

    assert!(std::ptr::eq(SET_F.family, SET_A.family));
    assert_eq!(dragons_lair.regions(), space_ace.regions());
    assert_eq!(
        dragons_lair.custom_function_labels(),
        space_ace.custom_function_labels()
    );
    assert_eq!(dragons_lair.interrupt_line(), space_ace.interrupt_line());
    assert_ne!(dragons_lair.rom_regions(), space_ace.rom_regions());
}

#[test]
fn test_revisions_differ_only_in_checksums() {
    for (f, f2) in SET_F.roms.iter().zip(SET_F2.roms) {
        assert_eq!(f.start, f2.start);
        assert_eq!(f.data2n, f2.data2n);
    }
    assert_ne!(SET_F.roms[0].crc32, SET_F2.roms[0].crc32);
    assert_eq!(SET_F.roms[1].crc32, SET_F2.roms[1].crc32);
}

#[test]
fn test_program_ram_in_both_tables() {
    let regions = &LASERDISC.regions;
    assert_eq!(regions.ram[0].start, 0xA000);
    assert_eq!(regions.ram[0].end, 0xA7FF);
    assert_eq!(regions.ram, regions.ram_byte_only);
    assert!(regions.ram_write_only.is_empty());
}

// =================================================================
// Custom functions
// =================================================================

#[test]
fn test_custom_functions_quick_checks_first() {
    let sim = laserdisc_sim();
    let board = Board::new(&SET_DLE21, &mut sim.probe()).unwrap();
    assert_eq!(
        board.custom_function_labels(),
        vec!["DIP Sw. A", "DIP Sw. B", "Scoreboard"]
    );
}

#[test]
fn test_scoreboard_sweeps_all_codes() {
    let sim = laserdisc_sim();
    let mut board = Board::new(&SET_F2, &mut sim.probe()).unwrap();

    let result = board.run_custom_function(SCOREBOARD).unwrap();
    assert_eq!(result, Ok(Report::ok()));

    let writes = sim.writes();
    assert_eq!(writes.len(), 16 * 16 + 16);
    // First code lands on every digit in order.
    for (digit, &(addr, data)) in writes[..16].iter().enumerate() {
        assert_eq!(addr, 0xE030 + digit as u16);
        assert_eq!(data, 0x00);
    }
    assert_eq!(writes[16 * 15], (0xE030, 0x0F));
    assert!(writes[16 * 16..].iter().all(|&(_, data)| data == SEGMENTS_ON));
    assert_eq!(sim.now(), 16 * SCOREBOARD_HOLD_MS);
    // Bus left idle afterwards.
    assert_eq!(sim.idles(), 2);
}

#[test]
fn test_scoreboard_stops_at_failed_write() {
    let sim = laserdisc_sim();
    let mut board = Board::new(&SET_A, &mut sim.probe()).unwrap();
    sim.fail_write_at(100);

    let result = board.run_custom_function(SCOREBOARD).unwrap();
    assert!(matches!(result, Err(IctError::Bus(_))));
    assert_eq!(sim.writes().len(), 99);
    assert_eq!(sim.write_attempts(), 100);
    // Still idled after the failure.
    assert_eq!(sim.idles(), 2);
}

#[test]
fn test_dip_switch_readback() {
    let sim = laserdisc_sim();
    let mut board = Board::new(&SET_SAE10, &mut sim.probe()).unwrap();
    sim.poke(0xC000, 0xA5);

    let result = board.run_custom_function(DIP_A).unwrap();
    assert_eq!(result, Ok(Report::value(0xA5)));
    assert_eq!(
        sim.writes(),
        vec![(0xE010, 0x07), (0xE000, 0x3F), (0xE010, 0x0E)]
    );

    sim.clear_writes();
    board.run_custom_function(DIP_B).unwrap().unwrap();
    assert_eq!(sim.writes()[2], (0xE010, 0x0F));
}

#[test]
fn test_dip_switch_needs_fitted_sound_chip() {
    let sim = laserdisc_sim();
    sim.poke(0xC000, 0x3C);

    let mut bare = Board::new(&NO_AY, &mut sim.probe()).unwrap();
    assert!(bare.aux().is_none());
    let result = bare.run_custom_function(DIP_A).unwrap();
    assert!(matches!(result, Err(IctError::Bus(_))));
    assert!(sim.writes().is_empty());

    let mut fitted = Board::new(&SET_F, &mut sim.probe()).unwrap();
    assert_eq!(fitted.aux(), SET_F.aux);
    assert_eq!(
        fitted.run_custom_function(DIP_A).unwrap(),
        Ok(Report::value(0x3C))
    );
}

#[test]
fn test_unknown_custom_function() {
    let sim = laserdisc_sim();
    let mut board = Board::new(&SET_F, &mut sim.probe()).unwrap();
    assert!(board.run_custom_function(3).is_none());
}

// =================================================================
// Interrupt handshake
// =================================================================

#[test]
fn test_interrupt_check_passes_at_nominal_rate() {
    let sim = laserdisc_sim();
    let mut board = Board::new(&SET_F, &mut sim.probe()).unwrap();
    assert_eq!(board.interrupt_check(), Ok(Report::ok()));
    assert!(board.interrupt_auto_vectored());
}

#[test]
fn test_interrupt_check_flags_slow_timer() {
    let sim = SimBoard::with_period(40);
    let mut board = Board::new(&SET_F, &mut sim.probe()).unwrap();
    let err = board.interrupt_check().unwrap_err();
    assert_eq!(err.to_string(), "E:Bad period 28 ms, want 1F-23");
}

// =================================================================
// Full walk
// =================================================================

#[test]
fn test_full_walk_passes_on_healthy_board() {
    let sim = laserdisc_sim();
    sim.seed_spot_checks(SET_DLE21.roms);
    let mut board = Board::new(&SET_DLE21, &mut sim.probe()).unwrap();

    let findings = engine::walk(&mut board, &Step::ALL, true);
    for finding in &findings {
        assert!(finding.passed(), "{}: {:?}", finding.label, finding.result);
    }
    let last = findings.last().unwrap();
    assert_eq!(last.step, Step::Interrupt);
}
