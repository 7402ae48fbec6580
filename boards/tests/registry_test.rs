use phosphor_ict_boards::registry;
use phosphor_ict_core::core::Game;
use phosphor_ict_core::engine::{self, Step};
use phosphor_ict_core::region::validate_roms;
use phosphor_ict_core::sim::SimBoard;

#[test]
fn test_all_sets_registered_in_key_order() {
    let keys: Vec<_> = registry::all().iter().map(|e| e.key).collect();
    assert_eq!(
        keys,
        vec![
            "dlair_dle21",
            "dlair_f",
            "dlair_f2",
            "galmidw",
            "sace_a",
            "sace_a2",
            "sace_a3",
            "sace_sae10",
            "superg",
        ]
    );
}

#[test]
fn test_find_by_key() {
    let entry = registry::find("sace_a3").unwrap();
    assert_eq!(entry.variant.name, "Space Ace A3");
    assert!(registry::find("pacman").is_none());
}

#[test]
fn test_every_set_is_well_formed() {
    for entry in registry::all() {
        entry.variant.family.regions.validate().unwrap();
        validate_roms(entry.variant.roms).unwrap();
        assert!(!entry.variant.name.is_empty() && entry.variant.name.len() <= 15);
    }
}

#[test]
fn test_factory_builds_named_game() {
    for entry in registry::all() {
        let sim = SimBoard::new();
        let game = (entry.create)(&mut sim.probe()).unwrap();
        assert_eq!(game.name(), entry.variant.name);
        assert_eq!(sim.opened(), vec![entry.variant.timing]);
    }
}

#[test]
fn test_custom_functions_each_run_once() {
    let entry = registry::find("dlair_f").unwrap();
    let sim = SimBoard::new();
    let mut game = (entry.create)(&mut sim.probe()).unwrap();

    let findings = engine::walk(game.as_mut(), &[Step::Custom], false);
    let labels: Vec<_> = findings.iter().map(|f| f.label.as_str()).collect();
    assert_eq!(labels, game.custom_function_labels());
}
