use phosphor_ict_core::core::{BusPort, InterruptLine};
use phosphor_ict_core::error::{IctError, Report};
use phosphor_ict_core::interrupt::{InterruptProtocol, MaskRegister};
use phosphor_ict_core::sim::SimBoard;
mod common;
use common::ACK_33MS;

const VBLANK_LATCH: MaskRegister = MaskRegister {
    control: 0x7001,
    unmask: 0x01,
    mask: 0x00,
    iterations: 4,
    timeout_ms: 1000,
};

// ============================================================
// Mask-register handshake
// ============================================================

#[test]
fn test_mask_register_passes_on_healthy_latch() {
    let sim = SimBoard::with_period(16);
    sim.mask_register(0x7001, 0x01);
    let mut bus = sim.bus();
    let clock = sim.clock();

    let result = VBLANK_LATCH.run(&mut bus, &clock, InterruptLine::Nmi);
    assert_eq!(result, Ok(Report::ok()));

    // Four iterations of unmask, mask, unmask, mask.
    let writes = sim.writes();
    assert_eq!(writes.len(), 16);
    assert!(writes.iter().all(|&(addr, _)| addr == 0x7001));
    assert_eq!(&writes[..4], &[(0x7001, 1), (0x7001, 0), (0x7001, 1), (0x7001, 0)]);
}

#[test]
fn test_mask_register_fails_when_masked_line_asserts() {
    let sim = SimBoard::with_period(16);
    sim.mask_register(0x7001, 0x01);
    sim.assert_while_masked(true);
    let mut bus = sim.bus();
    let clock = sim.clock();

    let result = VBLANK_LATCH.run(&mut bus, &clock, InterruptLine::Nmi);
    assert_eq!(
        result,
        Err(IctError::UnexpectedSignal {
            line: InterruptLine::Nmi,
            phase: "masked"
        })
    );
    // Failed in the first iteration: unmask, mask, nothing more.
    assert_eq!(sim.writes(), vec![(0x7001, 1), (0x7001, 0)]);
}

#[test]
fn test_mask_register_times_out_without_interrupt() {
    // Nothing fires within the 1000 ms window.
    let sim = SimBoard::with_period(5000);
    sim.mask_register(0x7001, 0x01);
    let mut bus = sim.bus();
    let clock = sim.clock();

    let result = VBLANK_LATCH.run(&mut bus, &clock, InterruptLine::Nmi);
    assert_eq!(
        result,
        Err(IctError::Timeout {
            line: InterruptLine::Nmi,
            elapsed_ms: 1000
        })
    );
}

#[test]
fn test_mask_register_detects_latch_that_ignores_mask() {
    // Control register not wired: writes never reach the latch, so the
    // interrupt keeps latching and shows up right after the mask write.
    let sim = SimBoard::with_period(16);
    let mut bus = sim.bus();
    let clock = sim.clock();

    let result = VBLANK_LATCH.run(&mut bus, &clock, InterruptLine::Nmi);
    assert!(matches!(result, Err(IctError::UnexpectedSignal { .. })));
}

#[test]
fn test_mask_register_detects_uncleared_latch() {
    // Mask write hides the line but leaves the request latched.
    let sim = SimBoard::with_period(16);
    sim.mask_register(0x7001, 0x01);
    sim.mask_blinds_only(true);
    let mut bus = sim.bus();
    let clock = sim.clock();

    let result = VBLANK_LATCH.run(&mut bus, &clock, InterruptLine::Nmi);
    assert_eq!(
        result,
        Err(IctError::UnexpectedSignal {
            line: InterruptLine::Nmi,
            phase: "latch not cleared"
        })
    );
    // Unmask, mask, then the re-unmask that exposes the old request.
    assert_eq!(sim.writes(), vec![(0x7001, 1), (0x7001, 0), (0x7001, 1)]);
}

#[test]
fn test_mask_register_detects_late_assert_while_masked() {
    // The latch clears properly but keeps catching interrupts while
    // masked, so only the long masked wait sees the line.
    let sim = SimBoard::with_period(16);
    sim.mask_register(0x7001, 0x01);
    sim.latch_while_masked(true);
    let mut bus = sim.bus();
    let clock = sim.clock();

    let result = VBLANK_LATCH.run(&mut bus, &clock, InterruptLine::Nmi);
    assert_eq!(
        result,
        Err(IctError::UnexpectedSignal {
            line: InterruptLine::Nmi,
            phase: "masked"
        })
    );
    assert_eq!(
        sim.writes(),
        vec![(0x7001, 1), (0x7001, 0), (0x7001, 1), (0x7001, 0)]
    );
    // Caught at the next VBLANK, well inside the 1000 ms window.
    assert_eq!(sim.now(), 32);
}

// ============================================================
// Acknowledge-cycle handshake
// ============================================================

#[test]
fn test_ack_cycle_passes_at_33ms() {
    let sim = SimBoard::with_period(33);
    let mut bus = sim.bus();
    let clock = sim.clock();

    let result = ACK_33MS.run(&mut bus, &clock, InterruptLine::Irq0);
    assert_eq!(result, Ok(Report::ok()));
    // One acknowledge on entry plus one per pass.
    assert_eq!(sim.acknowledges(), 11);
    assert_eq!(sim.now(), 330);
}

#[test]
fn test_ack_cycle_reports_40ms_interval() {
    let sim = SimBoard::with_period(33);
    sim.schedule(&[33, 33, 33, 40]);
    let mut bus = sim.bus();
    let clock = sim.clock();

    let result = ACK_33MS.run(&mut bus, &clock, InterruptLine::Irq0);
    let err = result.unwrap_err();
    assert_eq!(
        err,
        IctError::OutOfTolerance {
            measured_ms: 0x28,
            min_ms: 31,
            max_ms: 35
        }
    );
    assert!(err.to_string().contains("28"));
    // Aborted at the fourth pass.
    assert_eq!(sim.acknowledges(), 5);
}

#[test]
fn test_ack_cycle_ignores_first_interval() {
    // Entry acknowledge lands mid-period: first interval is short.
    let sim = SimBoard::with_period(33);
    sim.schedule(&[7]);
    let mut bus = sim.bus();
    let clock = sim.clock();

    assert!(ACK_33MS.run(&mut bus, &clock, InterruptLine::Irq0).is_ok());
}

#[test]
fn test_ack_cycle_first_pass_must_still_arrive() {
    let sim = SimBoard::with_period(33);
    sim.schedule(&[1500]);
    let mut bus = sim.bus();
    let clock = sim.clock();

    let result = ACK_33MS.run(&mut bus, &clock, InterruptLine::Irq0);
    assert_eq!(
        result,
        Err(IctError::Timeout {
            line: InterruptLine::Irq0,
            elapsed_ms: 1000
        })
    );
}

#[test]
fn test_ack_cycle_short_interval_fails() {
    let sim = SimBoard::with_period(33);
    sim.schedule(&[33, 20]);
    let mut bus = sim.bus();
    let clock = sim.clock();

    let result = ACK_33MS.run(&mut bus, &clock, InterruptLine::Irq0);
    assert!(matches!(
        result,
        Err(IctError::OutOfTolerance { measured_ms: 20, .. })
    ));
}

#[test]
fn test_ack_cycle_across_clock_wrap() {
    let sim = SimBoard::with_period(33);
    sim.set_now(u32::MAX - 100);
    let mut bus = sim.bus();
    let clock = sim.clock();

    assert!(ACK_33MS.run(&mut bus, &clock, InterruptLine::Irq0).is_ok());
}

#[test]
fn test_protocol_quiesce_masks_latch() {
    let sim = SimBoard::with_period(16);
    sim.mask_register(0x7001, 0x01);
    let mut bus = sim.bus();
    let protocol = InterruptProtocol::MaskRegister(VBLANK_LATCH);

    bus.write(0x7001, 0x01).unwrap();
    assert!(!sim.is_masked());
    protocol.quiesce(&mut bus).unwrap();
    assert!(sim.is_masked());
}
