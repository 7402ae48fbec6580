use phosphor_ict_core::core::{BusPort, Clock, CustomFunction, Game, InterruptLine};
use phosphor_ict_core::error::{IctResult, Report};
use phosphor_ict_core::interrupt::{AcknowledgeCycle, InterruptProtocol};
use phosphor_ict_core::region::{InputRegion, OutputRegion, RamRegion, RegionMap, RomRegion};
use phosphor_ict_core::sim::{SimBoard, SimBus, SimClock};

pub const ACK_33MS: AcknowledgeCycle = AcknowledgeCycle {
    passes: 10,
    timeout_ms: 1000,
    min_period_ms: 31,
    max_period_ms: 35,
};

static RAM: [RamRegion; 1] = [RamRegion {
    bank: None,
    start: 0x8000,
    end: 0x80FF,
    width: 1,
    mask: 0xFF,
    location: " U1",
    description: "Work  ",
}];

static RAM_NIBBLE: [RamRegion; 1] = [RamRegion {
    bank: None,
    start: 0x9000,
    end: 0x903F,
    width: 1,
    mask: 0x0F,
    location: " U2",
    description: "Color ",
}];

static INPUT: [InputRegion; 2] = [
    InputRegion {
        bank: None,
        address: 0xC000,
        mask: 0xFF,
        location: " U5",
        description: "IN0   ",
    },
    InputRegion {
        bank: None,
        address: 0xC000,
        mask: 0x01,
        location: " U5",
        description: "Coin  ",
    },
];

static OUTPUT: [OutputRegion; 1] = [OutputRegion {
    bank: None,
    address: 0xD000,
    value: 0x01,
    mask: 0xFF,
    location: " U6",
    description: "Lamp  ",
}];

pub static REGIONS: RegionMap = RegionMap {
    ram: &RAM,
    ram_byte_only: &RAM_NIBBLE,
    ram_write_only: &[],
    input: &INPUT,
    output: &OUTPUT,
};

pub static ROMS: [RomRegion; 1] = [RomRegion {
    bank: None,
    start: 0x0000,
    length: 0x1000,
    data2n: &[0x31, 0x00, 0xC3, 0x18, 0x7E, 0x23, 0xFE, 0x01, 0x10, 0x20, 0xCD, 0xC9],
    crc32: 0xDEAD_BEEF,
    location: " U4",
}];

fn touch_lamp(game: &mut TestGame) -> IctResult {
    game.bus.write(0xD000, 0x00)?;
    Ok(Report::ok())
}

fn hold(game: &mut TestGame) -> IctResult {
    game.clock.delay_ms(10);
    Ok(Report::note("held"))
}

static CUSTOM: [CustomFunction<TestGame>; 2] = [
    CustomFunction::new("Lamp", touch_lamp),
    CustomFunction::new("Hold", hold),
];

/// Minimal game over a simulated board.
pub struct TestGame {
    pub bus: SimBus,
    pub clock: SimClock,
    protocol: InterruptProtocol,
}

impl TestGame {
    pub fn new(sim: &SimBoard) -> Self {
        Self {
            bus: sim.bus(),
            clock: sim.clock(),
            protocol: InterruptProtocol::AcknowledgeCycle(ACK_33MS),
        }
    }
}

impl Game for TestGame {
    fn name(&self) -> &'static str {
        "Test board"
    }

    fn regions(&self) -> &'static RegionMap {
        &REGIONS
    }

    fn rom_regions(&self) -> &'static [RomRegion] {
        &ROMS
    }

    fn custom_function_labels(&self) -> Vec<&'static str> {
        CUSTOM.iter().map(|f| f.label).collect()
    }

    fn run_custom_function(&mut self, index: usize) -> Option<IctResult> {
        let function = CUSTOM.get(index)?;
        Some((function.run)(self))
    }

    fn interrupt_check(&mut self) -> IctResult {
        self.protocol
            .run(&mut self.bus, &self.clock, InterruptLine::Irq0)
    }

    fn interrupt_line(&self) -> InterruptLine {
        InterruptLine::Irq0
    }

    fn interrupt_auto_vectored(&self) -> bool {
        true
    }

    fn bus(&mut self) -> &mut dyn BusPort {
        &mut self.bus
    }
}
