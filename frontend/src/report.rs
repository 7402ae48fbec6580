//! Session output, one line per check.

use phosphor_ict_boards::registry::GameEntry;
use phosphor_ict_core::engine::{Finding, Step};

fn step_name(step: Step) -> &'static str {
    match step {
        Step::Ram => "RAM",
        Step::Rom => "ROM",
        Step::Io => "I/O",
        Step::Custom => "Custom",
        Step::Interrupt => "Interrupt",
    }
}

/// `<step> <label> <code> <description>`; passing checks show `OK`.
pub fn finding_line(finding: &Finding) -> String {
    let (code, text) = match &finding.result {
        Ok(report) => ("OK", report.description.clone()),
        Err(err) => (err.code(), err.to_string()),
    };
    format!(
        "{:<9} {:<16} {:<3} {}",
        step_name(finding.step),
        finding.label,
        code,
        text
    )
}

pub fn summary(findings: &[Finding]) -> String {
    let failed = findings.iter().filter(|f| !f.passed()).count();
    format!("{} checks, {} failed", findings.len(), failed)
}

pub fn entry_line(entry: &GameEntry) -> String {
    let variant = entry.variant;
    format!(
        "{:<12} {:<16} {:<16} {} ROMs",
        entry.key,
        variant.name,
        variant.family.name,
        variant.roms.len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use phosphor_ict_core::core::InterruptLine;
    use phosphor_ict_core::error::{IctError, Report};

    #[test]
    fn passing_line() {
        let finding = Finding {
            step: Step::Io,
            label: "U14 Coin1 ".to_string(),
            result: Ok(Report::value(0x04)),
        };
        assert_eq!(finding_line(&finding), "I/O       U14 Coin1        OK  OK:04");
    }

    #[test]
    fn failing_line_carries_code() {
        let finding = Finding {
            step: Step::Interrupt,
            label: "NMI check".to_string(),
            result: Err(IctError::Timeout {
                line: InterruptLine::Nmi,
                elapsed_ms: 1000,
            }),
        };
        let line = finding_line(&finding);
        assert!(line.starts_with("Interrupt NMI check"));
        assert!(line.contains("TMO E:No NMI after"));
    }

    #[test]
    fn summary_counts_failures() {
        let pass = Finding {
            step: Step::Custom,
            label: "Scoreboard".to_string(),
            result: Ok(Report::ok()),
        };
        let fail = Finding {
            result: Err(IctError::Mismatch {
                address: 0x0002,
                expected: 0x11,
                actual: 0x00,
            }),
            ..pass.clone()
        };
        assert_eq!(summary(&[pass, fail]), "2 checks, 1 failed");
    }
}
