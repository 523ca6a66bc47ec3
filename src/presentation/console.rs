// Console surface - operator prompts and alert lines
use crate::application::evaluator::FindingSink;
use crate::application::location_editor::OperatorConsole;
use crate::domain::alert::{Breach, Finding};
use crate::domain::forecast::WeatherSnapshot;
use async_trait::async_trait;
use std::io::{self, BufRead, Write};
use tokio::sync::mpsc;

/// Reads stdin on a dedicated thread so a pending read never holds up the runtime.
pub struct StdioConsole {
    lines: mpsc::Receiver<io::Result<String>>,
}

impl StdioConsole {
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::channel(1);
        std::thread::spawn(move || {
            for line in io::stdin().lock().lines() {
                if tx.blocking_send(line).is_err() {
                    break;
                }
            }
        });
        Self { lines: rx }
    }
}

#[async_trait]
impl OperatorConsole for StdioConsole {
    async fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        {
            let mut stdout = io::stdout().lock();
            stdout.write_all(prompt.as_bytes())?;
            stdout.flush()?;
        }
        self.lines.recv().await.transpose()
    }

    fn tell(&mut self, message: &str) {
        print_line(&mut io::stdout().lock(), message);
    }
}

/// A closed or broken stdout is logged, never a panic.
fn print_line(out: &mut impl Write, line: &str) -> bool {
    match writeln!(out, "{}", line) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Failed to write to console: {}", e);
            false
        }
    }
}

/// Prints findings to stdout, one line per time point
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleAlerts;

impl FindingSink for ConsoleAlerts {
    fn emit(&self, snapshot: &WeatherSnapshot, findings: &[Finding]) {
        let place = snapshot
            .location
            .map(|l| l.to_string())
            .unwrap_or_else(|| "unknown location".to_string());

        let mut stdout = io::stdout().lock();
        for finding in findings {
            if !print_line(&mut stdout, &format_finding(&place, finding)) {
                return;
            }
        }
    }
}

pub fn format_finding(place: &str, finding: &Finding) -> String {
    let point = &finding.point;
    if !finding.is_alert() {
        return format!(
            "{} {}: temperature {:.1}°C, rain {:.1} mm",
            point.timestamp, place, point.temperature_celsius, point.rainfall_mm
        );
    }

    let reasons: Vec<String> = finding.breaches.iter().map(format_breach).collect();
    format!("ALERT {} {}: {}", point.timestamp, place, reasons.join("; "))
}

fn format_breach(breach: &Breach) -> String {
    match breach {
        Breach::LowTemperature { celsius, threshold } => {
            format!("low temperature {:.1}°C (below {:.1}°C)", celsius, threshold)
        }
        Breach::Rainfall { mm, threshold } => {
            format!("rainfall {:.1} mm (above {:.1} mm)", mm, threshold)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::forecast::ForecastPoint;

    #[test]
    fn test_format_low_temperature_alert() {
        let finding = Finding {
            point: ForecastPoint::new("2024-01-01T00:00", 5.0, 0.0),
            breaches: vec![Breach::LowTemperature {
                celsius: 5.0,
                threshold: 10.0,
            }],
        };
        assert_eq!(
            format_finding("(51.10, 17.03)", &finding),
            "ALERT 2024-01-01T00:00 (51.10, 17.03): low temperature 5.0°C (below 10.0°C)"
        );
    }

    #[test]
    fn test_format_combined_alert() {
        let finding = Finding {
            point: ForecastPoint::new("2024-01-01T01:00", 3.0, 2.0),
            breaches: vec![
                Breach::LowTemperature {
                    celsius: 3.0,
                    threshold: 10.0,
                },
                Breach::Rainfall {
                    mm: 2.0,
                    threshold: 0.0,
                },
            ],
        };
        let line = format_finding("here", &finding);
        assert!(line.ends_with(
            "low temperature 3.0°C (below 10.0°C); rainfall 2.0 mm (above 0.0 mm)"
        ));
    }

    #[test]
    fn test_format_report_line() {
        let finding = Finding {
            point: ForecastPoint::new("2024-01-01T02:00", 15.0, 0.0),
            breaches: vec![],
        };
        assert_eq!(
            format_finding("here", &finding),
            "2024-01-01T02:00 here: temperature 15.0°C, rain 0.0 mm"
        );
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
    }

    #[test]
    fn test_print_line_survives_broken_pipe() {
        assert!(!print_line(&mut BrokenPipe, "Location set to (10.00, 20.00)"));
    }

    #[test]
    fn test_print_line_appends_newline() {
        let mut out = Vec::new();
        assert!(print_line(&mut out, "Rejected: latitude 91 is out of range"));
        assert_eq!(out, b"Rejected: latitude 91 is out of range\n");
    }
}
