//! Simulated scan with a fake progress bar.
//!
//! Nothing is actually analysed: progress advances by random steps on a
//! fixed interval, and the report is drawn from canned findings.

use chrono::{DateTime, Local};
use rand::Rng;
use rand::seq::SliceRandom;
use skywatch_config::ScanSettings;

/// Data source the scan pretends to analyse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Source {
    #[default]
    HttpLogs,
    SystemLogs,
    Pcap,
    CsvDataset,
}

impl Source {
    /// Cycle to the next source.
    pub fn next(&self) -> Self {
        match self {
            Source::HttpLogs => Source::SystemLogs,
            Source::SystemLogs => Source::Pcap,
            Source::Pcap => Source::CsvDataset,
            Source::CsvDataset => Source::HttpLogs,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Source::HttpLogs => "HTTP Logs",
            Source::SystemLogs => "System Logs",
            Source::Pcap => "PCAP",
            Source::CsvDataset => "CSV Dataset",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Source::HttpLogs => "🌐",
            Source::SystemLogs => "🖥",
            Source::Pcap => "📡",
            Source::CsvDataset => "📄",
        }
    }
}

/// Category of a canned finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindingKind {
    Anomaly,
    Intrusion,
}

/// A single line in a threat report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Finding {
    pub kind: FindingKind,
    pub text: &'static str,
}

const FINDINGS: [Finding; 4] = [
    Finding {
        kind: FindingKind::Anomaly,
        text: "Unusual traffic spike detected at 192.168.1.23",
    },
    Finding {
        kind: FindingKind::Anomaly,
        text: "Bandwidth usage exceeds normal baseline by 45%",
    },
    Finding {
        kind: FindingKind::Intrusion,
        text: "Suspicious port scan detected from 192.168.1.89",
    },
    Finding {
        kind: FindingKind::Intrusion,
        text: "3 failed authentication attempts from unknown device",
    },
];

/// Result of a finished scan.
#[derive(Debug, Clone)]
pub struct ScanReport {
    pub source: Source,
    pub finished_at: DateTime<Local>,
    /// Empty when no threats were found.
    pub findings: Vec<Finding>,
    pub devices: u32,
    pub packets: u32,
    pub duration_s: f32,
}

impl ScanReport {
    fn generate<R: Rng + ?Sized>(source: Source, threat_probability: f64, rng: &mut R) -> Self {
        let has_threat = rng.random_bool(threat_probability.clamp(0.0, 1.0));
        let findings = if has_threat {
            let mut pool = FINDINGS.to_vec();
            pool.shuffle(rng);
            pool.truncate(2);
            pool
        } else {
            Vec::new()
        };

        Self {
            source,
            finished_at: Local::now(),
            findings,
            devices: rng.random_range(8..18),
            packets: rng.random_range(30_000..80_000),
            duration_s: 6.0 + rng.random::<f32>() * 4.0,
        }
    }

    pub fn has_threats(&self) -> bool {
        !self.findings.is_empty()
    }

    /// Findings of one kind.
    pub fn findings_of(&self, kind: FindingKind) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.kind == kind)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Idle,
    Scanning { progress: u8, next_step_ms: u64 },
    Complete { reveal_at_ms: u64 },
}

/// Notable moments in a scan, reported by [`Scan::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanEvent {
    /// Progress reached 100%.
    Completed,
    /// The report is ready to be shown.
    Revealed,
}

/// Fake scan driven by the app clock.
#[derive(Debug)]
pub struct Scan {
    settings: ScanSettings,
    state: ScanState,
    source: Source,
    pending_report: Option<ScanReport>,
    report: Option<ScanReport>,
}

impl Scan {
    pub fn new(settings: ScanSettings) -> Self {
        Self {
            settings,
            state: ScanState::Idle,
            source: Source::default(),
            pending_report: None,
            report: None,
        }
    }

    /// Start scanning `source`. Returns `false` if a scan is already running.
    pub fn start(&mut self, source: Source, now_ms: u64) -> bool {
        if self.is_busy() {
            return false;
        }
        self.source = source;
        self.report = None;
        self.state = ScanState::Scanning {
            progress: 0,
            next_step_ms: now_ms.saturating_add(self.settings.step_ms),
        };
        tracing::info!(source = source.label(), "scan started");
        true
    }

    /// Advance the scan to `now_ms`.
    pub fn tick<R: Rng + ?Sized>(&mut self, now_ms: u64, rng: &mut R) -> Option<ScanEvent> {
        match self.state {
            ScanState::Idle => None,
            ScanState::Scanning {
                mut progress,
                mut next_step_ms,
            } => {
                while next_step_ms <= now_ms {
                    progress = progress.saturating_add(rng.random_range(5..=16)).min(100);
                    if progress >= 100 {
                        self.state = ScanState::Complete {
                            reveal_at_ms: next_step_ms
                                .saturating_add(self.settings.reveal_delay_ms),
                        };
                        self.pending_report = Some(ScanReport::generate(
                            self.source,
                            self.settings.threat_probability,
                            rng,
                        ));
                        tracing::info!(source = self.source.label(), "scan complete");
                        return Some(ScanEvent::Completed);
                    }
                    next_step_ms = next_step_ms.saturating_add(self.settings.step_ms.max(1));
                }
                self.state = ScanState::Scanning {
                    progress,
                    next_step_ms,
                };
                None
            }
            ScanState::Complete { reveal_at_ms } if reveal_at_ms <= now_ms => {
                self.state = ScanState::Idle;
                self.report = self.pending_report.take();
                Some(ScanEvent::Revealed)
            }
            ScanState::Complete { .. } => None,
        }
    }

    /// Whether a scan is running or waiting to reveal its report.
    pub fn is_busy(&self) -> bool {
        self.state != ScanState::Idle
    }

    /// Progress in percent.
    pub fn progress(&self) -> u8 {
        match self.state {
            ScanState::Idle => 0,
            ScanState::Scanning { progress, .. } => progress,
            ScanState::Complete { .. } => 100,
        }
    }

    /// Stage description for the current progress.
    pub fn status_text(&self) -> &'static str {
        match self.state {
            ScanState::Idle => "",
            ScanState::Scanning { progress: 0, .. } => "Preparing scan…",
            ScanState::Scanning { progress, .. } => stage_text(progress),
            ScanState::Complete { .. } => "Scan complete",
        }
    }

    pub fn source(&self) -> Source {
        self.source
    }

    pub fn report(&self) -> Option<&ScanReport> {
        self.report.as_ref()
    }

    /// Close the results panel. Returns whether one was open.
    pub fn dismiss(&mut self) -> bool {
        self.report.take().is_some()
    }
}

fn stage_text(progress: u8) -> &'static str {
    if progress >= 100 {
        "Scan complete"
    } else if progress > 70 {
        "Running anomaly models…"
    } else if progress > 35 {
        "Parsing dataset…"
    } else {
        "Uploading…"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn run_to_completion(scan: &mut Scan, rng: &mut StdRng) -> u64 {
        let mut now = 0;
        loop {
            now += 180;
            if scan.tick(now, rng) == Some(ScanEvent::Completed) {
                return now;
            }
            assert!(now < 180 * 100, "scan never completed");
        }
    }

    #[test]
    fn test_stage_text_thresholds() {
        assert_eq!(stage_text(5), "Uploading…");
        assert_eq!(stage_text(35), "Uploading…");
        assert_eq!(stage_text(36), "Parsing dataset…");
        assert_eq!(stage_text(70), "Parsing dataset…");
        assert_eq!(stage_text(71), "Running anomaly models…");
        assert_eq!(stage_text(100), "Scan complete");
    }

    #[test]
    fn test_source_cycle() {
        let mut source = Source::default();
        for _ in 0..4 {
            source = source.next();
        }
        assert_eq!(source, Source::HttpLogs);
        assert_eq!(Source::Pcap.label(), "PCAP");
    }

    #[test]
    fn test_scan_completes_then_reveals() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut scan = Scan::new(ScanSettings::default());
        assert!(scan.start(Source::Pcap, 0));
        assert_eq!(scan.status_text(), "Preparing scan…");
        assert!(!scan.start(Source::HttpLogs, 10));

        let done = run_to_completion(&mut scan, &mut rng);
        assert_eq!(scan.progress(), 100);
        assert_eq!(scan.status_text(), "Scan complete");
        assert!(scan.report().is_none());
        assert!(scan.is_busy());

        assert_eq!(scan.tick(done + 299, &mut rng), None);
        assert_eq!(scan.tick(done + 300, &mut rng), Some(ScanEvent::Revealed));
        assert!(!scan.is_busy());
        let report = scan.report().unwrap();
        assert_eq!(report.source, Source::Pcap);
        assert!((8..18).contains(&report.devices));

        assert!(scan.dismiss());
        assert!(!scan.dismiss());
    }

    #[test]
    fn test_progress_steps_are_bounded() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut scan = Scan::new(ScanSettings::default());
        scan.start(Source::HttpLogs, 0);
        let mut last = 0;
        for step in 1..=6 {
            if scan.tick(step * 180, &mut rng).is_some() {
                break;
            }
            let progress = scan.progress();
            assert!((5..=16).contains(&(progress - last)));
            last = progress;
        }
    }

    #[test]
    fn test_late_tick_catches_up() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut scan = Scan::new(ScanSettings::default());
        scan.start(Source::CsvDataset, 0);
        assert_eq!(scan.tick(60_000, &mut rng), Some(ScanEvent::Completed));
        assert_eq!(scan.tick(60_000, &mut rng), Some(ScanEvent::Revealed));
    }

    #[test]
    fn test_huge_intervals_saturate() {
        let mut rng = StdRng::seed_from_u64(8);
        let settings = ScanSettings {
            step_ms: u64::MAX,
            reveal_delay_ms: u64::MAX,
            ..Default::default()
        };
        let mut scan = Scan::new(settings);
        assert!(scan.start(Source::Pcap, 10));
        assert_eq!(scan.tick(1_000_000, &mut rng), None);
        assert_eq!(scan.progress(), 0);
        assert!(scan.is_busy());
    }

    #[test]
    fn test_reveal_delay_saturates_after_completion() {
        let mut rng = StdRng::seed_from_u64(8);
        let settings = ScanSettings {
            reveal_delay_ms: u64::MAX,
            ..Default::default()
        };
        let mut scan = Scan::new(settings);
        scan.start(Source::HttpLogs, 0);
        assert_eq!(scan.tick(60_000, &mut rng), Some(ScanEvent::Completed));
        assert_eq!(scan.tick(u64::MAX - 1, &mut rng), None);
        assert!(scan.report().is_none());
    }

    #[test]
    fn test_threat_probability_extremes() {
        let mut rng = StdRng::seed_from_u64(3);
        let always = ScanReport::generate(Source::Pcap, 1.0, &mut rng);
        assert!(always.has_threats());
        assert_eq!(always.findings.len(), 2);
        let anomalies = always.findings_of(FindingKind::Anomaly).count();
        let intrusions = always.findings_of(FindingKind::Intrusion).count();
        assert_eq!(anomalies + intrusions, 2);

        let never = ScanReport::generate(Source::Pcap, 0.0, &mut rng);
        assert!(!never.has_threats());
    }
}
