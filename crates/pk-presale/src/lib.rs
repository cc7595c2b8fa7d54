//! Presale math and the fabricated execution backend.
//!
//! Pure helpers for the widget (progress, amount formatting, countdown) and
//! [`JobSimulator`], which manufactures demo job results in place of a real
//! scheduler. The 1.5 s artificial delay belongs to the UI layer; everything
//! here is synchronous and takes the current time as input.

use pk_types::{JobStatus, SimulatedJob};
use rand::Rng;
use thiserror::Error;

/// Artificial delay the demo waits before a fabricated job "resolves".
pub const SIMULATED_JOB_DELAY_MS: u32 = 1_500;

/// Percentage of the sale completed, clamped to 100. A non-positive total
/// yields 0 rather than letting the division blow up to infinity.
pub fn calculate_progress(sold: f64, total: f64) -> f64 {
    if total <= 0.0 {
        return 0.0;
    }
    (sold / total * 100.0).min(100.0)
}

/// en-US style rendering: thousands separators, at most two fraction digits,
/// trailing zeros dropped (`1234567.5` → `"1,234,567.5"`).
pub fn format_token_amount(amount: f64) -> String {
    if !amount.is_finite() {
        return "0".to_owned();
    }

    let rendered = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = rendered
        .split_once('.')
        .unwrap_or((rendered.as_str(), ""));

    let mut out = String::new();
    if amount < 0.0 && rendered != "0.00" {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));

    let frac = frac_part.trim_end_matches('0');
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Time left until the sale ends, split for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl std::fmt::Display for Countdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}d {}h {}m {}s",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

/// `None` once the sale has ended.
pub fn countdown(now_ms: u64, end_ms: u64) -> Option<Countdown> {
    if end_ms <= now_ms {
        return None;
    }
    let diff = (end_ms - now_ms) / 1_000;
    Some(Countdown {
        days: diff / 86_400,
        hours: diff % 86_400 / 3_600,
        minutes: diff % 3_600 / 60,
        seconds: diff % 60,
    })
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SimulationError {
    #[error("simulated job was rejected")]
    Rejected,
}

/// Fabricates job results for the demo purchase flow.
///
/// The default simulator never fails, matching the always-succeeds demo
/// behavior; a failure rate can be dialed in to exercise the error path.
#[derive(Debug, Clone, Default)]
pub struct JobSimulator {
    failure_rate: f64,
}

impl JobSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_failure_rate(failure_rate: f64) -> Self {
        Self {
            failure_rate: failure_rate.clamp(0.0, 1.0),
        }
    }

    /// Produce a freshly fabricated job: `job_<epoch_ms>_<suffix>` id,
    /// status `Scheduled`, and a made-up 64-hex-digit transaction hash.
    /// The amount and address are accepted for contract fidelity but do not
    /// influence the result.
    pub fn schedule(
        &self,
        _token_amount: f64,
        _wallet_address: &str,
        now_ms: u64,
    ) -> Result<SimulatedJob, SimulationError> {
        let mut rng = rand::thread_rng();
        if self.failure_rate > 0.0 && rng.gen_bool(self.failure_rate) {
            return Err(SimulationError::Rejected);
        }

        Ok(SimulatedJob {
            id: format!("job_{}_{}", now_ms, random_base36(&mut rng, 9)),
            status: JobStatus::Scheduled,
            tx_hash: Some(fabricate_tx_hash(&mut rng)),
            timestamp_epoch_ms: now_ms,
        })
    }
}

fn random_base36(rng: &mut impl Rng, len: usize) -> String {
    const CHARSET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    (0..len)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect()
}

fn fabricate_tx_hash(rng: &mut impl Rng) -> String {
    let mut hash = String::with_capacity(66);
    hash.push_str("0x");
    for _ in 0..32 {
        let byte: u8 = rng.r#gen();
        hash.push_str(&format!("{byte:02x}"));
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_matches_ratio_and_clamps() {
        assert_eq!(calculate_progress(450_000.0, 1_000_000.0), 45.0);
        assert_eq!(calculate_progress(1_000_000.0, 1_000_000.0), 100.0);
        assert_eq!(calculate_progress(2_000_000.0, 1_000_000.0), 100.0);
        assert_eq!(calculate_progress(0.0, 1_000_000.0), 0.0);
    }

    #[test]
    fn progress_zero_total_is_zero_by_policy() {
        assert_eq!(calculate_progress(500.0, 0.0), 0.0);
        assert_eq!(calculate_progress(0.0, 0.0), 0.0);
        assert_eq!(calculate_progress(500.0, -1.0), 0.0);
    }

    #[test]
    fn progress_is_monotonic_in_sold() {
        let total = 1_000_000.0;
        let mut last = calculate_progress(0.0, total);
        for step in 1..=20 {
            let next = calculate_progress(step as f64 * 100_000.0, total);
            assert!(next >= last);
            last = next;
        }
    }

    #[test]
    fn formats_with_separators_and_two_fraction_digits() {
        assert_eq!(format_token_amount(1_234_567.5), "1,234,567.5");
        assert_eq!(format_token_amount(1_000_000.0), "1,000,000");
        assert_eq!(format_token_amount(999.0), "999");
        assert_eq!(format_token_amount(0.126), "0.13");
        assert_eq!(format_token_amount(1_234.567), "1,234.57");
        assert_eq!(format_token_amount(0.0), "0");
        assert_eq!(format_token_amount(-1234.5), "-1,234.5");
    }

    #[test]
    fn countdown_splits_remaining_time() {
        let remaining =
            3 * 86_400_000 + 4 * 3_600_000 + 5 * 60_000 + 6_000;
        let c = countdown(1_000, 1_000 + remaining).unwrap();
        assert_eq!(
            c,
            Countdown {
                days: 3,
                hours: 4,
                minutes: 5,
                seconds: 6,
            }
        );
        assert_eq!(c.to_string(), "3d 4h 5m 6s");
    }

    #[test]
    fn countdown_ends_at_and_after_deadline() {
        assert_eq!(countdown(5_000, 5_000), None);
        assert_eq!(countdown(6_000, 5_000), None);
    }

    #[test]
    fn fabricated_job_has_expected_shape() {
        let job = JobSimulator::new()
            .schedule(100.0, "addr123", 1_700_000_000_000)
            .unwrap();

        assert!(job.id.starts_with("job_1700000000000_"));
        assert_eq!(job.id.len(), "job_1700000000000_".len() + 9);
        assert_eq!(job.status, JobStatus::Scheduled);
        assert_eq!(job.timestamp_epoch_ms, 1_700_000_000_000);

        let hash = job.tx_hash.unwrap();
        assert_eq!(hash.len(), 66);
        assert!(hash.starts_with("0x"));
        assert!(hash[2..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn default_simulator_never_fails() {
        let simulator = JobSimulator::new();
        for _ in 0..100 {
            assert!(simulator.schedule(1.0, "addr", 0).is_ok());
        }
    }

    #[test]
    fn full_failure_rate_always_rejects() {
        let simulator = JobSimulator::with_failure_rate(1.0);
        assert_eq!(
            simulator.schedule(1.0, "addr", 0).unwrap_err(),
            SimulationError::Rejected
        );
    }
}
