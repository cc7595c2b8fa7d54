use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WalletAddress(pub String);

impl std::fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Widget configuration supplied by the embedding page.
///
/// No invariants are enforced here (`sold_amount <= total_supply` is caller
/// discipline); the rendering and progress helpers tolerate out-of-range
/// values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PresaleConfig {
    pub token_name: String,
    pub token_symbol: String,
    pub logo_url: String,
    pub price_per_token: f64,
    pub total_supply: f64,
    pub sold_amount: f64,
    /// Sale end instant, milliseconds since the Unix epoch.
    pub end_timestamp_ms: u64,
    pub gradient_from: String,
    pub gradient_to: String,
}

/// The durable session record, stored as JSON under a single fixed key.
/// Absence means no prior session; malformed content is treated as absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSession {
    pub address: String,
    pub wallet_name: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Scheduled,
    Completed,
    Failed,
}

/// A fabricated stand-in for a real execution-backend result. Created fresh
/// per simulated purchase, shown once, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SimulatedJob {
    pub id: String,
    pub status: JobStatus,
    pub tx_hash: Option<String>,
    pub timestamp_epoch_ms: u64,
}
