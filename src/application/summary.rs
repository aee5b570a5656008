use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

use super::RunState;

const NANOS_PER_MS: u64 = 1_000_000;

/// Metadata for one recorded cycle, free of grid data
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleSummary {
    pub cycle: usize,
    #[serde(rename = "startedAtNS")]
    pub started_at_ns: u64,
    #[serde(rename = "endedAtNS")]
    pub ended_at_ns: u64,
    #[serde(rename = "durationMS")]
    pub duration_ms: u64,
    pub worker_count: usize,
    #[serde(rename = "maximumCycles")]
    pub max_cycles: usize,
}

/// Metadata for a run as handed to presentation layers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub name: String,
    #[serde(rename = "imageURL")]
    pub image_url: String,
    #[serde(rename = "startedAtNS")]
    pub started_at_ns: u64,
    #[serde(rename = "endedAtNS")]
    pub ended_at_ns: u64,
    #[serde(rename = "durationMS")]
    pub duration_ms: u64,
    pub width: usize,
    pub height: usize,
    #[serde(rename = "gameCycles")]
    pub cycles: Vec<CycleSummary>,
    #[serde(rename = "delay10MS")]
    pub delay_10ms: u32,
    pub state: RunState,
}

pub(crate) fn epoch_nanos(time: SystemTime) -> u64 {
    time.duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_nanos()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

/// Elapsed milliseconds, rounded to nearest
pub(crate) fn duration_ms(start_ns: u64, end_ns: u64) -> u64 {
    (end_ns.saturating_sub(start_ns) + NANOS_PER_MS / 2) / NANOS_PER_MS
}
