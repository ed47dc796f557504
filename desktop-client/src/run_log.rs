use chrono::{DateTime, Local};
use common::games::snake::GameEndReason;
use ringbuffer::{AllocRingBuffer, RingBuffer};

pub const RUN_LOG_SIZE: usize = 10;

#[derive(Clone, Debug)]
pub struct RunRecord {
    pub finished_at: DateTime<Local>,
    pub score: u32,
    pub reason: Option<GameEndReason>,
}

impl RunRecord {
    pub fn describe(&self) -> String {
        let reason = self
            .reason
            .map_or_else(|| "stopped".to_string(), |r| r.to_string());
        format!(
            "{}  score {}  ({})",
            self.finished_at.format("%H:%M:%S"),
            self.score,
            reason
        )
    }
}

/// Most recent finished runs. Scores are never persisted.
pub struct RunLog {
    runs: AllocRingBuffer<RunRecord>,
}

impl RunLog {
    pub fn new() -> Self {
        Self {
            runs: AllocRingBuffer::new(RUN_LOG_SIZE),
        }
    }

    pub fn record(&mut self, score: u32, reason: Option<GameEndReason>) {
        self.runs.enqueue(RunRecord {
            finished_at: Local::now(),
            score,
            reason,
        });
    }

    pub fn latest_first(&self) -> Vec<&RunRecord> {
        let mut runs: Vec<&RunRecord> = self.runs.iter().collect();
        runs.reverse();
        runs
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

impl Default for RunLog {
    fn default() -> Self {
        Self::new()
    }
}
