use crate::session::Snapshot;

/// Consumer of drawable snapshots
///
/// Receives one snapshot per tick and one per phase change.
pub trait DisplaySink {
    fn present(&mut self, snapshot: &Snapshot);
}

/// Keeps only the newest snapshot, for hosts that draw on their own clock
#[derive(Debug, Default)]
pub struct LatestSnapshot {
    latest: Option<Snapshot>,
    presented: u64,
}

impl LatestSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn latest(&self) -> Option<&Snapshot> {
        self.latest.as_ref()
    }

    /// Number of snapshots received so far
    pub fn presented(&self) -> u64 {
        self.presented
    }
}

impl DisplaySink for LatestSnapshot {
    fn present(&mut self, snapshot: &Snapshot) {
        self.latest = Some(snapshot.clone());
        self.presented += 1;
    }
}

/// Keeps every snapshot it is given
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub frames: Vec<Snapshot>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&Snapshot> {
        self.frames.last()
    }
}

impl DisplaySink for RecordingSink {
    fn present(&mut self, snapshot: &Snapshot) {
        self.frames.push(snapshot.clone());
    }
}

/// Discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DisplaySink for NullSink {
    fn present(&mut self, _snapshot: &Snapshot) {}
}
