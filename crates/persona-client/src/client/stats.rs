#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Stats {
    sessions_started: u64,
    sessions_failed: u64,
    sessions_ended: u64,
}

impl Stats {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_started(&mut self) {
        self.sessions_started += 1;
    }

    pub(crate) fn record_failed(&mut self) {
        self.sessions_failed += 1;
    }

    pub(crate) fn record_ended(&mut self) {
        self.sessions_ended += 1;
    }

    pub fn sessions_started(&self) -> u64 {
        self.sessions_started
    }

    pub fn sessions_failed(&self) -> u64 {
        self.sessions_failed
    }

    pub fn sessions_ended(&self) -> u64 {
        self.sessions_ended
    }
}
