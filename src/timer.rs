use std::time::{Duration, Instant};

pub const TICK_RATE_HZ: u64 = 60;

/// The delay and sound countdown counters. `tick` belongs to the 60 Hz
/// wall-clock schedule; instruction throughput never touches these.
#[derive(Debug, Default)]
pub struct Timers {
    pub delay: u8,
    pub sound: u8,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self) {
        if self.delay > 0 {
            self.delay -= 1;
        }
        if self.sound > 0 {
            self.sound -= 1;
        }
    }

    pub fn sound_active(&self) -> bool {
        self.sound > 0
    }
}

/// Tracks how many 60 Hz ticks have elapsed between host polls, so the
/// timer cadence stays fixed no matter how fast the cycle loop spins.
pub struct TickClock {
    last: Instant,
    period: Duration,
}

impl TickClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            period: Duration::from_nanos(1_000_000_000 / TICK_RATE_HZ),
        }
    }

    /// Number of whole tick periods since the previous call.
    pub fn due(&mut self) -> u32 {
        let mut ticks = 0;
        while self.last.elapsed() >= self.period {
            self.last += self.period;
            ticks += 1;
        }
        ticks
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new()
    }
}
