/// Logical time source of one simulation run.
///
/// The clock only moves forward. It is advanced by the engine when an event is
/// popped or when the drain phase jumps to the next release time.
#[derive(Debug, Clone, Default)]
pub struct SimulationClock {
    now: i64,
}

impl SimulationClock {
    pub fn new() -> Self {
        SimulationClock { now: 0 }
    }

    pub fn now(&self) -> i64 {
        self.now
    }

    /// Moves the clock to `time` and returns the elapsed time units.
    ///
    /// A `time` in the past leaves the clock untouched and returns 0; the event
    /// queue never yields such a time, so this is logged as an error.
    pub fn advance_to(&mut self, time: i64) -> i64 {
        if time < self.now {
            log::error!("Clock regression requested: now = {}, requested = {}. Clock was not moved.", self.now, time);
            return 0;
        }

        let elapsed = time - self.now;
        self.now = time;
        elapsed
    }
}
