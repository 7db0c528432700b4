use serde::Serialize;

/// Lifecycle of one simulation run: `Idle → Running ⇄ Draining → Terminated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EngineState {
    /// Arrivals are queued, clock is 0.
    Idle,
    /// Events are being consumed.
    Running,
    /// No events left but jobs are still waiting.
    Draining,
    Terminated,
}
