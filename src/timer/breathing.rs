//! Guided 4-7-8 breathing: inhale 4s, hold 7s, exhale 8s, four cycles.

use tracing::debug;

pub const BREATHING_CYCLES: u32 = 4;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum BreathPhase {
    Inhale,
    Hold,
    Exhale,
}

impl BreathPhase {
    pub fn duration_secs(self) -> u32 {
        match self {
            BreathPhase::Inhale => 4,
            BreathPhase::Hold => 7,
            BreathPhase::Exhale => 8,
        }
    }

    pub fn next(self) -> Self {
        match self {
            BreathPhase::Inhale => BreathPhase::Hold,
            BreathPhase::Hold => BreathPhase::Exhale,
            BreathPhase::Exhale => BreathPhase::Inhale,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BreathPhase::Inhale => "Inhale",
            BreathPhase::Hold => "Hold",
            BreathPhase::Exhale => "Exhale",
        }
    }

    pub fn cue(self) -> Option<&'static str> {
        match self {
            BreathPhase::Inhale => Some("(through nose)"),
            BreathPhase::Hold => None,
            BreathPhase::Exhale => Some("(through mouth)"),
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum BreathingEvent {
    Idle,
    Counted,
    PhaseChanged(BreathPhase),
    CycleCompleted(u32),
    Finished,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BreathingTimer {
    active: bool,
    phase: BreathPhase,
    count: u32,
    cycle: u32,
}

impl BreathingTimer {
    pub fn new() -> Self {
        Self {
            active: false,
            phase: BreathPhase::Inhale,
            count: BreathPhase::Inhale.duration_secs(),
            cycle: 1,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn phase(&self) -> BreathPhase {
        self.phase
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn cycle(&self) -> u32 {
        self.cycle
    }

    /// Begins a fresh exercise. Has no effect while already running.
    pub fn start(&mut self) {
        if self.active {
            return;
        }
        self.reset();
        self.active = true;
    }

    pub fn stop(&mut self) {
        self.reset();
    }

    pub fn tick(&mut self) -> BreathingEvent {
        if !self.active {
            return BreathingEvent::Idle;
        }
        if self.count > 1 {
            self.count -= 1;
            return BreathingEvent::Counted;
        }

        let next = self.phase.next();
        if self.phase != BreathPhase::Exhale {
            self.enter(next);
            return BreathingEvent::PhaseChanged(next);
        }

        if self.cycle >= BREATHING_CYCLES {
            debug!(cycles = self.cycle, "breathing exercise finished");
            self.reset();
            return BreathingEvent::Finished;
        }
        self.cycle += 1;
        self.enter(next);
        BreathingEvent::CycleCompleted(self.cycle)
    }

    fn enter(&mut self, phase: BreathPhase) {
        self.phase = phase;
        self.count = phase.duration_secs();
    }

    fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for BreathingTimer {
    fn default() -> Self {
        Self::new()
    }
}
