use tracing::debug;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum SosStep {
    DeepBreathing,
    BodyScan,
    Acupressure,
}

impl SosStep {
    pub const ALL: [SosStep; 3] = [SosStep::DeepBreathing, SosStep::BodyScan, SosStep::Acupressure];

    pub fn duration_secs(self) -> u32 {
        match self {
            SosStep::DeepBreathing => 120,
            SosStep::BodyScan => 180,
            SosStep::Acupressure => 60,
        }
    }

    pub fn index(self) -> usize {
        match self {
            SosStep::DeepBreathing => 0,
            SosStep::BodyScan => 1,
            SosStep::Acupressure => 2,
        }
    }

    pub fn next(self) -> Option<Self> {
        Self::ALL.get(self.index() + 1).copied()
    }

    pub fn total_secs() -> u32 {
        Self::ALL.iter().map(|step| step.duration_secs()).sum()
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SosEvent {
    Idle,
    Counted,
    StepChanged(SosStep),
    Finished,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SosTimer {
    active: bool,
    step: SosStep,
    remaining_secs: u32,
}

impl SosTimer {
    pub fn new() -> Self {
        Self {
            active: false,
            step: SosStep::DeepBreathing,
            remaining_secs: SosStep::DeepBreathing.duration_secs(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn step(&self) -> SosStep {
        self.step
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    /// Begins the protocol from the first step. Has no effect while already running.
    pub fn start(&mut self) {
        if self.active {
            return;
        }
        *self = Self::new();
        self.active = true;
    }

    pub fn stop(&mut self) {
        *self = Self::new();
    }

    pub fn tick(&mut self) -> SosEvent {
        if !self.active {
            return SosEvent::Idle;
        }
        if self.remaining_secs > 1 {
            self.remaining_secs -= 1;
            return SosEvent::Counted;
        }

        match self.step.next() {
            Some(next) => {
                self.step = next;
                self.remaining_secs = next.duration_secs();
                SosEvent::StepChanged(next)
            }
            None => {
                debug!("sos protocol finished");
                *self = Self::new();
                SosEvent::Finished
            }
        }
    }

    pub fn total_secs(&self) -> u32 {
        SosStep::total_secs()
    }

    pub fn elapsed_secs(&self) -> u32 {
        let completed: u32 = SosStep::ALL[..self.step.index()]
            .iter()
            .map(|step| step.duration_secs())
            .sum();
        completed + (self.step.duration_secs() - self.remaining_secs)
    }

    /// Overall completion in `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        f64::from(self.elapsed_secs()) / f64::from(self.total_secs())
    }
}

impl Default for SosTimer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tick_n(timer: &mut SosTimer, ticks: u32) -> SosEvent {
        let mut last = SosEvent::Idle;
        for _ in 0..ticks {
            last = timer.tick();
        }
        last
    }

    #[test]
    fn step_table_totals_six_minutes() {
        assert_eq!(SosStep::total_secs(), 360);
        assert_eq!(SosStep::Acupressure.next(), None);
    }

    #[test]
    fn progress_is_one_third_after_first_step() {
        let mut timer = SosTimer::new();
        timer.start();
        assert_eq!(timer.progress(), 0.0);

        assert_eq!(tick_n(&mut timer, 120), SosEvent::StepChanged(SosStep::BodyScan));
        assert_eq!(timer.remaining_secs(), 180);
        assert_eq!(timer.elapsed_secs(), 120);
        assert_eq!(timer.progress(), 1.0 / 3.0);
    }

    #[test]
    fn progress_counts_elapsed_time_in_current_step() {
        let mut timer = SosTimer::new();
        timer.start();
        tick_n(&mut timer, 120 + 90);
        assert_eq!(timer.step(), SosStep::BodyScan);
        assert_eq!(timer.elapsed_secs(), 210);
        assert!((timer.progress() - 210.0 / 360.0).abs() < f64::EPSILON);
    }

    #[test]
    fn finishes_and_resets_after_last_step() {
        let mut timer = SosTimer::new();
        timer.start();
        assert_eq!(
            tick_n(&mut timer, 300),
            SosEvent::StepChanged(SosStep::Acupressure)
        );
        assert_eq!(tick_n(&mut timer, 59), SosEvent::Counted);
        assert_eq!(timer.remaining_secs(), 1);
        assert_eq!(timer.tick(), SosEvent::Finished);
        assert!(!timer.is_active());
        assert_eq!(timer, SosTimer::new());
    }

    #[test]
    fn stop_resets_to_first_step() {
        let mut timer = SosTimer::new();
        timer.start();
        tick_n(&mut timer, 200);
        timer.stop();
        assert_eq!(timer.step(), SosStep::DeepBreathing);
        assert_eq!(timer.remaining_secs(), 120);
        assert_eq!(timer.tick(), SosEvent::Idle);
    }
}
