use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use tracing::debug;

use crate::sleep::time_math::{ClockTime, LatencyMinutes, format_total_sleep};

pub const CYCLE_LENGTH_MINUTES: u32 = 90;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SleepMode {
    /// Work back from a desired wake time to candidate bedtimes.
    #[default]
    PlanWakeUp,
    /// Work forward from the current instant to candidate wake times.
    SleepNow,
}

impl SleepMode {
    /// PlanWakeUp needs a picked wake time; SleepNow falls back to the current instant.
    pub fn anchor(self, picked: Option<ClockTime>, now: ClockTime) -> Option<ClockTime> {
        match self {
            SleepMode::PlanWakeUp => picked,
            SleepMode::SleepNow => Some(picked.unwrap_or(now)),
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            SleepMode::PlanWakeUp => "Plan Wake-Up",
            SleepMode::SleepNow => "Sleep Now",
        }
    }

    pub fn prompt(self) -> &'static str {
        match self {
            SleepMode::PlanWakeUp => "What time do you want to wake up?",
            SleepMode::SleepNow => "What time is it now?",
        }
    }

    pub fn action_label(self) -> &'static str {
        match self {
            SleepMode::PlanWakeUp => "Calculate Optimal Sleep Times",
            SleepMode::SleepNow => "Calculate Wake-Up Times",
        }
    }

    pub fn result_label(self) -> &'static str {
        match self {
            SleepMode::PlanWakeUp => "Bedtime",
            SleepMode::SleepNow => "Wake up at",
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum CycleCount {
    One = 1,
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
}

impl CycleCount {
    pub fn get(self) -> u32 {
        self as u32
    }

    pub fn total_sleep_minutes(self) -> u32 {
        self.get() * CYCLE_LENGTH_MINUTES
    }

    pub fn explanation(self) -> &'static str {
        match self {
            CycleCount::Six => "Optimal for most adults - full rest and recovery",
            CycleCount::Five => "Good balance - adequate rest for most people",
            CycleCount::Four => "Minimum recommended - may feel tired",
            CycleCount::Three => "Below recommended - you will feel tired",
            CycleCount::Two => "Poor sleep - for emergencies only",
            CycleCount::One => "Very poor sleep - you will likely feel terrible",
        }
    }
}

impl Serialize for CycleCount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.get())
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleSet {
    /// Six down to one cycle.
    #[default]
    Full,
    /// Six down to four cycles.
    Short,
}

impl CycleSet {
    pub fn counts(self) -> &'static [CycleCount] {
        static FULL: [CycleCount; 6] = [
            CycleCount::Six,
            CycleCount::Five,
            CycleCount::Four,
            CycleCount::Three,
            CycleCount::Two,
            CycleCount::One,
        ];
        match self {
            CycleSet::Full => &FULL,
            CycleSet::Short => &FULL[..3],
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SleepResult {
    pub cycles: CycleCount,
    pub total_sleep_minutes: u32,
    pub result_time: ClockTime,
    pub explanation: &'static str,
}

impl SleepResult {
    pub fn total_sleep_label(&self) -> String {
        format_total_sleep(self.total_sleep_minutes)
    }
}

impl Serialize for SleepResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("SleepResult", 5)?;
        state.serialize_field("cycles", &self.cycles)?;
        state.serialize_field("total_sleep_minutes", &self.total_sleep_minutes)?;
        state.serialize_field("total_sleep", &self.total_sleep_label())?;
        state.serialize_field("result_time", &self.result_time)?;
        state.serialize_field("explanation", self.explanation)?;
        state.end()
    }
}

/// Canonical six-to-one cycle set.
pub fn compute_sleep_times(
    mode: SleepMode,
    anchor: ClockTime,
    latency: LatencyMinutes,
) -> Vec<SleepResult> {
    compute_sleep_times_for(CycleSet::default(), mode, anchor, latency)
}

pub fn compute_sleep_times_for(
    set: CycleSet,
    mode: SleepMode,
    anchor: ClockTime,
    latency: LatencyMinutes,
) -> Vec<SleepResult> {
    let latency_minutes = i64::from(latency.get());
    let results: Vec<SleepResult> = set
        .counts()
        .iter()
        .map(|&cycles| {
            let total_sleep_minutes = cycles.total_sleep_minutes();
            let offset = i64::from(total_sleep_minutes) + latency_minutes;
            let result_time = match mode {
                SleepMode::PlanWakeUp => anchor.sub_minutes(offset),
                SleepMode::SleepNow => anchor.add_minutes(offset),
            };
            SleepResult {
                cycles,
                total_sleep_minutes,
                result_time,
                explanation: cycles.explanation(),
            }
        })
        .collect();
    debug!(
        ?mode,
        ?set,
        anchor = %anchor,
        latency = latency.get(),
        options = results.len(),
        "computed sleep times"
    );
    results
}
