use std::io::Write;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::content::{ACUPRESSURE_GUIDE, SOS_QUICK_TIPS, sos_step_guide};
use crate::sleep::time_math::format_countdown;
use crate::timer::breathing::{BREATHING_CYCLES, BreathingEvent, BreathingTimer};
use crate::timer::sos::{SosEvent, SosStep, SosTimer};
use crate::timer::ticker::Ticker;

const SOS_PROGRESS_EVERY_SECS: u32 = 30;

/// Starts a ticker that forwards each tick into a channel drained by the caller.
fn start_tick_channel(tick: Duration) -> Result<(Ticker, mpsc::Receiver<()>)> {
    let (tx, rx) = mpsc::channel();
    let ticker = Ticker::start(tick, move || {
        let _ = tx.send(());
    })?;
    Ok((ticker, rx))
}

pub fn run_breathing_session<W: Write>(tick: Duration, out: &mut W) -> Result<()> {
    let mut timer = BreathingTimer::new();
    timer.start();
    info!(tick_ms = tick.as_millis() as u64, "breathing session started");
    writeln!(out, "Guided 4-7-8 Breathing")?;
    write_breath_phase(out, &timer)?;

    let (mut ticker, ticks) = start_tick_channel(tick)?;
    loop {
        ticks.recv().context("breathing ticker stopped unexpectedly")?;
        match timer.tick() {
            BreathingEvent::Idle => break,
            BreathingEvent::Counted => writeln!(out, "  {}", timer.count())?,
            BreathingEvent::PhaseChanged(_) | BreathingEvent::CycleCompleted(_) => {
                write_breath_phase(out, &timer)?
            }
            BreathingEvent::Finished => {
                writeln!(out, "Breathing exercise complete.")?;
                break;
            }
        }
        out.flush()?;
    }
    ticker.stop();
    debug!("breathing session released its ticker");
    Ok(())
}

fn write_breath_phase<W: Write>(out: &mut W, timer: &BreathingTimer) -> Result<()> {
    let phase = timer.phase();
    let cue = phase.cue().map(|cue| format!(" {cue}")).unwrap_or_default();
    writeln!(
        out,
        "Cycle {} of {BREATHING_CYCLES}: {}{cue}",
        timer.cycle(),
        phase.label()
    )?;
    writeln!(out, "  {}", timer.count())?;
    Ok(())
}

pub fn run_sos_session<W: Write>(tick: Duration, out: &mut W) -> Result<()> {
    let mut timer = SosTimer::new();
    timer.start();
    info!(tick_ms = tick.as_millis() as u64, "sos session started");
    writeln!(out, "Sleep SOS: emergency 5-minute wind-down protocol")?;
    write_sos_step(out, &timer)?;

    let (mut ticker, ticks) = start_tick_channel(tick)?;
    loop {
        ticks.recv().context("sos ticker stopped unexpectedly")?;
        match timer.tick() {
            SosEvent::Idle => break,
            SosEvent::Counted => {
                if timer.remaining_secs() % SOS_PROGRESS_EVERY_SECS == 0 {
                    write_sos_progress(out, &timer)?;
                }
            }
            SosEvent::StepChanged(_) => write_sos_step(out, &timer)?,
            SosEvent::Finished => {
                writeln!(out, "Sleep SOS complete.")?;
                writeln!(out, "Quick Sleep Tips:")?;
                for tip in SOS_QUICK_TIPS {
                    writeln!(out, "  • {tip}")?;
                }
                break;
            }
        }
        out.flush()?;
    }
    ticker.stop();
    debug!("sos session released its ticker");
    Ok(())
}

fn write_sos_step<W: Write>(out: &mut W, timer: &SosTimer) -> Result<()> {
    let step = timer.step();
    let guide = sos_step_guide(step);
    writeln!(
        out,
        "Step {} of {}: {} ({})",
        step.index() + 1,
        SosStep::ALL.len(),
        guide.title,
        guide.description
    )?;
    for instruction in guide.instructions {
        writeln!(out, "  • {instruction}")?;
    }
    if step == SosStep::Acupressure {
        writeln!(out, "  Acupressure Guide: {ACUPRESSURE_GUIDE}")?;
    }
    write_sos_progress(out, timer)
}

fn write_sos_progress<W: Write>(out: &mut W, timer: &SosTimer) -> Result<()> {
    writeln!(
        out,
        "  {} left in step, total progress {}%",
        format_countdown(timer.remaining_secs()),
        (timer.progress() * 100.0).round()
    )?;
    Ok(())
}
