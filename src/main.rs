mod content;
mod session;
mod settings;
mod sleep;
mod timer;
mod ui;

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::content::{
    ACUPRESSURE_GUIDE, FOOD_GUIDELINES, FOODS, INSOMNIA_NOTES, QUICK_RECIPES, REMEDIES,
    SOS_INTRO, SOS_QUICK_TIPS, sos_step_guide, terms_text,
};
use crate::settings::{Settings, load_settings};
use crate::sleep::calculator::{
    CycleSet, SleepMode, SleepResult, compute_sleep_times, compute_sleep_times_for,
};
use crate::sleep::time_math::{ClockTime, format_clock_time, format_countdown, parse_latency};
use crate::timer::sos::SosStep;
use crate::ui::route::Route;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliMode {
    PlanWakeUp,
    SleepNow,
}

impl From<CliMode> for SleepMode {
    fn from(value: CliMode) -> Self {
        match value {
            CliMode::PlanWakeUp => SleepMode::PlanWakeUp,
            CliMode::SleepNow => SleepMode::SleepNow,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliCycles {
    Full,
    Short,
}

impl From<CliCycles> for CycleSet {
    fn from(value: CliCycles) -> Self {
        match value {
            CliCycles::Full => CycleSet::Full,
            CliCycles::Short => CycleSet::Short,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum TipsTopic {
    Insomnia,
    Foods,
    Sos,
}

#[derive(Parser, Debug)]
#[command(
    name = "beatsomnia",
    version,
    about = "Sleep-cycle calculator with guided wind-down timers"
)]
struct Cli {
    #[arg(long, global = true, default_value = "beatsomnia.json")]
    settings: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print candidate bedtimes or wake-up times.
    Calc {
        #[arg(long, value_enum)]
        mode: Option<CliMode>,

        /// Wake-up time, or the bedtime anchor for sleep-now (HH:MM).
        #[arg(long)]
        time: Option<String>,

        /// Minutes needed to fall asleep (1-60).
        #[arg(long)]
        latency: Option<String>,

        #[arg(long, value_enum)]
        cycles: Option<CliCycles>,

        #[arg(long)]
        json: bool,
    },
    /// Run the guided 4-7-8 breathing exercise.
    Breathe {
        #[arg(long, default_value_t = 1000)]
        tick_ms: u64,
    },
    /// Run the 5-minute Sleep SOS protocol.
    Sos {
        #[arg(long, default_value_t = 1000)]
        tick_ms: u64,
    },
    /// Print remedies, foods or SOS guidance.
    Tips {
        #[arg(value_enum)]
        topic: Option<TipsTopic>,
    },
    /// Print the terms and privacy policy.
    Terms,
    /// Open the desktop window.
    Gui {
        #[arg(long, default_value = "/")]
        route: String,
    },
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let settings = load_settings(&cli.settings)
        .with_context(|| format!("failed to load {}", cli.settings.display()))?;

    let command = cli.command.unwrap_or(Command::Gui {
        route: "/".to_string(),
    });
    debug!(?command, "dispatching");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match command {
        Command::Calc {
            mode,
            time,
            latency,
            cycles,
            json,
        } => {
            let mode = mode.map(SleepMode::from).unwrap_or(settings.start_mode);
            let set = cycles.map(CycleSet::from).unwrap_or(settings.cycle_set);
            let results = calculate(&settings, mode, set, time.as_deref(), latency.as_deref())?;
            if json {
                serde_json::to_writer_pretty(&mut out, &results)
                    .context("failed to encode results")?;
                writeln!(out)?;
            } else {
                write_results(&mut out, mode, &results)?;
            }
        }
        Command::Breathe { tick_ms } => {
            session::run_breathing_session(tick_period(tick_ms)?, &mut out)?
        }
        Command::Sos { tick_ms } => session::run_sos_session(tick_period(tick_ms)?, &mut out)?,
        Command::Tips { topic } => match topic {
            Some(TipsTopic::Insomnia) => write_insomnia(&mut out)?,
            Some(TipsTopic::Foods) => write_foods(&mut out)?,
            Some(TipsTopic::Sos) => write_sos(&mut out)?,
            None => {
                write_insomnia(&mut out)?;
                writeln!(out)?;
                write_foods(&mut out)?;
                writeln!(out)?;
                write_sos(&mut out)?;
            }
        },
        Command::Terms => write!(out, "{}", terms_text())?,
        Command::Gui { route } => {
            drop(out);
            ui::app::run_gui(settings, Route::parse(&route))?;
        }
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .try_init();
}

fn tick_period(tick_ms: u64) -> Result<Duration> {
    if tick_ms == 0 {
        bail!("--tick-ms must be greater than zero");
    }
    Ok(Duration::from_millis(tick_ms))
}

fn calculate(
    settings: &Settings,
    mode: SleepMode,
    set: CycleSet,
    time: Option<&str>,
    latency: Option<&str>,
) -> Result<Vec<SleepResult>> {
    let latency = match latency {
        Some(text) => parse_latency(text)?,
        None => settings.default_latency,
    };
    let picked = time.map(str::parse::<ClockTime>).transpose()?;
    let now = ClockTime::from_datetime(&Local::now());
    let Some(anchor) = mode.anchor(picked, now) else {
        bail!("--time is required for plan-wake-up, e.g. --time 07:00");
    };
    Ok(match set {
        CycleSet::Full => compute_sleep_times(mode, anchor, latency),
        set => compute_sleep_times_for(set, mode, anchor, latency),
    })
}

fn write_results<W: Write>(out: &mut W, mode: SleepMode, results: &[SleepResult]) -> Result<()> {
    writeln!(out, "{}:", mode.result_label())?;
    for result in results {
        writeln!(
            out,
            "{} cycles  {}  {}  {}",
            result.cycles.get(),
            result.total_sleep_label(),
            format_clock_time(result.result_time),
            result.explanation
        )?;
    }
    Ok(())
}

fn write_insomnia<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "Beat Insomnia")?;
    for remedy in REMEDIES {
        let duration = remedy
            .duration
            .map(|duration| format!(", {duration}"))
            .unwrap_or_default();
        writeln!(
            out,
            "\n{} [{}{duration}]\n{}",
            remedy.title,
            remedy.category.label(),
            remedy.description
        )?;
        for instruction in remedy.instructions {
            writeln!(out, "  • {instruction}")?;
        }
    }
    writeln!(out, "\nImportant Notes")?;
    for note in INSOMNIA_NOTES {
        writeln!(out, "  • {note}")?;
    }
    Ok(())
}

fn write_foods<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "Sleep-Friendly Foods")?;
    for food in FOODS {
        writeln!(
            out,
            "\n{} [{}]\n{}\n{}",
            food.name,
            food.category.label(),
            food.benefits,
            food.timing
        )?;
    }
    writeln!(out, "\n3-Ingredient Sleep Recipes")?;
    for recipe in QUICK_RECIPES {
        writeln!(
            out,
            "  {}: {}\n    {}",
            recipe.name, recipe.ingredients, recipe.instructions
        )?;
    }
    writeln!(out, "\nGeneral Guidelines")?;
    for guideline in FOOD_GUIDELINES {
        writeln!(out, "  • {guideline}")?;
    }
    Ok(())
}

fn write_sos<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "Sleep SOS\n{SOS_INTRO}")?;
    for step in SosStep::ALL {
        let guide = sos_step_guide(step);
        writeln!(
            out,
            "\n{} ({}) - {}",
            guide.title,
            format_countdown(step.duration_secs()),
            guide.description
        )?;
        for instruction in guide.instructions {
            writeln!(out, "  • {instruction}")?;
        }
    }
    writeln!(out, "\nAcupressure Guide: {ACUPRESSURE_GUIDE}")?;
    writeln!(out, "\nQuick Sleep Tips")?;
    for tip in SOS_QUICK_TIPS {
        writeln!(out, "  • {tip}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_wake_up_without_time_is_rejected() {
        let err = calculate(
            &Settings::default(),
            SleepMode::PlanWakeUp,
            CycleSet::Full,
            None,
            Some("15"),
        )
        .expect_err("missing time");
        assert!(err.to_string().contains("--time is required"));
    }

    #[test]
    fn full_set_uses_canonical_calculation() {
        let results = calculate(
            &Settings::default(),
            SleepMode::SleepNow,
            CycleSet::Full,
            Some("23:00"),
            Some("20"),
        )
        .expect("results");
        let cycles: Vec<u32> = results.iter().map(|result| result.cycles.get()).collect();
        assert_eq!(cycles, vec![6, 5, 4, 3, 2, 1]);
        assert_eq!(results[0].result_time.to_string(), "08:20");
    }

    #[test]
    fn latency_falls_back_to_settings() {
        let results = calculate(
            &Settings::default(),
            SleepMode::PlanWakeUp,
            CycleSet::Full,
            Some("07:00"),
            None,
        )
        .expect("results");
        assert_eq!(results[0].result_time.to_string(), "21:45");
    }

    #[test]
    fn result_lines_carry_every_column() {
        let results = calculate(
            &Settings::default(),
            SleepMode::SleepNow,
            CycleSet::Short,
            Some("22:10"),
            Some("15"),
        )
        .expect("results");
        let mut out = Vec::new();
        write_results(&mut out, SleepMode::SleepNow, &results).expect("write");
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.starts_with("Wake up at:\n"));
        assert!(text.contains("4 cycles  6h 0m  04:25  Minimum recommended - may feel tired"));
    }
}
