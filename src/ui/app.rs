use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use anyhow::Result;
use chrono::{Datelike, Local};
use eframe::egui::{self, RichText, ScrollArea, TextEdit, TopBottomPanel, Ui};
use tracing::{debug, info, warn};

use crate::content::{ACUPRESSURE_GUIDE, SOS_INTRO, SOS_QUICK_TIPS, sos_step_guide};
use crate::settings::Settings;
use crate::sleep::calculator::{SleepMode, SleepResult, compute_sleep_times_for};
use crate::sleep::time_math::{
    ClockTime, TimeMathError, format_countdown, is_valid_latency, parse_latency,
};
use crate::timer::breathing::{BREATHING_CYCLES, BreathingEvent, BreathingTimer};
use crate::timer::sos::{SosEvent, SosStep, SosTimer};
use crate::timer::ticker::Ticker;
use crate::ui::render::{self, ACCENT, ALERT, GOLD, MUTED, WARN};
use crate::ui::route::{FallAsleepTab, Route, View};

const TICK_PERIOD: Duration = Duration::from_secs(1);

pub fn run_gui(settings: Settings, route: Route) -> Result<()> {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("BeatSomnia")
            .with_inner_size([520.0, 860.0])
            .with_min_inner_size([420.0, 600.0]),
        ..Default::default()
    };

    info!(route = route.path(), "opening window");
    let app = BeatSomniaApp::new(settings, route);
    eframe::run_native(
        "BeatSomnia",
        native_options,
        Box::new(move |cc| {
            render::configure_theme(&cc.egui_ctx);
            Ok(Box::new(app))
        }),
    )
    .map_err(|err| anyhow::anyhow!("failed to launch BeatSomnia window: {err}"))?;

    Ok(())
}

/// Owns the one-second tick for a single timer panel.
///
/// Ticks are forwarded through a channel and applied on the UI thread, so the
/// timer state itself is never shared. Dropping the driver releases the ticker.
#[derive(Default)]
struct TickDriver {
    ticker: Option<Ticker>,
    ticks: Option<Receiver<()>>,
}

impl TickDriver {
    fn start(&mut self, ctx: &egui::Context) -> Result<()> {
        if self.ticker.as_ref().is_some_and(Ticker::is_running) {
            return Ok(());
        }
        let (tx, rx) = mpsc::channel();
        let repaint = ctx.clone();
        let ticker = Ticker::start(TICK_PERIOD, move || {
            let _ = tx.send(());
            repaint.request_repaint();
        })?;
        self.ticker = Some(ticker);
        self.ticks = Some(rx);
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(mut ticker) = self.ticker.take() {
            ticker.stop();
        }
        self.ticks = None;
    }

    fn pending(&self) -> usize {
        self.ticks
            .as_ref()
            .map(|ticks| ticks.try_iter().count())
            .unwrap_or(0)
    }
}

struct BeatSomniaApp {
    settings: Settings,
    route: Route,
    view: View,
    tab: FallAsleepTab,
    mode: SleepMode,
    time_input: String,
    latency_input: String,
    results: Vec<SleepResult>,
    results_mode: SleepMode,
    input_error: Option<String>,
    breathing: BreathingTimer,
    breathing_ticks: TickDriver,
    sos: SosTimer,
    sos_ticks: TickDriver,
}

impl BeatSomniaApp {
    fn new(settings: Settings, route: Route) -> Self {
        let mode = settings.start_mode;
        let latency_input = settings.default_latency.to_string();
        Self {
            settings,
            route,
            view: View::Calculator,
            tab: FallAsleepTab::Insomnia,
            mode,
            time_input: current_clock_time().to_string(),
            latency_input,
            results: Vec::new(),
            results_mode: mode,
            input_error: None,
            breathing: BreathingTimer::new(),
            breathing_ticks: TickDriver::default(),
            sos: SosTimer::new(),
            sos_ticks: TickDriver::default(),
        }
    }

    fn navigate(&mut self, route: Route) {
        if route != Route::Home {
            self.stop_timers();
        }
        debug!(from = self.route.path(), to = route.path(), "navigate");
        self.route = route;
    }

    fn set_view(&mut self, view: View) {
        if view != self.view {
            self.stop_timers();
            self.view = view;
        }
    }

    fn set_tab(&mut self, tab: FallAsleepTab) {
        if tab != self.tab {
            self.stop_timers();
            self.tab = tab;
        }
    }

    fn switch_mode(&mut self, mode: SleepMode) {
        self.mode = mode;
        self.latency_input = self.settings.default_latency.to_string();
        self.time_input = current_clock_time().to_string();
        self.results.clear();
        self.input_error = None;
    }

    fn stop_timers(&mut self) {
        self.breathing.stop();
        self.breathing_ticks.stop();
        self.sos.stop();
        self.sos_ticks.stop();
    }

    fn calculate(&mut self) {
        let latency = match parse_latency(&self.latency_input) {
            Ok(latency) => latency,
            Err(err) => {
                self.results.clear();
                self.input_error = Some(err.to_string());
                return;
            }
        };
        let picked = match self.time_input.parse::<ClockTime>() {
            Ok(picked) => picked,
            Err(err) => {
                self.results.clear();
                self.input_error = Some(err.to_string());
                return;
            }
        };
        let Some(anchor) = self.mode.anchor(Some(picked), current_clock_time()) else {
            return;
        };
        self.input_error = None;
        self.results = compute_sleep_times_for(self.settings.cycle_set, self.mode, anchor, latency);
        self.results_mode = self.mode;
        info!(
            mode = ?self.mode,
            anchor = %anchor,
            latency = latency.get(),
            "calculated sleep times"
        );
    }

    fn apply_pending_ticks(&mut self) {
        for _ in 0..self.breathing_ticks.pending() {
            if self.breathing.tick() == BreathingEvent::Finished {
                self.breathing_ticks.stop();
                break;
            }
        }
        for _ in 0..self.sos_ticks.pending() {
            if self.sos.tick() == SosEvent::Finished {
                self.sos_ticks.stop();
                break;
            }
        }
    }

    fn show_header(&mut self, ui: &mut Ui) {
        ui.vertical_centered(|ui| {
            ui.label(RichText::new("☾").size(48.0).color(render::MOON));
            ui.label(
                RichText::new("BeatSomnia")
                    .size(30.0)
                    .color(ACCENT)
                    .strong(),
            );
        });
        ui.add_space(8.0);
    }

    fn show_calculator(&mut self, ui: &mut Ui) {
        ui.vertical_centered(|ui| {
            ui.label(RichText::new("Sleep Calculator").size(22.0).strong());
        });
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            for mode in [SleepMode::PlanWakeUp, SleepMode::SleepNow] {
                let selected = self.mode == mode;
                let text = RichText::new(mode.title()).size(18.0).strong();
                if ui.selectable_label(selected, text).clicked() && !selected {
                    self.switch_mode(mode);
                }
            }
        });
        ui.add_space(8.0);

        ui.label(RichText::new(self.mode.prompt()).strong());
        ui.horizontal(|ui| {
            ui.add(
                TextEdit::singleline(&mut self.time_input)
                    .hint_text("HH:MM")
                    .desired_width(120.0),
            );
            if ui.button("Now").clicked() {
                self.time_input = current_clock_time().to_string();
            }
        });
        ui.add_space(6.0);

        ui.label(RichText::new("How long does it take you to fall asleep? (minutes)").strong());
        ui.add(
            TextEdit::singleline(&mut self.latency_input)
                .hint_text("1-60")
                .desired_width(120.0),
        );
        let latency_valid = is_valid_latency(&self.latency_input);
        if !latency_valid {
            let err = TimeMathError::InvalidLatency {
                input: self.latency_input.clone(),
            };
            ui.label(RichText::new(err.to_string()).color(ALERT));
        } else if let Some(err) = &self.input_error {
            ui.label(RichText::new(err.as_str()).color(ALERT));
        }
        ui.add_space(8.0);

        let calculate = ui.add_enabled(
            latency_valid,
            egui::Button::new(RichText::new(self.mode.action_label()).size(17.0).strong())
                .min_size(egui::vec2(ui.available_width(), 44.0)),
        );
        if calculate.clicked() {
            self.calculate();
        }

        if !self.results.is_empty() {
            ui.add_space(10.0);
            for result in &self.results {
                render::result_card(ui, self.results_mode, result);
                ui.add_space(4.0);
            }
        }

        ui.add_space(14.0);
        ui.vertical_centered(|ui| {
            let button = egui::Button::new(
                RichText::new("✨ Want to fall asleep faster?")
                    .color(egui::Color32::BLACK)
                    .strong(),
            )
            .fill(GOLD);
            if ui.add(button).clicked() {
                self.set_view(View::FallAsleep);
            }
        });
    }

    fn show_fall_asleep(&mut self, ui: &mut Ui) {
        let ctx = ui.ctx().clone();
        ui.horizontal(|ui| {
            if ui.button("← Back").clicked() {
                self.set_view(View::Calculator);
            }
            ui.label(RichText::new("🌙 Want to fall asleep faster?").size(18.0).strong());
        });
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            for tab in FallAsleepTab::ALL {
                if ui.selectable_label(self.tab == tab, tab.label()).clicked() {
                    self.set_tab(tab);
                }
            }
        });
        ui.separator();

        match self.tab {
            FallAsleepTab::Insomnia => self.show_insomnia(ui, &ctx),
            FallAsleepTab::Foods => render::foods(ui),
            FallAsleepTab::Sos => self.show_sos(ui, &ctx),
        }
    }

    fn show_insomnia(&mut self, ui: &mut Ui, ctx: &egui::Context) {
        render::section_heading(ui, "Beat Insomnia");
        ui.label(RichText::new("Natural remedies and techniques for better sleep").color(MUTED));
        ui.add_space(6.0);

        render::card(ui, |ui| {
            ui.label(RichText::new("Guided 4-7-8 Breathing").color(ACCENT).strong());
            ui.vertical_centered(|ui| {
                ui.label(
                    RichText::new(self.breathing.count().to_string())
                        .size(56.0)
                        .color(ACCENT)
                        .strong(),
                );
                let phase = self.breathing.phase();
                let cue = phase.cue().unwrap_or_default();
                ui.label(RichText::new(format!("{} {cue}", phase.label())).size(18.0));
                ui.label(
                    RichText::new(format!(
                        "Cycle {} of {BREATHING_CYCLES}",
                        self.breathing.cycle()
                    ))
                    .color(MUTED),
                );
                if self.breathing.is_active() {
                    if ui.button("⏸ Stop").clicked() {
                        self.breathing.stop();
                        self.breathing_ticks.stop();
                    }
                } else if ui.button("▶ Start Exercise").clicked() {
                    match self.breathing_ticks.start(ctx) {
                        Ok(()) => self.breathing.start(),
                        Err(err) => warn!("breathing timer unavailable: {err:#}"),
                    }
                }
            });
        });
        ui.add_space(8.0);
        render::remedies(ui);
    }

    fn show_sos(&mut self, ui: &mut Ui, ctx: &egui::Context) {
        render::section_heading(ui, "Sleep SOS");
        ui.label(RichText::new("Emergency 5-minute wind-down protocol").color(MUTED));
        ui.add_space(6.0);

        if !self.sos.is_active() {
            render::card(ui, |ui| {
                ui.label(RichText::new("Can't Sleep?").size(18.0).strong());
                ui.label(SOS_INTRO);
                if ui.button("Start Sleep SOS").clicked() {
                    match self.sos_ticks.start(ctx) {
                        Ok(()) => self.sos.start(),
                        Err(err) => warn!("sos timer unavailable: {err:#}"),
                    }
                }
                ui.add_space(6.0);
                ui.label(RichText::new("What's included:").strong());
                for step in SosStep::ALL {
                    ui.horizontal(|ui| {
                        ui.label(sos_step_guide(step).title);
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.label(format_countdown(step.duration_secs()));
                        });
                    });
                }
            });
        } else {
            let step = self.sos.step();
            let guide = sos_step_guide(step);
            render::card(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(format!("Step {} of {}", step.index() + 1, SosStep::ALL.len()));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            RichText::new(format_countdown(self.sos.remaining_secs()))
                                .color(ACCENT),
                        );
                    });
                });
                let progress = self.sos.progress() as f32;
                ui.add(egui::ProgressBar::new(progress));
                ui.vertical_centered(|ui| {
                    ui.label(
                        RichText::new(format!("Total progress: {:.0}%", progress * 100.0))
                            .small(),
                    );
                });
            });
            ui.add_space(6.0);
            render::card(ui, |ui| {
                ui.label(RichText::new(format!("⏱ {}", guide.title)).size(18.0).strong());
                ui.label(guide.description);
                ui.label(RichText::new("Follow along:").strong());
                for instruction in guide.instructions {
                    ui.label(format!("• {instruction}"));
                }
                if step == SosStep::Acupressure {
                    ui.add_space(4.0);
                    ui.label(RichText::new("Acupressure Guide").color(ACCENT).strong());
                    ui.label(RichText::new(ACUPRESSURE_GUIDE).small());
                }
            });
            ui.vertical_centered(|ui| {
                if ui.button("Stop Session").clicked() {
                    self.sos.stop();
                    self.sos_ticks.stop();
                }
            });
        }

        ui.add_space(8.0);
        render::card(ui, |ui| {
            ui.label(RichText::new("Quick Sleep Tips").color(WARN).strong());
            for tip in SOS_QUICK_TIPS {
                ui.label(format!("• {tip}"));
            }
        });
    }

    fn show_terms(&mut self, ui: &mut Ui) {
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
            if ui.button("Back to Home").clicked() {
                self.navigate(Route::Home);
            }
        });
        render::terms(ui, Local::now().year());
    }

    fn show_not_found(&mut self, ui: &mut Ui, path: &str) {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.label(RichText::new("404").size(48.0).strong());
            ui.label(format!("Oops! Page not found: {path}"));
            if ui.link("Return to Home").clicked() {
                self.navigate(Route::Home);
            }
        });
    }

    fn show_footer(&mut self, ui: &mut Ui) {
        ui.vertical_centered(|ui| {
            ui.horizontal(|ui| {
                if ui.link("Terms and Privacy Policy").clicked() {
                    self.navigate(Route::Terms);
                }
                ui.label(RichText::new("©BeatSomnia").color(MUTED));
            });
        });
    }
}

impl eframe::App for BeatSomniaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_pending_ticks();

        TopBottomPanel::bottom("footer").show(ctx, |ui| self.show_footer(ui));
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .id_salt("page_scroll")
                .show(ui, |ui| match self.route.clone() {
                    Route::Home => {
                        self.show_header(ui);
                        match self.view {
                            View::Calculator => self.show_calculator(ui),
                            View::FallAsleep => self.show_fall_asleep(ui),
                        }
                    }
                    Route::Terms => self.show_terms(ui),
                    Route::NotFound(path) => self.show_not_found(ui, &path),
                });
        });
    }
}

fn current_clock_time() -> ClockTime {
    ClockTime::from_datetime(&Local::now())
}

#[cfg(test)]
mod tests {
    use crate::sleep::time_math::LatencyMinutes;

    use super::*;

    fn app_with_running_timers(ctx: &egui::Context) -> BeatSomniaApp {
        let mut app = BeatSomniaApp::new(Settings::default(), Route::Home);
        app.view = View::FallAsleep;
        app.breathing_ticks.start(ctx).expect("breathing ticker");
        app.breathing.start();
        app.sos_ticks.start(ctx).expect("sos ticker");
        app.sos.start();
        assert!(app.breathing.is_active());
        assert!(app.sos.is_active());
        app
    }

    fn assert_timers_released(app: &BeatSomniaApp) {
        assert!(app.breathing_ticks.ticker.is_none());
        assert!(app.breathing_ticks.ticks.is_none());
        assert!(app.sos_ticks.ticker.is_none());
        assert!(app.sos_ticks.ticks.is_none());
        assert_eq!(app.breathing, BreathingTimer::new());
        assert_eq!(app.sos, SosTimer::new());
    }

    #[test]
    fn switching_tab_stops_both_timers() {
        let ctx = egui::Context::default();
        let mut app = app_with_running_timers(&ctx);
        app.set_tab(FallAsleepTab::Foods);
        assert_eq!(app.tab, FallAsleepTab::Foods);
        assert_timers_released(&app);
    }

    #[test]
    fn leaving_fall_asleep_view_stops_both_timers() {
        let ctx = egui::Context::default();
        let mut app = app_with_running_timers(&ctx);
        app.set_view(View::Calculator);
        assert_eq!(app.view, View::Calculator);
        assert_timers_released(&app);
    }

    #[test]
    fn navigating_away_stops_both_timers() {
        let ctx = egui::Context::default();
        let mut app = app_with_running_timers(&ctx);
        app.navigate(Route::Terms);
        assert_eq!(app.route, Route::Terms);
        assert_timers_released(&app);
    }

    #[test]
    fn reselecting_current_tab_keeps_timers_running() {
        let ctx = egui::Context::default();
        let mut app = app_with_running_timers(&ctx);
        app.set_tab(FallAsleepTab::Insomnia);
        assert!(app.breathing.is_active());
        assert!(app.breathing_ticks.ticker.is_some());
        app.stop_timers();
        assert_timers_released(&app);
    }

    #[test]
    fn switching_mode_resets_inputs_and_results() {
        let settings = Settings {
            default_latency: LatencyMinutes::new(25).expect("valid latency"),
            ..Settings::default()
        };
        let mut app = BeatSomniaApp::new(settings, Route::Home);
        app.time_input = "07:00".to_string();
        app.latency_input = "40".to_string();
        app.calculate();
        assert_eq!(app.results.len(), 6);

        app.switch_mode(SleepMode::SleepNow);
        assert_eq!(app.mode, SleepMode::SleepNow);
        assert_eq!(app.latency_input, "25");
        assert!(app.results.is_empty());
        assert!(app.input_error.is_none());
        assert!(app.time_input.parse::<ClockTime>().is_ok());
    }

    #[test]
    fn invalid_time_clears_previous_results() {
        let mut app = BeatSomniaApp::new(Settings::default(), Route::Home);
        app.time_input = "07:00".to_string();
        app.calculate();
        assert_eq!(app.results[0].result_time.to_string(), "21:45");

        app.time_input = "25:99".to_string();
        app.calculate();
        assert!(app.results.is_empty());
        assert_eq!(
            app.input_error.as_deref(),
            Some("invalid clock time '25:99', expected HH:MM")
        );
    }
}
