use eframe::egui::{self, Color32, RichText, Ui};

use crate::content::{
    FOOD_GUIDELINES, FOODS, FoodCategory, INSOMNIA_NOTES, QUICK_RECIPES, REMEDIES,
    RemedyCategory, TERMS_SECTIONS, TERMS_TITLE,
};
use crate::sleep::calculator::{SleepMode, SleepResult};
use crate::sleep::time_math::format_clock_time;

pub const ACCENT: Color32 = Color32::from_rgb(96, 228, 206);
pub const MOON: Color32 = Color32::from_rgb(178, 182, 255);
pub const GOLD: Color32 = Color32::from_rgb(255, 209, 102);
pub const MUTED: Color32 = Color32::from_rgb(169, 188, 209);
pub const WARN: Color32 = Color32::from_rgb(255, 183, 95);
pub const ALERT: Color32 = Color32::from_rgb(255, 106, 106);
const CARD_FILL: Color32 = Color32::from_rgb(20, 34, 82);

pub fn configure_theme(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::dark();
    visuals.override_text_color = Some(Color32::from_rgb(226, 234, 246));
    visuals.panel_fill = Color32::from_rgb(10, 14, 48);
    visuals.window_fill = Color32::from_rgb(16, 20, 60);
    visuals.widgets.noninteractive.bg_fill = Color32::from_rgb(14, 18, 56);
    visuals.widgets.inactive.bg_fill = Color32::from_rgb(24, 30, 80);
    visuals.widgets.hovered.bg_fill = Color32::from_rgb(60, 72, 160);
    visuals.widgets.active.bg_fill = Color32::from_rgb(93, 74, 255);
    visuals.selection.bg_fill = Color32::from_rgb(93, 74, 255);
    visuals.hyperlink_color = Color32::from_rgb(108, 204, 255);
    ctx.set_visuals(visuals);
}

pub fn section_heading(ui: &mut Ui, text: &str) {
    ui.heading(RichText::new(text).color(ACCENT).strong());
    ui.add_space(4.0);
}

fn bullet_list(ui: &mut Ui, items: &[&str]) {
    for item in items {
        ui.label(format!("• {item}"));
    }
}

pub fn card<R>(ui: &mut Ui, add_contents: impl FnOnce(&mut Ui) -> R) -> R {
    egui::Frame::group(ui.style())
        .fill(CARD_FILL)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            add_contents(ui)
        })
        .inner
}

pub fn result_card(ui: &mut Ui, mode: SleepMode, result: &SleepResult) {
    card(ui, |ui| {
        ui.horizontal(|ui| {
            ui.label(RichText::new(format!("{} cycles", result.cycles.get())).strong());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(RichText::new(result.total_sleep_label()).small().strong());
            });
        });
        ui.vertical_centered(|ui| {
            ui.label(RichText::new(mode.result_label()).small().color(MUTED));
            ui.label(
                RichText::new(format_clock_time(result.result_time))
                    .size(26.0)
                    .color(GOLD)
                    .strong(),
            );
            ui.label(RichText::new(result.explanation).small().color(MOON));
        });
    });
}

fn remedy_color(category: RemedyCategory) -> Color32 {
    match category {
        RemedyCategory::Technique => Color32::from_rgb(147, 197, 253),
        RemedyCategory::Natural => Color32::from_rgb(134, 239, 172),
        RemedyCategory::Environment => Color32::from_rgb(216, 180, 254),
    }
}

fn food_color(category: FoodCategory) -> Color32 {
    match category {
        FoodCategory::Snack => Color32::from_rgb(134, 239, 172),
        FoodCategory::Drink => Color32::from_rgb(147, 197, 253),
        FoodCategory::Meal => Color32::from_rgb(253, 186, 116),
    }
}

pub fn remedies(ui: &mut Ui) {
    for remedy in REMEDIES {
        card(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(remedy.title).strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        RichText::new(remedy.category.label())
                            .small()
                            .color(remedy_color(remedy.category)),
                    );
                    if let Some(duration) = remedy.duration {
                        ui.label(RichText::new(duration).small().color(MUTED));
                    }
                });
            });
            ui.label(RichText::new(remedy.description).color(MUTED));
            ui.label(RichText::new("How to:").strong());
            bullet_list(ui, remedy.instructions);
        });
        ui.add_space(6.0);
    }

    card(ui, |ui| {
        ui.label(RichText::new("Important Notes").color(WARN).strong());
        bullet_list(ui, INSOMNIA_NOTES);
    });
}

pub fn foods(ui: &mut Ui) {
    section_heading(ui, "Sleep-Friendly Foods");
    ui.label(RichText::new("Foods that naturally promote better sleep and digestion").color(MUTED));
    ui.add_space(6.0);
    for food in FOODS {
        card(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(food.name).strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        RichText::new(food.category.label())
                            .small()
                            .color(food_color(food.category)),
                    );
                });
            });
            ui.label(RichText::new(food.benefits).color(MUTED));
            ui.label(RichText::new(food.timing).small().color(ACCENT));
        });
        ui.add_space(6.0);
    }

    card(ui, |ui| {
        ui.label(RichText::new("3-Ingredient Sleep Recipes").color(ACCENT).strong());
        for (index, recipe) in QUICK_RECIPES.iter().enumerate() {
            ui.label(RichText::new(recipe.name).strong());
            ui.label(RichText::new(recipe.ingredients).color(ACCENT));
            ui.label(RichText::new(recipe.instructions).small().color(MUTED));
            if index + 1 < QUICK_RECIPES.len() {
                ui.separator();
            }
        }
    });
    ui.add_space(6.0);
    card(ui, |ui| {
        ui.label(RichText::new("General Guidelines").color(ACCENT).strong());
        bullet_list(ui, FOOD_GUIDELINES);
    });
}

pub fn terms(ui: &mut Ui, year: i32) {
    ui.heading(RichText::new(TERMS_TITLE).size(24.0).strong());
    ui.add_space(8.0);
    for section in TERMS_SECTIONS {
        ui.label(RichText::new(section.heading).strong().color(ACCENT));
        for paragraph in section.paragraphs {
            ui.label(*paragraph);
        }
        bullet_list(ui, section.bullets);
        ui.add_space(6.0);
    }
    ui.vertical_centered(|ui| {
        ui.label(RichText::new(format!("© {year} BeatSomnia")).color(MUTED));
    });
}
