use chrono::DateTime;
use eframe::egui;

use common::game::{GameSession, MENU_ITEMS};

const TITLE_COLOR: egui::Color32 = egui::Color32::from_rgb(0, 100, 0);
const SELECTED_COLOR: egui::Color32 = egui::Color32::from_rgb(50, 205, 50);

pub fn render_menu(ui: &mut egui::Ui, session: &GameSession) {
    ui.vertical_centered(|ui| {
        ui.add_space(80.0);
        ui.label(
            egui::RichText::new("Snake Arcade")
                .size(56.0)
                .color(TITLE_COLOR)
                .strong(),
        );
        ui.add_space(60.0);

        for (i, item) in MENU_ITEMS.iter().enumerate() {
            let selected = i == session.menu_cursor();
            let text = if selected {
                format!("> {} <", item)
            } else {
                item.to_string()
            };
            let color = if selected {
                SELECTED_COLOR
            } else {
                ui.visuals().text_color()
            };
            ui.label(egui::RichText::new(text).size(28.0).color(color));
            ui.add_space(14.0);
        }

        ui.add_space(40.0);
        ui.label("Arrows navigate, Enter selects");
    });
}

pub fn render_options(ui: &mut egui::Ui, session: &GameSession) {
    let settings = session.settings();
    let on_off = |enabled: bool| if enabled { "On" } else { "Off" };
    let rows = [
        ("Difficulty", settings.difficulty.to_string()),
        ("Sound", on_off(settings.sound_enabled).to_string()),
        ("Music", on_off(settings.music_enabled).to_string()),
        ("Grid", on_off(settings.grid_enabled).to_string()),
        ("Walls", on_off(settings.walls_enabled).to_string()),
    ];

    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.label(
            egui::RichText::new("Options")
                .size(44.0)
                .color(TITLE_COLOR)
                .strong(),
        );
        ui.add_space(40.0);

        for (i, (name, value)) in rows.iter().enumerate() {
            let selected = i == session.options_cursor();
            let text = match (selected, i) {
                (true, 0) => format!("< {}: {} >", name, value),
                (true, _) => format!("> {}: {} <", name, value),
                (false, _) => format!("{}: {}", name, value),
            };
            let color = if selected {
                SELECTED_COLOR
            } else {
                ui.visuals().text_color()
            };
            ui.label(egui::RichText::new(text).size(24.0).color(color));
            ui.add_space(12.0);
        }

        ui.add_space(30.0);
        ui.label("Up/Down navigate, Left/Right adjust difficulty");
        ui.label("Enter toggles, Esc saves and returns");
    });
}

pub fn render_high_scores(ui: &mut egui::Ui, session: &GameSession) {
    let scores = &session.settings().high_scores;

    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.label(
            egui::RichText::new("High Scores")
                .size(44.0)
                .color(TITLE_COLOR)
                .strong(),
        );
        ui.add_space(30.0);

        if scores.is_empty() {
            ui.label(egui::RichText::new("No records yet!").size(24.0));
        } else {
            egui::Grid::new("high_scores")
                .spacing([40.0, 8.0])
                .show(ui, |ui| {
                    ui.label(egui::RichText::new("Rank").strong());
                    ui.label(egui::RichText::new("Name").strong());
                    ui.label(egui::RichText::new("Score").strong());
                    ui.label(egui::RichText::new("Level").strong());
                    ui.label(egui::RichText::new("Date").strong());
                    ui.end_row();

                    for (i, entry) in scores.iter().enumerate() {
                        let date = DateTime::from_timestamp(entry.timestamp, 0)
                            .map(|d| d.format("%Y-%m-%d").to_string())
                            .unwrap_or_default();
                        ui.label(format!("{}.", i + 1));
                        ui.label(&entry.name);
                        ui.label(entry.score.to_string());
                        ui.label(entry.level.to_string());
                        ui.label(date);
                        ui.end_row();
                    }
                });
        }

        ui.add_space(30.0);
        ui.label("Esc to return");
    });
}

pub fn render_game_over(ui: &mut egui::Ui, session: &GameSession) {
    ui.vertical_centered(|ui| {
        ui.add_space(120.0);
        ui.label(
            egui::RichText::new("GAME OVER")
                .size(56.0)
                .color(egui::Color32::RED)
                .strong(),
        );
        ui.add_space(30.0);
        ui.label(egui::RichText::new(format!("Score: {}", session.score())).size(28.0));
        ui.label(egui::RichText::new(format!("Level reached: {}", session.level())).size(24.0));
        ui.add_space(40.0);
        ui.label("Enter returns to the menu, R plays again");
    });
}
