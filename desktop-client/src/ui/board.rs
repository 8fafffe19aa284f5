use std::time::Instant;

use eframe::egui;

use common::game::{GameSession, Point, PowerUpKind};

const BACKGROUND: egui::Color32 = egui::Color32::from_rgb(240, 248, 255);
const GRID_LIGHT: egui::Color32 = egui::Color32::from_rgb(220, 220, 220);
const GRID_DARK: egui::Color32 = egui::Color32::from_rgb(200, 200, 200);
const BARRIER: egui::Color32 = egui::Color32::from_rgb(100, 100, 100);
const FOOD: egui::Color32 = egui::Color32::from_rgb(255, 0, 0);
const FOOD_CORE: egui::Color32 = egui::Color32::from_rgb(255, 255, 0);
const SNAKE_HEAD: egui::Color32 = egui::Color32::from_rgb(0, 100, 0);
const SNAKE_BODY: egui::Color32 = egui::Color32::from_rgb(50, 205, 50);
const SNAKE_INVINCIBLE: egui::Color32 = egui::Color32::from_rgb(0, 255, 255);

fn power_up_color(kind: PowerUpKind) -> egui::Color32 {
    match kind {
        PowerUpKind::Speed => egui::Color32::from_rgb(255, 255, 0),
        PowerUpKind::Slow => egui::Color32::from_rgb(0, 0, 255),
        PowerUpKind::BonusPoints => egui::Color32::from_rgb(128, 0, 128),
        PowerUpKind::Invincible => egui::Color32::from_rgb(0, 255, 255),
        PowerUpKind::Shrink => egui::Color32::from_rgb(255, 165, 0),
    }
}

fn active_effects(session: &GameSession, now: Instant) -> Vec<&'static str> {
    let mut effects = Vec::new();
    if session.snake().is_invincible(now) {
        effects.push("Invincible");
    }
    if session.snake().speed_modifier() > 1.0 {
        effects.push("Speed+");
    } else if session.snake().speed_modifier() < 1.0 {
        effects.push("Speed-");
    }
    effects
}

pub fn render_board(ui: &mut egui::Ui, session: &GameSession, now: Instant, paused: bool) {
    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new(format!("Score: {}", session.score()))
                .size(20.0)
                .strong(),
        );
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(
                egui::RichText::new(format!("Level: {}", session.level()))
                    .size(20.0)
                    .strong(),
            );
        });
    });

    let effects = active_effects(session, now);
    if !effects.is_empty() {
        ui.colored_label(
            egui::Color32::from_rgb(0, 0, 255),
            format!("Effects: {}", effects.join(", ")),
        );
    }

    let grid = session.grid();
    let available = ui.available_size();
    let cell = (available.x / grid.width as f32)
        .min(available.y / grid.height as f32)
        .floor()
        .max(4.0);
    let board_size = egui::vec2(cell * grid.width as f32, cell * grid.height as f32);
    let (board_rect, _) = ui.allocate_exact_size(board_size, egui::Sense::hover());
    let painter = ui.painter_at(board_rect);

    let cell_rect = |p: Point| {
        egui::Rect::from_min_size(
            board_rect.min + egui::vec2(p.x as f32 * cell, p.y as f32 * cell),
            egui::vec2(cell, cell),
        )
    };

    painter.rect_filled(board_rect, 0.0, BACKGROUND);
    if session.settings().grid_enabled {
        for p in grid.cells() {
            let color = if (p.x + p.y) % 2 == 0 {
                GRID_LIGHT
            } else {
                GRID_DARK
            };
            painter.rect_filled(cell_rect(p), 0.0, color);
        }
    }

    for barrier in session.barriers().cells() {
        painter.rect_filled(cell_rect(*barrier), 0.0, BARRIER);
    }

    let food_rect = cell_rect(session.food().position());
    painter.rect_filled(food_rect, 2.0, FOOD);
    painter.rect_filled(food_rect.shrink(cell * 0.2), 2.0, FOOD_CORE);

    if session.power_up().is_active() {
        let rect = cell_rect(session.power_up().position());
        painter.rect_filled(rect, 4.0, power_up_color(session.power_up().kind()));
        painter.rect_filled(rect.shrink(cell * 0.25), 2.0, egui::Color32::WHITE);
    }

    let invincible = session.snake().is_invincible(now);
    for (i, p) in session.snake().cells().enumerate() {
        if !grid.contains(p) {
            continue;
        }
        let color = match (i, invincible) {
            (_, true) => SNAKE_INVINCIBLE,
            (0, _) => SNAKE_HEAD,
            _ => SNAKE_BODY,
        };
        painter.rect_filled(cell_rect(p).shrink(1.0), 2.0, color);
    }

    if paused {
        painter.rect_filled(
            board_rect,
            0.0,
            egui::Color32::from_rgba_unmultiplied(0, 0, 0, 128),
        );
        painter.text(
            board_rect.center(),
            egui::Align2::CENTER_CENTER,
            "PAUSED",
            egui::FontId::proportional(48.0),
            egui::Color32::WHITE,
        );
        painter.text(
            board_rect.center() + egui::vec2(0.0, 50.0),
            egui::Align2::CENTER_CENTER,
            "Esc to resume, Enter to abandon the run",
            egui::FontId::proportional(16.0),
            egui::Color32::WHITE,
        );
    }
}
