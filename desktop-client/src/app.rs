use std::time::{Duration, Instant};

use eframe::egui;

use common::game::{
    Direction, GameSession, InputEvent, NullSoundPlayer, SessionCommand, SessionState,
};
use common::log;

use crate::SettingsManager;
use crate::ui;

pub struct SnakeArcadeApp {
    session: GameSession,
    settings_manager: SettingsManager,
    // No audio backend is wired up; effects stay named no-ops.
    sounds: NullSoundPlayer,
}

impl SnakeArcadeApp {
    pub fn new(session: GameSession, settings_manager: SettingsManager) -> Self {
        Self {
            session,
            settings_manager,
            sounds: NullSoundPlayer,
        }
    }

    fn collect_input(ctx: &egui::Context) -> Vec<InputEvent> {
        ctx.input(|i| {
            let mut events = Vec::new();
            if i.key_pressed(egui::Key::ArrowUp) || i.key_pressed(egui::Key::W) {
                events.push(InputEvent::Direction(Direction::Up));
            }
            if i.key_pressed(egui::Key::ArrowDown) || i.key_pressed(egui::Key::S) {
                events.push(InputEvent::Direction(Direction::Down));
            }
            if i.key_pressed(egui::Key::ArrowLeft) || i.key_pressed(egui::Key::A) {
                events.push(InputEvent::Direction(Direction::Left));
            }
            if i.key_pressed(egui::Key::ArrowRight) || i.key_pressed(egui::Key::D) {
                events.push(InputEvent::Direction(Direction::Right));
            }
            if i.key_pressed(egui::Key::Enter) {
                events.push(InputEvent::Confirm);
            }
            if i.key_pressed(egui::Key::Escape) {
                events.push(InputEvent::Escape);
            }
            if i.key_pressed(egui::Key::R) {
                events.push(InputEvent::Replay);
            }
            events
        })
    }

    fn run_command(&mut self, command: SessionCommand, ctx: &egui::Context) {
        match command {
            SessionCommand::SaveSettings => {
                if let Err(e) = self.settings_manager.set_config(self.session.settings()) {
                    log!("Failed to save settings: {}", e);
                }
            }
            SessionCommand::Quit => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
        }
    }
}

impl eframe::App for SnakeArcadeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // One timestamp per frame keeps every timer comparison consistent.
        let now = Instant::now();

        let mut commands = Vec::new();
        for event in Self::collect_input(ctx) {
            if let Some(command) = self.session.handle_input(event, now) {
                commands.push(command);
            }
        }
        if let Some(command) = self.session.tick(now, &mut self.sounds) {
            commands.push(command);
        }
        for command in commands {
            self.run_command(command, ctx);
        }

        egui::CentralPanel::default().show(ctx, |ui| match self.session.state() {
            SessionState::Menu => ui::screens::render_menu(ui, &self.session),
            SessionState::Playing => ui::board::render_board(ui, &self.session, now, false),
            SessionState::Paused => ui::board::render_board(ui, &self.session, now, true),
            SessionState::GameOver => ui::screens::render_game_over(ui, &self.session),
            SessionState::HighScores => ui::screens::render_high_scores(ui, &self.session),
            SessionState::Options => ui::screens::render_options(ui, &self.session),
        });

        ctx.request_repaint_after(Duration::from_millis(16));
    }
}
