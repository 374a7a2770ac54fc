use client_core::EntryKind;
use eframe::egui;
use shared::domain::ThemePreference;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChatPalette {
    pub app_background: egui::Color32,
    pub header_background: egui::Color32,
    pub user_bubble: egui::Color32,
    pub user_text: egui::Color32,
    pub bot_bubble: egui::Color32,
    pub bot_text: egui::Color32,
    pub error_bubble: egui::Color32,
    pub error_text: egui::Color32,
    pub hint_text: egui::Color32,
    pub accent: egui::Color32,
}

pub fn palette_for(theme: ThemePreference) -> ChatPalette {
    match theme {
        ThemePreference::Light => ChatPalette {
            app_background: egui::Color32::from_rgb(244, 245, 247),
            header_background: egui::Color32::from_rgb(255, 255, 255),
            user_bubble: egui::Color32::from_rgb(0, 123, 255),
            user_text: egui::Color32::WHITE,
            bot_bubble: egui::Color32::from_rgb(233, 234, 237),
            bot_text: egui::Color32::from_rgb(33, 37, 41),
            error_bubble: egui::Color32::from_rgb(248, 215, 218),
            error_text: egui::Color32::from_rgb(114, 28, 36),
            hint_text: egui::Color32::from_rgb(108, 117, 125),
            accent: egui::Color32::from_rgb(0, 123, 255),
        },
        ThemePreference::Dark => ChatPalette {
            app_background: egui::Color32::from_rgb(26, 26, 30),
            header_background: egui::Color32::from_rgb(18, 18, 20),
            user_bubble: egui::Color32::from_rgb(10, 132, 255),
            user_text: egui::Color32::WHITE,
            bot_bubble: egui::Color32::from_rgb(44, 44, 48),
            bot_text: egui::Color32::from_rgb(236, 237, 240),
            error_bubble: egui::Color32::from_rgb(74, 28, 32),
            error_text: egui::Color32::from_rgb(255, 170, 170),
            hint_text: egui::Color32::from_rgb(129, 130, 138),
            accent: egui::Color32::from_rgb(88, 101, 242),
        },
    }
}

impl ChatPalette {
    /// Fill and text colors for one transcript entry.
    pub fn entry_colors(&self, kind: EntryKind) -> (egui::Color32, egui::Color32) {
        match kind {
            EntryKind::User => (self.user_bubble, self.user_text),
            EntryKind::Bot => (self.bot_bubble, self.bot_text),
            EntryKind::BotError => (self.error_bubble, self.error_text),
        }
    }
}

pub fn visuals_for_theme(theme: ThemePreference) -> egui::Visuals {
    let palette = palette_for(theme);
    let mut visuals = if theme.is_dark() {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    };

    visuals.window_fill = palette.app_background;
    visuals.panel_fill = palette.app_background;
    visuals.hyperlink_color = palette.accent;
    visuals.selection.bg_fill = palette.accent;
    visuals.widgets.active.bg_fill = palette.accent;
    visuals.widgets.hovered.bg_fill = palette.accent.gamma_multiply(0.85);

    let radius = egui::CornerRadius::same(8);
    visuals.widgets.noninteractive.corner_radius = radius;
    visuals.widgets.inactive.corner_radius = radius;
    visuals.widgets.hovered.corner_radius = radius;
    visuals.widgets.active.corner_radius = radius;
    visuals.widgets.open.corner_radius = radius;

    visuals
}

#[cfg(test)]
#[path = "tests/theme_tests.rs"]
mod tests;
