use eframe::egui::{
    self,
    RichText,
};
use egui::{
    epaint::Shadow,
    style::{
        Selection,
        WidgetVisuals,
        Widgets,
    },
    Color32,
    Stroke,
    Visuals,
};

#[derive(Clone)]
pub struct Theme {
    dark: ThemeDetails,
    light: ThemeDetails,
}

impl Default for Theme {
    fn default() -> Self {
        Self::study()
    }
}

impl Theme {
    pub fn study() -> Self {
        Theme { dark: ThemeDetails::study_dark(), light: ThemeDetails::study_light() }
    }

    fn details(&self, ctx: &egui::Context) -> &ThemeDetails {
        if ctx.style().visuals.dark_mode {
            &self.dark
        } else {
            &self.light
        }
    }

    /// Highlight for the speaker icon of the playing control.
    pub fn accent(&self, ctx: &egui::Context) -> Color32 {
        self.details(ctx).accent
    }

    /// Idle speaker icons and secondary text.
    pub fn muted(&self, ctx: &egui::Context) -> Color32 {
        self.details(ctx).muted
    }

    pub fn bookmark(&self, ctx: &egui::Context) -> Color32 {
        self.details(ctx).bookmark
    }

    pub fn word(&self, ctx: &egui::Context, content: &str) -> RichText {
        RichText::new(content).size(30.0).strong().color(self.details(ctx).foreground)
    }

    pub fn card_fill(&self, ctx: &egui::Context) -> Color32 {
        self.details(ctx).background_light
    }
}

#[derive(Clone)]
pub struct ThemeDetails {
    background: Color32,
    foreground: Color32,
    selection: Color32,
    muted: Color32,
    accent: Color32,
    bookmark: Color32,
    red: Color32,
    orange: Color32,
    background_darker: Color32,
    background_dark: Color32,
    background_light: Color32,
    background_lighter: Color32,
}

impl ThemeDetails {
    fn study_dark() -> Self {
        Self {
            background: Color32::from_rgb(0x28, 0x2a, 0x36),
            foreground: Color32::from_rgb(0xf8, 0xf8, 0xf2),
            selection: Color32::from_rgb(0x44, 0x47, 0x5a),
            muted: Color32::from_rgb(0x9a, 0x9c, 0xa8),
            accent: Color32::from_rgb(0x4a, 0x90, 0xe2),
            bookmark: Color32::from_rgb(0xf5, 0xc2, 0x42),
            red: Color32::from_rgb(0xff, 0x55, 0x55),
            orange: Color32::from_rgb(0xff, 0xb8, 0x6c),
            background_darker: Color32::from_rgb(25, 26, 33),
            background_dark: Color32::from_rgb(33, 35, 53),
            background_light: Color32::from_rgb(52, 54, 66),
            background_lighter: Color32::from_rgb(66, 69, 80),
        }
    }

    fn study_light() -> Self {
        Self {
            background: Color32::from_rgb(248, 248, 245),
            foreground: Color32::from_rgb(40, 42, 54),
            selection: Color32::from_rgb(200, 214, 236),
            muted: Color32::from_rgb(0x55, 0x55, 0x55),
            accent: Color32::from_rgb(0x4a, 0x90, 0xe2),
            bookmark: Color32::from_rgb(0xe0, 0xa0, 0x10),
            red: Color32::from_rgb(200, 80, 80),
            orange: Color32::from_rgb(220, 140, 60),
            background_darker: Color32::from_rgb(232, 232, 228),
            background_dark: Color32::from_rgb(240, 240, 236),
            background_light: Color32::from_rgb(255, 255, 252),
            background_lighter: Color32::from_rgb(255, 255, 255),
        }
    }
}

pub fn set_theme(ctx: &egui::Context, theme: &Theme) {
    set_theme_variant(ctx, &theme.dark, true);
    set_theme_variant(ctx, &theme.light, false);
}

fn widget(default: WidgetVisuals, theme: &ThemeDetails, bg_fill: Color32, border: Color32) -> WidgetVisuals {
    WidgetVisuals {
        bg_fill,
        weak_bg_fill: theme.background_lighter,
        bg_stroke: Stroke { color: border, ..default.bg_stroke },
        fg_stroke: Stroke { color: theme.foreground, ..default.fg_stroke },
        ..default
    }
}

fn set_theme_variant(ctx: &egui::Context, theme: &ThemeDetails, is_dark: bool) {
    let (default, variant) = match is_dark {
        true => (Visuals::dark(), egui::Theme::Dark),
        false => (Visuals::light(), egui::Theme::Light),
    };

    ctx.set_visuals_of(
        variant,
        Visuals {
            dark_mode: is_dark,
            widgets: Widgets {
                noninteractive: widget(
                    default.widgets.noninteractive,
                    theme,
                    theme.background,
                    theme.background_dark,
                ),
                inactive: widget(
                    default.widgets.inactive,
                    theme,
                    theme.background_light,
                    theme.background_dark,
                ),
                hovered: widget(default.widgets.hovered, theme, theme.selection, theme.accent),
                active: widget(default.widgets.active, theme, theme.selection, theme.accent),
                open: widget(default.widgets.open, theme, theme.background_dark, theme.accent),
            },
            selection: Selection {
                bg_fill: theme.selection,
                stroke: Stroke { color: theme.foreground, ..default.selection.stroke },
            },
            hyperlink_color: theme.accent,
            faint_bg_color: match is_dark {
                true => theme.background_darker,
                false => theme.background_light,
            },
            extreme_bg_color: theme.background_darker,
            code_bg_color: theme.background_dark,
            error_fg_color: theme.red,
            warn_fg_color: theme.orange,
            window_shadow: Shadow { color: theme.background_darker, ..default.window_shadow },
            window_fill: theme.background,
            window_stroke: Stroke { color: theme.background_light, ..default.window_stroke },
            panel_fill: theme.background_dark,
            popup_shadow: Shadow { color: theme.background_dark, ..default.popup_shadow },
            ..default
        },
    );
}
