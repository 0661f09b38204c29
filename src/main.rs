use eframe::egui;
use flashcards::{
    gui::{
        settings::{
            SettingsData,
            SETTINGS_FILE,
        },
        FlashcardApp,
    },
    persistence::load_json_or_default,
};

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = load_json_or_default::<SettingsData>(SETTINGS_FILE).sanitized();
    log::info!("Starting with vocabulary source {}", settings.vocabulary_source);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([560.0, 680.0])
            .with_min_inner_size([360.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Flashcards",
        options,
        Box::new(|cc| Ok(Box::new(FlashcardApp::new(cc, settings)))),
    )
}
