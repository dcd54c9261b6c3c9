use macroquad::window::{Conf, next_frame};
use tracing_subscriber::EnvFilter;

use ledgehop_client::app::App;
use ledgehop_client::audio::SoundBank;
use ledgehop_client::input::InputState;
use ledgehop_client::renderer::{MacroquadCanvas, SpriteSheet};
use ledgehop_client::settings::ClientSettings;
use ledgehop_core::game_trait::FrameGame;
use ledgehop_core::highscore::ScoreFile;
use ledgehop_core::host::SoundBoard;
use ledgehop_core::time::FrameClock;
use ledgehop_platformer::PlatformerSession;
use ledgehop_platformer::config::PlatformerConfig;
use ledgehop_platformer::level::LevelCatalog;

fn window_conf() -> Conf {
    ClientSettings::load()
        .window
        .conf(&PlatformerConfig::load().field)
}

#[macroquad::main(window_conf)]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let settings = ClientSettings::load();

    let sprites = match SpriteSheet::load(&settings.assets).await {
        Ok(sprites) => sprites,
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(1);
        },
    };
    let mut sounds = match SoundBank::load(&settings.assets, settings.audio.clone()).await {
        Ok(sounds) => sounds,
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(1);
        },
    };

    let config = PlatformerConfig::load();
    let session = PlatformerSession::new(config, LevelCatalog::load());
    let metadata = session.metadata();
    tracing::info!(
        variant = ?session.config().variant,
        "{} starting: {}",
        metadata.name,
        metadata.description
    );

    let mut app = App::new(session, ScoreFile::new(&settings.score_file));
    let mut input = InputState::new();
    let mut clock = FrameClock::new(settings.fps);

    // Window close becomes a quit input so the current frame can finish.
    macroquad::input::prevent_quit();
    sounds.start_music();

    loop {
        input.poll();
        app.step(&input.frame_input(), &mut sounds);
        app.draw(&mut MacroquadCanvas::new(&sprites));
        next_frame().await;
        if app.should_exit() {
            break;
        }
        clock.tick();
    }

    tracing::info!("Ledgehop exiting");
}
