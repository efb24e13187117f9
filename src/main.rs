//! Up-Down Journey headless runner
//!
//! Runs the simulation with a scripted pilot and a recording canvas, then
//! prints the final HUD. Without `--scene` an endless game is played.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::time::{Duration, Instant};

    use clap::Parser;
    use updown_journey::platform::DemoPilot;
    use updown_journey::render::DrawList;
    use updown_journey::scene::{PresetLibrary, Scene};
    use updown_journey::sim::{Actor, Game, GamePhase, WorldContext};
    use updown_journey::Settings;

    /// Target render cadence
    const FRAME_TIME: Duration = Duration::from_millis(16);

    #[derive(Debug, Parser)]
    #[command(author, version, about, long_about = None)]
    struct CliArgs {
        /// Scene JSON to play. Without it an endless descent is generated.
        #[arg(long, value_name = "FILE")]
        scene: Option<PathBuf>,
        /// Directory of monster preset JSON files used by the scene.
        #[arg(long, value_name = "DIR", requires = "scene")]
        presets: Option<PathBuf>,
        /// Settings JSON; missing or invalid files fall back to defaults.
        #[arg(long, value_name = "FILE")]
        settings: Option<PathBuf>,
        /// Stop after this many render frames.
        #[arg(long, value_name = "COUNT", value_parser = clap::value_parser!(u64).range(1..))]
        frames: Option<u64>,
        /// RNG seed; defaults to the wall clock.
        #[arg(long)]
        seed: Option<u64>,
    }

    pub fn run() {
        env_logger::init();

        let args = CliArgs::parse();

        let settings = args
            .settings
            .as_deref()
            .map(Settings::load_or_default)
            .unwrap_or_default();
        let seed = args.seed.unwrap_or_else(WorldContext::clock_seed);

        let mut game = match &args.scene {
            Some(path) => {
                let scene = Scene::load_or_empty(path);
                let presets = args
                    .presets
                    .as_deref()
                    .map(PresetLibrary::load_dir)
                    .unwrap_or_default();
                Game::from_scene(settings, &scene, &presets, seed)
            }
            None => Game::endless(settings, seed),
        };
        log::info!("Up-Down Journey starting (seed {seed})");

        let mut pilot = DemoPilot::new();
        let mut canvas = DrawList::new();
        let mut last = Instant::now();
        let mut frames = 0u64;

        while game.is_running() {
            let now = Instant::now();
            let dt = now.duration_since(last).as_secs_f32();
            last = now;

            let input = match game.player() {
                Some(player) => pilot.steer(
                    player.rectangle().center().x,
                    game.demo_target(),
                    player.grounded(),
                    dt,
                ),
                None => Default::default(),
            };
            game.frame(dt, &input);

            canvas.clear();
            game.draw(&mut canvas);

            frames += 1;
            if game.phase() == GamePhase::GameOver {
                log::info!("Game over after {frames} frames");
                game.stop();
            } else if args.frames.is_some_and(|limit| frames >= limit) {
                log::info!("Frame limit reached");
                game.stop();
            }

            if let Some(rest) = FRAME_TIME.checked_sub(now.elapsed()) {
                std::thread::sleep(rest);
            }
        }

        let hud = game.hud();
        println!(
            "score {} | health {} | lives {} | monsters {} | physics ticks {} | last draw {} commands",
            hud.score,
            hud.health,
            hud.lives,
            hud.monsters_defeated,
            game.physics_ticks(),
            canvas.len()
        );
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_cli_flags() {
            let args = CliArgs::try_parse_from([
                "updown-journey",
                "--scene",
                "levels/one.json",
                "--presets",
                "presets",
                "--frames",
                "600",
                "--seed",
                "7",
            ])
            .unwrap();
            assert_eq!(args.scene, Some(PathBuf::from("levels/one.json")));
            assert_eq!(args.presets, Some(PathBuf::from("presets")));
            assert_eq!(args.frames, Some(600));
            assert_eq!(args.seed, Some(7));
            assert!(args.settings.is_none());
        }

        #[test]
        fn test_cli_rejects_bad_values() {
            assert!(CliArgs::try_parse_from(["updown-journey", "--frames", "0"]).is_err());
            assert!(CliArgs::try_parse_from(["updown-journey", "--presets", "presets"]).is_err());
            assert!(CliArgs::try_parse_from(["updown-journey", "--jump"]).is_err());
        }
    }
}
