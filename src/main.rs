//! Drop Spawn headless demo
//!
//! Runs a spawn session against the headless world and reports telemetry.
//!
//! Usage: `drop-spawn [CONFIG.json] [--seed N] [--seconds S] [--booster X]`

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::cell::Cell;
    use std::path::PathBuf;
    use std::rc::Rc;

    use clap::Parser;
    use drop_spawn::SpawnConfig;
    use drop_spawn::consts::*;
    use drop_spawn::sim::{Booster, HeadlessWorld, PcgRandom, SpawnEngine, SpawnEvent};

    /// Frame time of the simulated display (deliberately not a multiple of SIM_DT)
    const FRAME_DT: f32 = 1.0 / 50.0;

    #[derive(Parser, Debug)]
    #[command(name = "drop-spawn")]
    #[command(about = "Run a headless spawn session and report telemetry")]
    pub(crate) struct Args {
        /// Spawn config JSON (built-in catalog when omitted)
        pub(crate) config: Option<PathBuf>,

        /// RNG seed
        #[arg(long, default_value_t = 0x5eed)]
        pub(crate) seed: u64,

        /// Simulated session length in seconds
        #[arg(long, default_value_t = 60.0)]
        pub(crate) seconds: f32,

        /// Speed booster multiplier, off when omitted
        #[arg(long)]
        pub(crate) booster: Option<f32>,
    }

    pub fn run(options: Args) -> Result<(), Box<dyn std::error::Error>> {
        let config = match &options.config {
            Some(path) => SpawnConfig::load(path)?,
            None => SpawnConfig::builtin()?,
        };

        let kill_y = config.settings.despawn_y;
        let active = Rc::new(Cell::new(true));
        let session = active.clone();
        let booster = options.booster.map_or(Booster::OFF, Booster::on);

        let mut engine = SpawnEngine::new(
            config,
            HeadlessWorld::new(kill_y),
            PcgRandom::new(options.seed),
            move || session.get(),
            move || booster,
        )?;

        log::info!(
            "Running {:.0}s session with seed {:#x} ({} catalog items)",
            options.seconds,
            options.seed,
            engine.catalog().len()
        );

        let mut accumulator = 0.0;
        let mut elapsed = 0.0;
        let mut next_report = 1.0;
        let mut spawned_events = 0usize;
        let mut patterns = 0usize;

        while elapsed < options.seconds {
            accumulator += FRAME_DT;
            elapsed += FRAME_DT;

            let mut substeps = 0;
            while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                engine.factory_mut().step(SIM_DT);
                engine.tick(SIM_DT);
                accumulator -= SIM_DT;
                substeps += 1;
            }

            for event in engine.drain_events() {
                match event {
                    SpawnEvent::Spawned { .. } => spawned_events += 1,
                    SpawnEvent::PatternStarted(_) => patterns += 1,
                    SpawnEvent::WaveChanged { index, name } => {
                        log::info!("[{elapsed:6.2}s] wave {index}: {name}")
                    }
                    _ => {}
                }
            }

            if elapsed >= next_report {
                let t = engine.telemetry();
                log::info!(
                    "[{:6.2}s] {} {:>3.0}% | x{:.2} | spawned {} failed {} | live {} (world {})",
                    t.game_time,
                    t.wave_name,
                    t.wave_progress * 100.0,
                    t.difficulty,
                    t.spawned,
                    t.failed,
                    t.live_objects,
                    engine.factory().live_count()
                );
                next_report += 1.0;
            }
        }

        active.set(false);
        engine.tick(SIM_DT);

        let telemetry = engine.telemetry();
        println!("{}", serde_json::to_string_pretty(&telemetry)?);
        println!("spawn events: {spawned_events}, patterns started: {patterns}");
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Drop Spawn (headless) starting...");

    let args = <native::Args as clap::Parser>::parse();
    if let Err(err) = native::run(args) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::native::Args;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["drop-spawn"]).unwrap();
        assert!(args.config.is_none());
        assert_eq!(args.seed, 0x5eed);
        assert_eq!(args.seconds, 60.0);
        assert_eq!(args.booster, None);
    }

    #[test]
    fn test_all_options() {
        let args = Args::try_parse_from([
            "drop-spawn",
            "waves.json",
            "--seed",
            "7",
            "--seconds",
            "12.5",
            "--booster",
            "1.5",
        ])
        .unwrap();
        assert_eq!(args.config.as_deref(), Some(std::path::Path::new("waves.json")));
        assert_eq!(args.seed, 7);
        assert_eq!(args.seconds, 12.5);
        assert_eq!(args.booster, Some(1.5));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(Args::try_parse_from(["drop-spawn", "--seed", "abc"]).is_err());
        assert!(Args::try_parse_from(["drop-spawn", "--unknown"]).is_err());
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The engine is a library on the web; the host game drives it
}
