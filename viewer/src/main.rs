mod input;
mod terminal;

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{App, Arg, ArgMatches};
use log::info;
use raycast::{
    config::{load_config, Preset, SceneConfig},
    render::TextMode,
    LightingEngine, SceneState,
};

use crate::terminal::TerminalDisplay;

/// About 60 frames a second.
const FRAME_TIME: Duration = Duration::from_millis(16);

fn main() -> Result<()> {
    let matches = App::new("raycast viewer")
        .version("0.1")
        .about("Lights a grid of cells with one point light and shows it in the terminal")
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("FILE")
                .help("A YAML scene file"),
        )
        .arg(
            Arg::with_name("preset")
                .short("p")
                .long("preset")
                .value_name("NAME")
                .possible_values(&["canvas", "terminal"])
                .help("The layout to start from"),
        )
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .value_name("N")
                .help("Fixes the reflection jitter"),
        )
        .arg(
            Arg::with_name("png")
                .long("png")
                .value_name("FILE")
                .help("Render one frame to a PNG and exit"),
        )
        .arg(
            Arg::with_name("cell-size")
                .long("cell-size")
                .value_name("PX")
                .default_value("8")
                .help("Width in pixels of one cell in the PNG"),
        )
        .arg(
            Arg::with_name("text")
                .short("t")
                .long("text")
                .value_name("MODE")
                .possible_values(&["glyph", "shaded", "ansi"])
                .help("Print one frame as text and exit"),
        )
        .get_matches();

    let interactive = !(matches.is_present("png") || matches.is_present("text"));
    let default_filter = if interactive { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = scene_config(&matches, !matches.is_present("png"))?;
    let scene = config.build().context("invalid scene")?;

    let seed = match matches.value_of("seed") {
        Some(seed) => Some(seed.parse::<u64>().context("--seed must be a whole number")?),
        None => config.seed,
    };
    let mut engine = seed.map(LightingEngine::seeded).unwrap_or_default();

    if let Some(path) = matches.value_of("png") {
        let cell_w: u32 = matches
            .value_of("cell-size")
            .unwrap_or("8")
            .parse()
            .context("--cell-size must be a whole number of pixels")?;
        let cell_h = (cell_w as f64 / scene.grid.aspect).round().max(1.) as u32;

        let frame = engine.compute_frame(&scene);
        frame
            .save_png(path, cell_w, cell_h)
            .with_context(|| format!("could not write {}", path))?;
        info!("wrote {}", path);
        return Ok(());
    }

    if let Some(mode) = matches.value_of("text") {
        let mode: TextMode = mode.parse().map_err(anyhow::Error::msg)?;
        print!("{}", engine.compute_frame(&scene).to_text(mode));
        return Ok(());
    }

    run_interactive(scene, engine)
}

/// The scene file if one was given, with `--preset` overriding its preset.
/// Interactive and text runs start from the terminal layout by default.
fn scene_config(matches: &ArgMatches, terminal_default: bool) -> Result<SceneConfig> {
    let mut config = match matches.value_of("config") {
        Some(path) => load_config(path).with_context(|| format!("could not load {}", path))?,
        None if terminal_default => SceneConfig::preset(Preset::Terminal),
        None => SceneConfig::default(),
    };

    if let Some(preset) = matches.value_of("preset") {
        config.preset = preset.parse()?;
    }
    Ok(config)
}

fn run_interactive(mut scene: SceneState, mut engine: LightingEngine) -> Result<()> {
    let mut terminal = TerminalDisplay::new().context("could not set up the terminal")?;
    let mut last_frame = Instant::now() - FRAME_TIME;

    'main: loop {
        while let Some(event) = terminal.poll_input(Duration::from_millis(1))? {
            if !input::apply(input::parse_event(event), &mut scene) {
                break 'main;
            }
        }

        let elapsed = last_frame.elapsed();
        if elapsed < FRAME_TIME {
            std::thread::sleep(FRAME_TIME - elapsed);
            continue;
        }
        last_frame = Instant::now();

        let frame = engine.compute_frame(&scene);
        let fps = 1. / elapsed.as_secs_f64();
        if let Err(e) = terminal.render(&frame.to_ansi(), &status_line(&scene, fps)) {
            if e.kind() == std::io::ErrorKind::BrokenPipe {
                break;
            }
            return Err(e).context("could not draw frame");
        }
    }

    Ok(())
}

fn status_line(scene: &SceneState, fps: f64) -> String {
    let on_off = |b: bool| if b { "on" } else { "off" };
    let (px, py) = scene.pointer;
    let (lx, ly) = scene.light.position;
    format!(
        "{:.0} fps | click moves {} | pointer {},{} | light {},{} @ {:.0} | reflections {} \
         | follow {} | [wasd] light [+-] intensity [r]eflect [f]ollow [q]uit",
        fps,
        scene.selection.label(),
        px,
        py,
        lx,
        ly,
        scene.light.intensity,
        on_off(scene.reflections),
        on_off(scene.follow_pointer),
    )
}
