// Accessors on the sphere types are exercised by the test suites
#![allow(dead_code)]

mod config;
mod display;
mod error;
mod sphere;
mod sprite;
mod util;

use config::AppConfig;
use display::{Display, InputEvent, PixelBuffer, RenderTarget};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use sdl2::keyboard::Keycode;
use sphere::Sphere;
use util::FrameTimer;

/// Height of the built-in face sprite when no sprite file is given
const FALLBACK_SPRITE_HEIGHT: u32 = 16;

fn print_help() {
    let defaults = AppConfig::default();
    println!("Usage: slicesphere [OPTIONS]");
    println!();
    println!("Options:");
    println!(
        "  --config PATH, -c PATH    JSON config file (default: {})",
        config::DEFAULT_CONFIG_PATH
    );
    println!("  --sprite PATH, -s PATH    Sprite image (PNG, BMP or GIF)");
    println!(
        "  --scale N                 Sprite magnification, 1..={} (default: {})",
        config::MAX_SCALE,
        defaults.scale
    );
    println!("  --seed N                  Seed for repeatable runs");
    println!(
        "  --width W, -w W           Window width (default: {})",
        defaults.window_width
    );
    println!(
        "  --height H, -h H          Window height (default: {})",
        defaults.window_height
    );
    println!("  --resolution WxH, -r WxH  Window size (e.g., 1600x960)");
    println!("  --no-vsync                Pace frames with a timer instead of VSync");
    println!("  --write-config PATH       Write the merged config as JSON and exit");
    println!("  --help                    Show this help message");
}

/// Load the configured sprite, falling back to the built-in face
fn load_sprite(config: &AppConfig) -> PixelBuffer {
    let Some(path) = &config.sprite else {
        log::info!("No sprite configured, using built-in face");
        return sprite::procedural_face(FALLBACK_SPRITE_HEIGHT);
    };
    match sprite::load(path) {
        Ok(buffer) => {
            log::info!(
                "Loaded sprite {} ({}x{})",
                path.display(),
                buffer.width(),
                buffer.height()
            );
            buffer
        },
        Err(e) => {
            log::warn!("{}; using built-in face", e);
            sprite::procedural_face(FALLBACK_SPRITE_HEIGHT)
        },
    }
}

/// Canvas centre, nudged by up to `jitter` pixels on each axis
fn spawn_point<R: Rng>(config: &AppConfig, rng: &mut R) -> (i32, i32) {
    let cx = config.canvas_width as i32 / 2;
    let cy = config.canvas_height as i32 / 2;
    let jitter = config.spawn_jitter.max(0);
    (
        cx + rng.random_range(-jitter..=jitter),
        cy + rng.random_range(-jitter..=jitter),
    )
}

fn main() -> Result<(), String> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help") {
        print_help();
        return Ok(());
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut config = AppConfig::load_or_default(config::config_path(&args));
    config.apply_args(&args).map_err(|e| e.to_string())?;

    if let Some(path) = config::write_config_path(&args) {
        config.save(&path).map_err(|e| e.to_string())?;
        log::info!("Wrote config to {}", path.display());
        return Ok(());
    }

    let seed = config.seed.unwrap_or_else(rand::random);
    log::info!("Seed: {}", seed);
    let mut rng = Pcg32::seed_from_u64(seed);

    let sprite = load_sprite(&config);
    let params = config.sphere_params();

    let (mut display, texture_creator) = Display::with_options(
        "slicesphere",
        config.window_width,
        config.window_height,
        config.vsync,
    )?;
    let mut target = RenderTarget::with_size(&texture_creator, config.canvas_width, config.canvas_height)?;
    let mut canvas = PixelBuffer::with_size(config.canvas_width, config.canvas_height);

    log::info!(
        "Window {}x{}, canvas {}x{}, VSync {}",
        config.window_width,
        config.window_height,
        config.canvas_width,
        config.canvas_height,
        if config.vsync { "on" } else { "off" }
    );
    log::info!("Controls: Escape quits, F toggles FPS logging, any other key respawns");

    let mut spheres = vec![Sphere::new(&sprite, spawn_point(&config, &mut rng), &params, &mut rng)];

    // With VSync the display blocks in present; otherwise sleep to the target rate
    let mut timer = FrameTimer::new(if config.vsync { 0 } else { config.fps }, 60);
    let mut show_fps = false;
    let mut frame: u64 = 0;

    let floor = config.canvas_height as i32;
    let [bg_r, bg_g, bg_b] = config.background;

    'main: loop {
        for event in display.poll_events() {
            match event {
                InputEvent::Quit | InputEvent::KeyDown(Keycode::Escape) => break 'main,
                InputEvent::KeyDown(Keycode::F) => {
                    show_fps = !show_fps;
                    log::info!("FPS logging {}", if show_fps { "on" } else { "off" });
                },
                InputEvent::KeyDown(_) => {
                    let anchor = spawn_point(&config, &mut rng);
                    log::info!("Respawn at {:?}", anchor);
                    spheres = vec![Sphere::new(&sprite, anchor, &params, &mut rng)];
                },
            }
        }

        canvas.clear(bg_r, bg_g, bg_b);
        for sphere in &mut spheres {
            sphere.update(floor, &mut rng);
            sphere.draw(&mut canvas);
        }

        display.present(&mut target, &canvas)?;
        timer.pace();

        frame += 1;
        if timer.window_complete(frame) {
            let level = if show_fps { log::Level::Info } else { log::Level::Debug };
            log::log!(
                level,
                "FPS: {:.1} ({:.2} ms/frame, {} sphere(s))",
                timer.avg_fps(),
                timer.avg_frame_time_ms(),
                spheres.len()
            );
        }
    }

    log::info!("Exiting after {} frames", frame);
    Ok(())
}
