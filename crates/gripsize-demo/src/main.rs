//! Headless demo: replays a few drags and prints the element box after each.
//!
//! Usage: `gripsize-demo [config.json]`. Set `RUST_LOG=debug` (or `trace`)
//! to see session and sample logs.

use gripsize_core::{
    ConfigError, Direction, ElementBox, Instant, MemoryHost, PointerEvent, ResizeConfig, ResizeError, ResizeEvent,
    Resizer,
};
use kurbo::Point;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
enum DemoError {
    #[error("Cannot read {path}: {source}")]
    Read { path: String, source: std::io::Error },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Resize(#[from] ResizeError),
}

/// One scripted drag: a handle and the pointer path relative to the press.
struct Gesture {
    handle: &'static str,
    path: &'static [(f64, f64)],
}

const SCRIPT: &[Gesture] = &[
    Gesture { handle: "right", path: &[(20.0, 0.0), (50.0, 0.0)] },
    Gesture { handle: "left", path: &[(-10.0, 0.0), (-30.0, 0.0)] },
    Gesture { handle: "bottomRight", path: &[(15.0, 15.0), (40.0, 25.0)] },
    Gesture { handle: "top", path: &[(0.0, 10.0)] },
];

fn load_config() -> Result<ResizeConfig, DemoError> {
    match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path).map_err(|source| DemoError::Read { path, source })?;
            Ok(ResizeConfig::from_json(&json)?)
        }
        None => Ok(ResizeConfig::new().with_controls(Direction::ALL)),
    }
}

fn run() -> Result<(), DemoError> {
    let config = load_config()?;
    log::info!("Config: {}", serde_json::to_string(&config).unwrap_or_default());

    let mut resizer = Resizer::new(MemoryHost::new(200.0, 100.0), config)?;
    resizer.on(ResizeEvent::End, |name, element: &ElementBox| {
        let t = element.transform.translation();
        println!(
            "{:<12} -> {:>7.1} x {:<7.1} at ({:.1}, {:.1})",
            name.as_str(),
            element.size.width,
            element.size.height,
            t.x,
            t.y
        );
    });

    let mut now = Instant::now();
    let mut tick = || {
        now += Duration::from_millis(20);
        now
    };

    for gesture in SCRIPT {
        let started = resizer.handle_pointer_event(
            PointerEvent::Down {
                target: Some(gesture.handle.to_string()),
                position: Point::ZERO,
            },
            tick(),
        )?;
        if started.is_none() {
            println!("{:<12} -> disabled", gesture.handle);
            continue;
        }
        for &(x, y) in gesture.path {
            resizer.handle_pointer_event(PointerEvent::Move { position: Point::new(x, y) }, tick())?;
        }
        resizer.handle_pointer_event(PointerEvent::Up { position: Point::ZERO }, tick())?;
    }

    resizer.destroy();
    Ok(())
}

fn main() {
    env_logger::init();
    log::info!("Starting gripsize demo");

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
