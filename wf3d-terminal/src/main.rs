/// WF3D - render a scene script to images and the terminal
///
/// Usage: wf3d <script> [config.toml]
///
/// Without a config path, `wf3d.toml` in the current directory is used when
/// present. Set `RUST_LOG=debug` to trace every command.

use anyhow::{Context, Result};
use log::info;
use std::env;
use std::fs;
use wf3d_core::run_script;
use wf3d_terminal::{TerminalSink, Wf3dConfig};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <script> [config.toml]", args[0]);
        std::process::exit(2);
    }

    let mut config = match args.get(2) {
        Some(path) => Wf3dConfig::load_from_file(path),
        None => Wf3dConfig::load_or_default(),
    }
    .map_err(anyhow::Error::msg)?;
    config.merge_with_env();

    let script_path = &args[1];
    let source = fs::read_to_string(script_path)
        .with_context(|| format!("failed to read script {}", script_path))?;

    let settings = config.to_settings();
    info!(
        "rendering {} into a {}x{} frame",
        script_path, settings.width, settings.height
    );

    let mut sink = TerminalSink::new(config.display.enabled);
    let frame = run_script(&source, settings, &mut sink)
        .with_context(|| format!("failed to render {}", script_path))?;

    info!(
        "done: {} lit pixels, {} image(s) saved",
        frame.lit_pixels(),
        sink.saved().len()
    );
    Ok(())
}
