//! pathgrid: step-by-step Dijkstra visualizer in the terminal.

use clap::Parser;
use log::info;
use pathgrid_lib::Visualizer;
use pathgrid_lib::cli::Cli;
use pathgrid_term::{App, CrosstermDriver};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // The terminal shows the alternate screen while running; keep stderr quiet
    // unless RUST_LOG asks for more.
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Error)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let config = cli.config();
    config.validate()?;

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let model = Visualizer::new(&config, cli.speed(), rng)?;

    let (width, height) = CrosstermDriver::size()?;
    let (need_width, need_height) = Visualizer::screen_size(&config);
    if width < need_width || height < need_height {
        info!("terminal {width}x{height} is smaller than the {need_width}x{need_height} grid");
    }

    let mut app = App::new(model, CrosstermDriver::new(), width, height);
    app.run()?;

    let (model, _) = app.into_parts();
    if let Some(e) = model.fatal() {
        return Err(e.clone().into());
    }
    Ok(())
}
