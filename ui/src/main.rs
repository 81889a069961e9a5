//! Terminal frontend for convolution-based cellular automata.

#![warn(missing_docs)]

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Parser};
use log::{debug, info, LevelFilter};
use simple_logger::SimpleLogger;
use std::io;
use std::time::Duration;

use convca_core::patterns;
use convca_core::prelude::*;

mod commands;
mod config;
mod driver;
mod input;
mod render;

use commands::{Command, DrawCommand, SimCommand};
use config::{Config, RuleKind};
use driver::Driver;
use input::PixelPos;

/// Runs a cellular automaton on a toroidal grid and draws it in the terminal.
#[derive(Parser, Debug)]
#[command(name = "convca", version, about)]
struct Args {
    /// Rule to simulate.
    #[arg(long, value_enum, default_value_t = RuleKind::Life)]
    rule: RuleKind,
    /// Grid width, in cells.
    #[arg(long, default_value_t = 64)]
    width: usize,
    /// Grid height, in cells.
    #[arg(long, default_value_t = 32)]
    height: usize,
    /// Built-in pattern to place in the middle of the grid.
    #[arg(long)]
    pattern: Option<String>,
    /// Fill the grid with random cells.
    #[arg(long)]
    random: bool,
    /// Seed for random fills.
    #[arg(long)]
    seed: Option<u64>,
    /// Number of generations to simulate, or 0 to run until interrupted.
    #[arg(short, long, default_value_t = 0)]
    generations: usize,
    /// Milliseconds between generations.
    #[arg(long, default_value_t = 100)]
    interval_ms: u64,
    /// Pixels along each side of a cell, used to map `--paint` coordinates.
    #[arg(long, default_value_t = 8)]
    dilation: usize,
    /// Paint the cell under a pixel, given as PX,PY. May be repeated.
    #[arg(long = "paint", value_name = "PX,PY")]
    paint: Vec<PixelPos>,
    /// Generations to simulate before drawing the first frame.
    #[arg(long, value_name = "N", default_value_t = 0)]
    step: usize,
    /// Lenia kernel radius.
    #[arg(long, default_value_t = LeniaParams::default().radius)]
    radius: usize,
    /// Lenia growth center.
    #[arg(long, default_value_t = LeniaParams::default().mu)]
    mu: f64,
    /// Lenia growth width.
    #[arg(long, default_value_t = LeniaParams::default().sigma)]
    sigma: f64,
    /// Lenia time step.
    #[arg(long, default_value_t = LeniaParams::default().dt)]
    dt: f64,
    /// Draw cells with 24-bit terminal colors instead of glyphs.
    #[arg(long)]
    true_color: bool,
    /// Do not clear the terminal between frames.
    #[arg(long)]
    no_clear: bool,
    /// Increase log verbosity. May be repeated.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
    /// Disable logging.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Args {
    fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Off;
        }
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    fn config(&self) -> Result<Config> {
        if self.dilation == 0 {
            return Err(anyhow!("--dilation must be positive"));
        }
        let mut config = Config::default();
        config.sim.rule = self.rule;
        config.sim.lenia = LeniaParams {
            radius: self.radius,
            mu: self.mu,
            sigma: self.sigma,
            dt: self.dt,
        };
        config.sim.size = (self.width, self.height);
        config.sim.generations = self.generations;
        config.sim.interval = Duration::from_millis(self.interval_ms);
        config.sim.seed = self.seed;
        config.gfx.dilation = self.dilation;
        config.gfx.true_color = self.true_color;
        config.gfx.clear_screen = !self.no_clear;
        Ok(config)
    }

    /// Returns the commands that set up the initial grid.
    fn setup_commands(&self) -> Result<Vec<Command>> {
        let mut ret = vec![];
        if self.random {
            ret.push(SimCommand::Randomize.into());
        }
        if let Some(name) = &self.pattern {
            let pattern = patterns::find(name).ok_or_else(|| {
                anyhow!(
                    "Unknown pattern {:?}; expected one of: {}",
                    name,
                    patterns::names(),
                )
            })?;
            let (w, h) = pattern.size();
            let x = (self.width as isize - w as isize) / 2;
            let y = (self.height as isize - h as isize) / 2;
            ret.push(DrawCommand::Stamp { pattern, x, y }.into());
        }
        ret.extend(self.paint.iter().map(|&pos| DrawCommand::Click(pos).into()));
        if self.step > 0 {
            ret.push(SimCommand::Step(self.step).into());
        }
        Ok(ret)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    SimpleLogger::new()
        .with_level(args.log_level())
        .init()
        .context("Failed to initialize logger")?;
    info!("Starting convca v{} ...", env!("CARGO_PKG_VERSION"));

    let config = args.config()?;
    let setup = args.setup_commands()?;
    debug!("{:#?}", config);

    match config.sim.rule {
        RuleKind::Life => run(Life::new(), &config, setup),
        RuleKind::Lenia => {
            let rule = Lenia::new(config.sim.lenia).context("Invalid Lenia parameters")?;
            run(rule, &config, setup)
        }
    }
}

fn run<R: CellRules>(rules: R, config: &Config, setup: Vec<Command>) -> Result<()> {
    info!("Running {} on a {}x{} grid", rules, config.sim.size.0, config.sim.size.1);
    let mut driver = Driver::new(rules, config)?;
    for command in setup {
        driver.do_command(command, config);
    }
    driver.run(config, &mut io::stdout().lock())?;
    let automaton = driver.automaton();
    info!(
        "Stopped at generation {} with population {}",
        automaton.generation(),
        automaton.population(),
    );
    Ok(())
}
