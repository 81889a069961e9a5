//! Frontend state and the render/step loop.

use anyhow::{Context, Result};
use log::{debug, trace};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::Write;
use std::thread;
use std::time::Instant;

use convca_core::prelude::*;

use crate::commands::*;
use crate::config::Config;
use crate::render;

/// Automaton along with the frontend state needed to drive it.
#[derive(Debug)]
pub struct Driver<R: CellRules> {
    automaton: Automaton<R>,
    rng: StdRng,
    running: bool,
}

impl<R: CellRules> Driver<R> {
    /// Creates an empty automaton of the configured size.
    pub fn new(rules: R, config: &Config) -> Result<Self> {
        let automaton =
            Automaton::try_new(rules, config.sim.size).context("Failed to create automaton")?;
        let rng = match config.sim.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            automaton,
            rng,
            running: false,
        })
    }

    pub fn automaton(&self) -> &Automaton<R> {
        &self.automaton
    }
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn do_command(&mut self, command: impl Into<Command>, config: &Config) {
        match command.into() {
            Command::Sim(c) => self.do_sim_command(c),
            Command::Draw(c) => self.do_draw_command(c, config),
        }
    }

    fn do_sim_command(&mut self, command: SimCommand) {
        match command {
            SimCommand::Step(gens) => {
                if self.is_running() {
                    self.do_sim_command(SimCommand::StopRunning);
                }
                self.automaton.steps(gens);
            }
            SimCommand::StartRunning => {
                debug!("Start running at generation {}", self.automaton.generation());
                self.running = true;
            }
            SimCommand::StopRunning => {
                debug!("Stop running at generation {}", self.automaton.generation());
                self.running = false;
            }
            SimCommand::Randomize => self.automaton.randomize_with(&mut self.rng),
        }
    }

    fn do_draw_command(&mut self, command: DrawCommand, config: &Config) {
        match command {
            DrawCommand::Click(pos) => {
                let (x, y) = pos.to_cell(config.gfx.dilation);
                trace!("Click at pixel {} paints cell ({}, {})", pos, x, y);
                self.automaton.paint(x, y);
            }
            DrawCommand::Stamp { pattern, x, y } => self.automaton.stamp(&pattern, x, y),
        }
    }

    /// Draws the initial frame, then steps and draws at the configured
    /// interval until the generation limit is reached.
    pub fn run(&mut self, config: &Config, out: &mut impl Write) -> Result<()> {
        self.draw(config, out)?;
        self.do_command(SimCommand::StartRunning, config);
        while self.is_running() {
            if config.sim.is_limit(self.automaton.generation()) {
                self.do_command(SimCommand::StopRunning, config);
                break;
            }
            let frame_start = Instant::now();
            self.automaton.step();
            self.draw(config, out)?;
            if let Some(remaining) = config.sim.interval.checked_sub(frame_start.elapsed()) {
                thread::sleep(remaining);
            }
        }
        Ok(())
    }

    fn draw(&self, config: &Config, out: &mut impl Write) -> Result<()> {
        render::draw_frame(&self.automaton, &config.gfx, out).context("Failed to draw frame")
    }
}
