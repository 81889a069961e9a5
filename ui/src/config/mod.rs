mod gfx;
mod sim;

pub use gfx::*;
pub use sim::*;

#[derive(Debug, Default)]
pub struct Config {
    pub gfx: GfxConfig,
    pub sim: SimConfig,
}
