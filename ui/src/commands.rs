use convca_core::prelude::*;

use crate::input::PixelPos;

macro_rules! impl_command_from {
    ( Command::$command_variant:ident($inner:ty) ) => {
        impl From<$inner> for Command {
            fn from(c: $inner) -> Self {
                Self::$command_variant(c)
            }
        }
    };
}

#[derive(Debug, Clone)]
pub enum Command {
    Sim(SimCommand),
    Draw(DrawCommand),
}

#[derive(Debug, Clone)]
pub enum SimCommand {
    Step(usize),

    StartRunning,
    StopRunning,

    Randomize,
}
impl_command_from!(Command::Sim(SimCommand));

#[derive(Debug, Clone)]
pub enum DrawCommand {
    /// Paints the cell under a pixel.
    Click(PixelPos),
    /// Paints a pattern with its top-left corner at a cell.
    Stamp { pattern: Pattern, x: isize, y: isize },
}
impl_command_from!(Command::Draw(DrawCommand));
