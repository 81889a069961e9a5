//! Terminal rendering of the grid.

use crossterm::style::{self, Print, ResetColor, SetBackgroundColor};
use crossterm::{cursor, queue, terminal};
use std::io::{self, Write};

use convca_core::math::luminance;
use convca_core::prelude::*;

use crate::config::GfxConfig;

/// Draws every cell of the automaton, one line per row of cells, followed by
/// a status line.
pub fn draw_frame<R: CellRules>(
    automaton: &Automaton<R>,
    gfx: &GfxConfig,
    out: &mut impl Write,
) -> io::Result<()> {
    if gfx.clear_screen {
        queue!(
            out,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0)
        )?;
    }

    let (width, height) = automaton.size();
    let mut rows = vec![vec![Color { r: 0, g: 0, b: 0 }; width]; height];
    automaton.for_cells(|x, y| rows[y][x] = automaton.color(x as isize, y as isize));

    for row in &rows {
        if gfx.true_color {
            for &Color { r, g, b } in row {
                queue!(out, SetBackgroundColor(style::Color::Rgb { r, g, b }), Print(' '))?;
            }
            queue!(out, ResetColor)?;
        } else {
            let line: String = row.iter().map(|&c| gfx.glyph(luminance(c))).collect();
            queue!(out, Print(line))?;
        }
        queue!(out, Print('\n'))?;
    }

    queue!(
        out,
        Print(format!(
            "{} | gen {} | pop {} | mass {:.2}\n",
            automaton.rules(),
            automaton.generation(),
            automaton.population(),
            automaton.mass(),
        ))
    )?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_gfx() -> GfxConfig {
        GfxConfig {
            clear_screen: false,
            ..Default::default()
        }
    }

    fn draw<R: CellRules>(automaton: &Automaton<R>, gfx: &GfxConfig) -> String {
        let mut out = vec![];
        draw_frame(automaton, gfx, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_draw_life() {
        let mut automaton = Automaton::new(Life::new(), (4, 3));
        automaton.paint(1, 0);
        automaton.paint(3, 2);
        assert_eq!(
            " @  \n    \n   @\nB3/S23 | gen 0 | pop 2 | mass 2.00\n",
            draw(&automaton, &plain_gfx()),
        );
    }

    #[test]
    fn test_draw_lenia() {
        let mut automaton = Automaton::new(Lenia::new(LeniaParams::default()).unwrap(), (3, 1));
        automaton.set(2, 0, 1.0);
        let frame = draw(&automaton, &plain_gfx());
        let glyphs: Vec<char> = frame.lines().next().unwrap().chars().collect();
        assert_eq!(3, glyphs.len());
        assert_eq!(glyphs[0], glyphs[1]);
        assert_ne!(glyphs[0], glyphs[2]);
    }

    #[test]
    fn test_draw_clears_screen() {
        let automaton = Automaton::new(Life::new(), (2, 2));
        let frame = draw(&automaton, &GfxConfig::default());
        assert!(frame.starts_with("\x1b[2J"));
        assert!(frame.ends_with("  \n  \nB3/S23 | gen 0 | pop 0 | mass 0.00\n"));
    }

    #[test]
    fn test_draw_true_color() {
        let mut automaton = Automaton::new(Life::new(), (2, 1));
        automaton.paint(1, 0);
        let gfx = GfxConfig {
            true_color: true,
            ..plain_gfx()
        };
        assert!(draw(&automaton, &gfx)
            .starts_with("\x1b[48;2;0;0;0m \x1b[48;2;255;255;255m \x1b[0m\n"));
    }
}
