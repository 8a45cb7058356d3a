//! Interactive layer selection
//!
//! Lists the non-empty layers of a board and reads the user's choice. Each
//! chosen layer is compiled, printed and written to the sink; the menu
//! repeats until the user quits or input ends.

use crate::sink;
use anyhow::Context;
use brdmill_camtools::MillJobGenerator;
use brdmill_core::Board;
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Prompt shown after the layer list
pub const PROMPT: &str = "Select a target mill job (or Q to quit): ";

/// Printed when the board has nothing to mill
pub const NO_LAYERS_MESSAGE: &str = "No non-empty layers detected. Check board file.";

const INVALID_CHOICE_MESSAGE: &str = "Invalid mill job, please input a job among those listed";

/// A menu answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Layer(i32),
    Quit,
}

/// Numbered list of the board's non-empty layers
pub struct LayerMenu<'a> {
    board: &'a Board,
    layers: Vec<i32>,
}

impl<'a> LayerMenu<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            layers: board.non_empty_layers(),
        }
    }

    pub fn layers(&self) -> &[i32] {
        &self.layers
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Write the numbered entries, e.g. `1. Layer 16 (Bottom)`
    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for (index, layer) in self.layers.iter().enumerate() {
            match self.board.layer_name(*layer) {
                Some(name) => writeln!(out, "{}. Layer {} ({})", index + 1, layer, name)?,
                None => writeln!(out, "{}. Layer {}", index + 1, layer)?,
            }
        }
        Ok(())
    }

    /// Interpret one line of input
    ///
    /// `None` means the answer is not a listed entry.
    pub fn parse_choice(&self, answer: &str) -> Option<MenuChoice> {
        let answer = answer.trim();
        if answer.eq_ignore_ascii_case("q") {
            return Some(MenuChoice::Quit);
        }

        let entry: usize = answer.parse().ok()?;
        let index = entry.checked_sub(1)?;
        self.layers.get(index).copied().map(MenuChoice::Layer)
    }

    /// Show the menu until a valid answer is read
    ///
    /// End of input counts as quitting.
    pub fn prompt<R: BufRead, W: Write>(&self, input: &mut R, out: &mut W) -> io::Result<MenuChoice> {
        loop {
            self.render(out)?;
            write!(out, "{PROMPT}")?;
            out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                writeln!(out)?;
                return Ok(MenuChoice::Quit);
            }

            match self.parse_choice(&line) {
                Some(choice) => return Ok(choice),
                None => writeln!(out, "\n{INVALID_CHOICE_MESSAGE}\n")?,
            }
        }
    }
}

/// Run the interactive menu loop
///
/// Returns the number of jobs written. A compilation failure ends the
/// session before anything is written for that layer.
pub fn run_session<R: BufRead, W: Write>(
    board: &Board,
    generator: &MillJobGenerator,
    output_path: &Path,
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<usize> {
    let menu = LayerMenu::new(board);
    if menu.is_empty() {
        writeln!(out, "{NO_LAYERS_MESSAGE}")?;
        return Ok(0);
    }

    let mut jobs = 0;
    while let MenuChoice::Layer(layer) = menu.prompt(input, out)? {
        let job = generator
            .generate_job(layer, board)
            .with_context(|| format!("Failed to compile layer {layer}"))?;

        writeln!(out, "{job}\n")?;
        sink::write_job(output_path, &job)
            .with_context(|| format!("Failed to write {}", output_path.display()))?;
        jobs += 1;
    }
    Ok(jobs)
}
