//! Subcommand implementations.
//!
//! Each handler runs one catalog operation and renders the outcome through a
//! [`Printer`]. JSON output uses the same field names as the HTTP API.

pub mod city;
pub mod nearby;
pub mod place;
pub mod state;

use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use crate::output::{write_json, OutputFormat};
use crate::terminal::ColorPalette;

/// Output settings shared by all subcommands.
#[derive(Debug, Clone, Copy)]
pub struct Printer {
    pub format: OutputFormat,
    pub palette: ColorPalette,
}

impl Printer {
    pub fn new(format: OutputFormat, palette: ColorPalette) -> Self {
        Self { format, palette }
    }

    /// Write `json` in JSON mode, otherwise call `text` with the palette.
    pub(crate) fn emit<W, T, F>(&self, out: &mut W, json: &T, text: F) -> Result<()>
    where
        W: Write,
        T: Serialize + ?Sized,
        F: FnOnce(&mut W, &ColorPalette) -> std::io::Result<()>,
    {
        match self.format {
            OutputFormat::Json => write_json(out, json)?,
            OutputFormat::Text => text(out, &self.palette)?,
        }
        Ok(())
    }
}
