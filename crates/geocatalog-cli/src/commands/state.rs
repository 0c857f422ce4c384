use std::io::Write;

use anyhow::{Context, Result};
use clap::Subcommand;
use serde_json::json;
use tracing::info;

use geocatalog_lib::Catalog;

use super::Printer;
use crate::output::write_states;

#[derive(Subcommand, Debug)]
pub enum StateCommand {
    /// Register a state, or return the id of an existing one with that name.
    Add {
        /// State name.
        name: String,
    },
    /// List every state in creation order.
    List,
}

pub fn run<W: Write>(
    catalog: &Catalog,
    command: StateCommand,
    printer: &Printer,
    out: &mut W,
) -> Result<()> {
    match command {
        StateCommand::Add { name } => {
            let id = catalog
                .hierarchy()
                .add_state(&name)
                .with_context(|| format!("failed to add state '{name}'"))?;
            let name = name.trim();
            info!(state_id = id, "state registered");
            printer.emit(
                out,
                &json!({ "estado_id": id, "nome": name }),
                |out, p| writeln!(out, "State {}{name}{} has id {id}", p.heading, p.reset),
            )
        }
        StateCommand::List => {
            let states = catalog
                .hierarchy()
                .list_states()
                .context("failed to list states")?;
            printer.emit(
                out,
                &json!({ "count": states.len(), "states": states }),
                |out, p| write_states(out, &states, p),
            )
        }
    }
}
