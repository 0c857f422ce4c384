use std::io::Write;

use anyhow::{Context, Result};
use clap::Subcommand;
use serde_json::json;
use tracing::info;

use geocatalog_lib::{Catalog, StateId};

use super::Printer;
use crate::output::write_cities;

#[derive(Subcommand, Debug)]
pub enum CityCommand {
    /// Register a city under an existing state.
    Add {
        /// City name.
        name: String,
        /// Id of the state the city belongs to.
        #[arg(long = "state-id")]
        state_id: StateId,
    },
    /// List every city with its state name.
    List,
}

pub fn run<W: Write>(
    catalog: &Catalog,
    command: CityCommand,
    printer: &Printer,
    out: &mut W,
) -> Result<()> {
    match command {
        CityCommand::Add { name, state_id } => {
            let id = catalog
                .hierarchy()
                .add_city(&name, state_id)
                .with_context(|| format!("failed to add city '{name}'"))?;
            let name = name.trim();
            info!(city_id = id, state_id, "city registered");
            printer.emit(
                out,
                &json!({ "cidade_id": id, "nome": name, "estado_id": state_id }),
                |out, p| {
                    writeln!(
                        out,
                        "City {}{}{} has id {} (state {})",
                        p.heading, name, p.reset, id, state_id
                    )
                },
            )
        }
        CityCommand::List => {
            let cities = catalog
                .hierarchy()
                .list_cities()
                .context("failed to list cities")?;
            printer.emit(
                out,
                &json!({ "count": cities.len(), "cities": cities }),
                |out, p| write_cities(out, &cities, p),
            )
        }
    }
}
