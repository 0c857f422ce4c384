use std::io::Write;

use anyhow::{Context, Result};
use clap::Subcommand;
use serde_json::json;
use tracing::info;

use geocatalog_lib::{Catalog, CityId, Coordinates, NewPlace};

use super::Printer;
use crate::output::{write_city_places, write_places};

#[derive(Subcommand, Debug)]
pub enum PlaceCommand {
    /// Store a new place document.
    Add {
        /// Place name.
        #[arg(long)]
        name: String,
        /// Name of the city the place is filed under.
        #[arg(long)]
        city: String,
        /// Latitude in decimal degrees.
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        /// Longitude in decimal degrees.
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        /// Free-form description.
        #[arg(long)]
        description: Option<String>,
    },
    /// List stored places, optionally restricted to one city.
    List {
        /// Only places filed under this exact city name.
        #[arg(long, conflicts_with = "city_id")]
        city: Option<String>,
        /// Only places of the city with this id.
        #[arg(long = "city-id")]
        city_id: Option<CityId>,
    },
}

pub fn run<W: Write>(
    catalog: &Catalog,
    command: PlaceCommand,
    printer: &Printer,
    out: &mut W,
) -> Result<()> {
    match command {
        PlaceCommand::Add {
            name,
            city,
            lat,
            lon,
            description,
        } => {
            let place = NewPlace {
                name,
                city,
                coordinates: Coordinates::new(lat, lon),
                description,
            };
            let id = catalog.add_place(place).context("failed to add place")?;
            info!(place_id = %id, "place stored");
            printer.emit(
                out,
                &json!({ "id": id }),
                |out, _| writeln!(out, "Stored place {id}"),
            )
        }
        PlaceCommand::List {
            city_id: Some(city_id),
            ..
        } => {
            let city = catalog
                .places_in_city(city_id)
                .with_context(|| format!("failed to list places of city {city_id}"))?;
            printer.emit(out, &city, |out, p| write_city_places(out, &city, p))
        }
        PlaceCommand::List { city, city_id: None } => {
            let places = match city.as_deref().filter(|c| !c.is_empty()) {
                Some(city) => catalog.places().list_places_by_city(city),
                None => catalog.places().list_all_places(),
            }
            .context("failed to list places")?;
            printer.emit(
                out,
                &json!({ "count": places.len(), "places": places }),
                |out, p| write_places(out, &places, p),
            )
        }
    }
}
