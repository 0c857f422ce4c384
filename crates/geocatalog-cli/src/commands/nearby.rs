use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;

use geocatalog_lib::{Catalog, Coordinates, NearbyQuery, DEFAULT_RADIUS_KM};

use super::Printer;
use crate::output::write_nearby;

#[derive(Args, Debug)]
pub struct NearbyArgs {
    /// Origin latitude in decimal degrees.
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,
    /// Origin longitude in decimal degrees.
    #[arg(long, allow_negative_numbers = true)]
    pub lon: f64,
    /// Search radius in kilometres.
    #[arg(
        long = "radius-km",
        default_value_t = DEFAULT_RADIUS_KM,
        allow_negative_numbers = true
    )]
    pub radius_km: f64,
}

pub fn run<W: Write>(
    catalog: &Catalog,
    args: NearbyArgs,
    printer: &Printer,
    out: &mut W,
) -> Result<()> {
    let query = NearbyQuery::new(Coordinates::new(args.lat, args.lon), args.radius_km);
    let search = catalog.nearby(query).context("nearby search failed")?;

    let results = &search.results;
    printer.emit(out, results, |out, p| write_nearby(out, &search, p))
}
