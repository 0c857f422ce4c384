//! Output formatting for catalog listings and search results.
//!
//! Text output is a compact listing for people; JSON output mirrors the HTTP
//! API bodies so scripts can switch between the two.

use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use geocatalog_lib::{CityListing, CityPlaces, Coordinates, NearbySearch, Place, State};

use crate::terminal::ColorPalette;

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Pretty-printed JSON followed by a newline.
pub fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}

fn format_coordinates(coordinates: Option<Coordinates>) -> String {
    match coordinates {
        Some(c) => format!("({:.6}, {:.6})", c.latitude, c.longitude),
        None => "(no coordinates)".to_string(),
    }
}

pub fn write_states<W: Write>(
    out: &mut W,
    states: &[State],
    palette: &ColorPalette,
) -> io::Result<()> {
    writeln!(out, "{}States{} ({})", palette.heading, palette.reset, states.len())?;
    for state in states {
        writeln!(
            out,
            "  {}{:>4}{}  {}",
            palette.muted, state.id, palette.reset, state.name
        )?;
    }
    Ok(())
}

pub fn write_cities<W: Write>(
    out: &mut W,
    cities: &[CityListing],
    palette: &ColorPalette,
) -> io::Result<()> {
    writeln!(out, "{}Cities{} ({})", palette.heading, palette.reset, cities.len())?;
    for city in cities {
        writeln!(
            out,
            "  {}{:>4}{}  {} - {}",
            palette.muted,
            city.id,
            palette.reset,
            city.name,
            city.state_name.as_deref().unwrap_or("?")
        )?;
    }
    Ok(())
}

fn write_place_line<W: Write>(
    out: &mut W,
    place: &Place,
    palette: &ColorPalette,
) -> io::Result<()> {
    writeln!(
        out,
        "  {}  {}  {}{}{}  {}{}{}",
        place.name,
        place.city,
        palette.coordinate,
        format_coordinates(place.coordinates()),
        palette.reset,
        palette.muted,
        place.id.as_deref().unwrap_or("-"),
        palette.reset
    )?;
    if let Some(description) = place.description.as_deref().filter(|d| !d.is_empty()) {
        writeln!(out, "      {}{}{}", palette.muted, description, palette.reset)?;
    }
    Ok(())
}

pub fn write_places<W: Write>(
    out: &mut W,
    places: &[Place],
    palette: &ColorPalette,
) -> io::Result<()> {
    writeln!(out, "{}Places{} ({})", palette.heading, palette.reset, places.len())?;
    for place in places {
        write_place_line(out, place, palette)?;
    }
    Ok(())
}

pub fn write_city_places<W: Write>(
    out: &mut W,
    city: &CityPlaces,
    palette: &ColorPalette,
) -> io::Result<()> {
    let state = city
        .state_id
        .map(|id| format!("state {id}"))
        .unwrap_or_else(|| "no state".to_string());
    writeln!(
        out,
        "{}{}{} ({}): {} place(s)",
        palette.heading,
        city.city,
        palette.reset,
        state,
        city.places.len()
    )?;
    for place in &city.places {
        write_place_line(out, place, palette)?;
    }
    Ok(())
}

pub fn write_nearby<W: Write>(
    out: &mut W,
    search: &NearbySearch,
    palette: &ColorPalette,
) -> io::Result<()> {
    writeln!(
        out,
        "{}Within {:.3} km of {}{}: {} of {} place(s)",
        palette.heading,
        search.query.radius_km,
        format_coordinates(Some(search.query.origin)),
        palette.reset,
        search.results.len(),
        search.candidates_scanned
    )?;
    for result in &search.results {
        writeln!(
            out,
            "  {}{:>10.3} km{}  {}  {}{}{}",
            palette.distance,
            result.distance_km,
            palette.reset,
            result.place.name,
            palette.muted,
            result.place.city,
            palette.reset
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use geocatalog_lib::{NearbyQuery, ProximityResult};

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn states_text_listing() {
        let states = vec![
            State {
                id: 1,
                name: "Paraíba".to_string(),
            },
            State {
                id: 2,
                name: "Pernambuco".to_string(),
            },
        ];
        let text = render(|out| write_states(out, &states, &ColorPalette::plain()));
        assert_eq!(text, "States (2)\n     1  Paraíba\n     2  Pernambuco\n");
    }

    #[test]
    fn places_text_includes_coordinates_and_description() {
        let places = vec![Place::new(
            "Farol",
            "João Pessoa",
            Some(Coordinates::new(-7.148, -34.797)),
        )
        .with_description("Ponta oriental")];
        let text = render(|out| write_places(out, &places, &ColorPalette::plain()));
        assert!(text.contains("Farol  João Pessoa  (-7.148000, -34.797000)"));
        assert!(text.contains("Ponta oriental"));
    }

    #[test]
    fn nearby_text_lists_distances() {
        let search = NearbySearch {
            query: NearbyQuery::new(Coordinates::new(0.0, 0.0), 10.0),
            candidates_scanned: 4,
            results: vec![ProximityResult {
                place: Place::new("P2", "x", Some(Coordinates::new(0.0, 0.045))),
                distance_km: 5.004,
            }],
        };
        let text = render(|out| write_nearby(out, &search, &ColorPalette::plain()));
        assert!(text.starts_with("Within 10.000 km of (0.000000, 0.000000): 1 of 4 place(s)"));
        assert!(text.contains("5.004 km  P2  x"));
    }

    #[test]
    fn json_is_pretty_with_trailing_newline() {
        let text = render(|out| write_json(out, &serde_json::json!({"count": 0})));
        assert_eq!(text, "{\n  \"count\": 0\n}\n");
    }
}
