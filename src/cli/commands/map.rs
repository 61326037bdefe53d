use super::{open_db, open_session};
use crate::cli::parser::{Commands, LocationFilterArgs, MapAction};
use crate::config::Config;
use crate::core::filter::LocationFilter;
use crate::core::map;
use crate::errors::AppResult;
use crate::models::{LocationForm, LocationPatch};
use crate::session::{View, authorize};
use crate::ui::messages::{info, success};
use crate::utils::colors::colorize_optional;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Map { action } = cmd else {
        return Ok(());
    };
    let session = open_session(cfg);

    match action {
        MapAction::List(args) => {
            authorize(View::Map, &session)?;
            let store = open_db(cfg)?;
            let locations = map::list(&store, &session)?;
            print_markers(&map::markers(&locations, &to_filter(args)));
        }
        MapAction::Add {
            company,
            city,
            state,
            country,
            latitude,
            longitude,
        } => {
            authorize(View::AddLocation, &session)?;
            let form = LocationForm {
                company: company.clone(),
                city: city.clone(),
                state: state.clone(),
                country: country.clone(),
                latitude: latitude.clone(),
                longitude: longitude.clone(),
            };
            let store = open_db(cfg)?;
            let added = map::add(&store, &session, &form)?;
            success(format!("Location added: {} ({})", added.company, added.city));
            let locations = map::list(&store, &session)?;
            print_markers(&map::markers(&locations, &LocationFilter::default()));
        }
        MapAction::Edit {
            id,
            company,
            city,
            state,
            country,
            latitude,
            longitude,
        } => {
            authorize(View::Map, &session)?;
            let patch = LocationPatch {
                company: company.clone(),
                city: city.clone(),
                state: state.clone(),
                country: country.clone(),
                latitude: latitude.clone(),
                longitude: longitude.clone(),
            };
            let store = open_db(cfg)?;
            let saved = map::edit(&store, &session, *id, &patch)?;
            success(format!("Location {} updated ({})", saved.id, saved.company));
        }
    }
    Ok(())
}

fn to_filter(args: &LocationFilterArgs) -> LocationFilter {
    LocationFilter {
        company: args.company.clone(),
        city: args.city.clone(),
        state: args.state.clone(),
        country: args.country.clone(),
    }
}

fn print_markers(markers: &[map::Marker<'_>]) {
    if markers.is_empty() {
        info("No locations found");
        return;
    }

    let mut t = Table::new(vec![
        Column::right("ID"),
        Column::left("Company"),
        Column::left("City"),
        Column::left("State"),
        Column::left("Country"),
        Column::right("Lat"),
        Column::right("Lon"),
    ]);
    for m in markers {
        let (lat, lon) = match m.position {
            Some((lat, lon)) => (format!("{lat:.4}"), format!("{lon:.4}")),
            None => (colorize_optional("-"), colorize_optional("-")),
        };
        let l = m.location;
        t.add_row(vec![
            l.id.to_string(),
            l.company.clone(),
            l.city.clone(),
            l.state.clone(),
            l.country.clone(),
            lat,
            lon,
        ]);
    }
    print!("{}", t.render());
    info(format!("{} marker(s)", markers.len()));
}
