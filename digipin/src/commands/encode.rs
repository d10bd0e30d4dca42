// digipin/src/commands/encode.rs
//
// USE CASE: Generate the DIGIPIN of a coordinate.

use digipin_core::domain::geo::Coordinate;

use super::{Context, source_label};

pub async fn execute(ctx: &Context, lat: f64, lon: f64, user: Option<String>) -> anyhow::Result<()> {
    let user = ctx.user(user);
    let served = ctx
        .service
        .generate_grid_code(&user, Coordinate::new(lat, lon))
        .await?;
    let response = &served.value;
    let bounds = &response.grid_boundaries;

    println!("📍 DIGIPIN: {}", response.digipin);
    println!(
        "   Coordinates: {}",
        Coordinate::new(response.latitude, response.longitude)
    );
    println!(
        "   Cell: lat {:.6} → {:.6}, lon {:.6} → {:.6}",
        bounds.lat_min, bounds.lat_max, bounds.lon_min, bounds.lon_max
    );
    println!("   Precision: ~{} m", response.precision_meters);
    println!("   Source: {}", source_label(served.source));

    Ok(())
}
