// digipin/src/commands/suggest.rs
//
// USE CASE: Offline address prediction and suggestions from the gazetteer.

use comfy_table::Table;
use comfy_table::presets::UTF8_FULL;
use digipin_core::domain::address::{AddressMatcher, AddressParts};

pub fn execute(address: AddressParts, max: usize) -> anyhow::Result<()> {
    if address.is_empty() {
        anyhow::bail!("❌ No address given.\n👉 Pass at least one of --street, --area, --district, --pincode");
    }

    let matcher = AddressMatcher::offline();

    println!(
        "🧭 Predicted address: {}",
        matcher.predict_normalized_address(&address)
    );

    let suggestions = matcher.suggestions(&address, max);
    if suggestions.is_empty() {
        println!("   No similar known address.");
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Known address", "Similarity", "DIGIPIN", "Coordinates"]);
    for suggestion in &suggestions {
        table.add_row(vec![
            suggestion.entry.display_name.to_string(),
            format!("{:.2}", suggestion.similarity),
            suggestion.entry.grid_code.clone(),
            suggestion.entry.coordinate.to_string(),
        ]);
    }
    println!("{table}");

    Ok(())
}
