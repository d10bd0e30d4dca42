// digipin/src/commands/validate.rs
//
// USE CASE: Validate an address (consent → checks → verdict).

use comfy_table::Table;
use comfy_table::presets::UTF8_FULL;
use digipin_core::domain::address::AddressParts;
use digipin_core::domain::validation::{ValidationCheck, ValidationRequest};

use super::{Context, source_label};

pub async fn execute(
    ctx: &Context,
    user: Option<String>,
    lat: f64,
    lon: f64,
    address: AddressParts,
    digipin: Option<String>,
    consent_id: Option<String>,
) -> anyhow::Result<()> {
    // Same gate as the submit button: no street, area or district, no request.
    address.ensure_submittable()?;

    let user = ctx.user(user);
    let consent_id = match consent_id {
        Some(id) => id,
        None => {
            println!("🔐 Requesting consent for '{}'...", user);
            let consent = ctx
                .service
                .request_consent(&user, &ctx.settings.consent_action)
                .await?;
            println!("   Consent: {}", consent.value.consent_id);
            consent.value.consent_id
        }
    };

    let request = ValidationRequest {
        user_id: user,
        consent_id,
        address_parts: address,
        latitude: lat,
        longitude: lon,
        digipin,
    };

    println!("✅ Validating address...");
    let served = ctx.service.validate_address(&request).await?;
    let result = &served.value;

    println!("{}", checks_table(result.checks()));
    println!("   Request: {}", result.request_id);
    if !result.digipin.is_empty() {
        println!("   DIGIPIN: {}", result.digipin);
    }
    if let Some(address) = &result.normalized_address {
        println!("   Address: {}", address);
    }
    println!("   Confidence: {:.0}%", result.confidence_score * 100.0);
    println!("   Source: {}", source_label(served.source));

    if result.is_valid {
        println!("\n✨ VALID address");
    } else {
        let failed = result.checks().iter().filter(|c| !c.passed).count();
        eprintln!("\n❌ INVALID address. {} check(s) failed.", failed);
        // Exit with error code for scripts
        std::process::exit(1);
    }

    Ok(())
}

fn checks_table(checks: &[ValidationCheck]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Check", "Result", "Confidence", "Details"]);
    for check in checks {
        table.add_row(vec![
            check.check_name.clone(),
            if check.passed { "pass" } else { "FAIL" }.to_string(),
            format!("{:.0}%", check.confidence * 100.0),
            check.details.clone().unwrap_or_default(),
        ]);
    }
    table
}
