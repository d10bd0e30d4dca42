// digipin/src/commands/consent.rs
//
// USE CASE: Request consent for a user.

use super::{Context, source_label};

pub async fn execute(
    ctx: &Context,
    user: Option<String>,
    action: Option<String>,
) -> anyhow::Result<()> {
    let user = ctx.user(user);
    let action = action.unwrap_or_else(|| ctx.settings.consent_action.clone());

    let served = ctx.service.request_consent(&user, &action).await?;
    let consent = &served.value;

    println!("🔐 Consent {}", consent.status);
    println!("   ID: {}", consent.consent_id);
    println!("   User: {} ({})", consent.user_id, consent.action);
    if let Some(expires_at) = consent.expires_at {
        println!("   Expires: {}", expires_at.to_rfc3339());
    }
    println!("   Source: {}", source_label(served.source));

    Ok(())
}
