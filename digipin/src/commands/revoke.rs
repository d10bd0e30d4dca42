// digipin/src/commands/revoke.rs
//
// USE CASE: Revoke a consent.

use super::Context;

pub async fn execute(ctx: &Context, consent_id: String) -> anyhow::Result<()> {
    let served = ctx.service.revoke_consent(&consent_id).await?;

    if served.value.success {
        println!("🚫 Consent {} revoked", consent_id);
        Ok(())
    } else {
        anyhow::bail!("❌ Backend refused to revoke consent {}", consent_id)
    }
}
