// digipin/src/commands/status.rs
//
// USE CASE: Look up a validation request.

use digipin_core::domain::validation::ValidationState;

use super::{Context, source_label};

pub async fn execute(ctx: &Context, request_id: String) -> anyhow::Result<()> {
    let served = ctx.service.validation_status(&request_id).await?;
    let status = &served.value;

    let icon = match status.status {
        ValidationState::Completed => "✅",
        ValidationState::Pending => "⏳",
        ValidationState::Failed => "❌",
    };
    println!("{} {}: {:?}", icon, status.request_id, status.status);

    if let Some(result) = &status.result {
        println!(
            "   Valid: {} (confidence {:.0}%)",
            result.is_valid,
            result.confidence_score * 100.0
        );
    }
    if let Some(error) = &status.error {
        println!("   {}", error);
    }
    println!("   Source: {}", source_label(served.source));
    if let Some(backend) = &ctx.backend {
        let reachability = if backend.is_reachable() {
            "reachable"
        } else {
            "unreachable"
        };
        println!("   Backend: {reachability}");
    }

    Ok(())
}
