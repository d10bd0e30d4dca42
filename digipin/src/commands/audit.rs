// digipin/src/commands/audit.rs
//
// USE CASE: Read back the local audit trail.

use std::path::PathBuf;

use comfy_table::Table;
use comfy_table::presets::UTF8_FULL;

use super::{Context, source_label};

pub async fn execute(
    ctx: &Context,
    user: Option<String>,
    limit: usize,
    export: Option<PathBuf>,
) -> anyhow::Result<()> {
    let user = ctx.user(user);

    if let Some(destination) = export {
        let count = ctx.audit_log.export(&user, &destination).await?;
        println!(
            "📄 Exported {} audit entries for '{}' to {}",
            count,
            user,
            destination.display()
        );
        return Ok(());
    }

    let entries = ctx.audit_log.entries_for_user(&user, limit).await?;
    if entries.is_empty() {
        println!(
            "📜 No audit entries for '{}' in {}",
            user,
            ctx.audit_log.path().display()
        );
        return Ok(());
    }

    println!("📜 Audit trail for '{}' (newest first)", user);
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["When", "Action", "DIGIPIN", "Reference", "Source"]);
    for entry in &entries {
        table.add_row(vec![
            entry.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            entry.action.as_str().to_string(),
            entry.digipin.clone().unwrap_or_default(),
            entry.request_id.clone().unwrap_or_default(),
            source_label(entry.source).to_string(),
        ]);
    }
    println!("{table}");

    Ok(())
}
