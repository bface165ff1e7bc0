//! Inventory listing command.

use vitrina_client::{ItemFilter, ItemListController, SessionProvider};
use vitrina_core::ItemRow;

use super::{CommandError, bootstrap};

/// List items, optionally draining every page, then filter and print.
pub async fn list(all: bool, filter: &ItemFilter) -> Result<(), CommandError> {
    let (config, api, user_id) = bootstrap()?;

    let provider = SessionProvider::new(api.clone());
    provider.identity_changed(Some(user_id.clone())).await;
    if !provider.current().credentials_configured {
        println!("No credentials configured. Run `vitrina credentials set` first.");
        return Ok(());
    }

    let list = ItemListController::new(api, user_id, config.page_size);
    list.activate().await?;

    if all {
        while list.snapshot().has_more {
            list.notify_near_end().await?;
        }
    }

    let snapshot = list.snapshot();
    let rows = filter.apply(&snapshot.rows);
    print_table(&rows);

    if snapshot.has_more {
        println!();
        println!("More items available; rerun with --all to fetch everything.");
    }
    Ok(())
}

fn print_table(rows: &[ItemRow]) {
    println!(
        "{:<30} {:<12} {:<22} {:>10} {:>6} {:>10} {:<10}",
        "Name", "SKU", "Category", "Price", "Stock", "Cost", "Modified"
    );
    for row in rows {
        println!(
            "{:<30} {:<12} {:<22} {:>10} {:>6} {:>10} {:<10}",
            truncate(&row.name, 30),
            row.sku.as_deref().unwrap_or("-"),
            truncate(&row.category_label, 22),
            row.display_price(),
            row.stock_count,
            row.display_cost(),
            row.modified_time.format("%Y-%m-%d"),
        );
    }
    println!();
    println!("{} item(s)", rows.len());
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{head}…")
    }
}
