//! Product creation command.

use std::path::Path;
use std::sync::Arc;

use rust_decimal::Decimal;

use vitrina_client::{ImageAttachment, ItemListController, ProductCreationFlow, ProductDraft};
use vitrina_core::Category;

use super::{CommandError, bootstrap};

/// Create a product: allocate a SKU for the category, submit the draft,
/// and report the reloaded list size.
pub async fn run(
    name: &str,
    category: &str,
    subcategory: &str,
    price: Decimal,
    cost: Decimal,
    stock: Option<i64>,
    image: Option<&Path>,
) -> Result<(), CommandError> {
    let (config, api, user_id) = bootstrap()?;

    let category: Category = category.parse()?;
    let image = image.map(load_image).transpose()?;

    let list = Arc::new(ItemListController::new(
        api.clone(),
        user_id.clone(),
        config.page_size,
    ));
    list.activate().await?;

    let flow = ProductCreationFlow::new(api, user_id, Arc::clone(&list));

    let sku = flow.select_category(category).await?;
    println!("Allocated SKU {sku}");

    let draft = ProductDraft {
        name: name.to_string(),
        category,
        subcategory: subcategory.to_string(),
        price,
        cost,
        stock_count: stock,
        sku,
    };

    let created = flow.submit(&draft, image).await?;
    println!(
        "Created {} ({}) at {}",
        created.name,
        created.sku.as_deref().unwrap_or("-"),
        vitrina_core::format_minor(created.price),
    );
    println!(
        "List reloaded from the first page: {} item(s) accumulated.",
        list.snapshot().rows.len()
    );
    Ok(())
}

fn load_image(path: &Path) -> Result<ImageAttachment, CommandError> {
    let bytes = std::fs::read(path).map_err(|source| CommandError::Image {
        path: path.display().to_string(),
        source,
    })?;

    let filename = path
        .file_name()
        .map_or_else(|| "image".to_string(), |n| n.to_string_lossy().into_owned());

    let content_type = match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    };

    Ok(ImageAttachment {
        filename,
        content_type: content_type.to_string(),
        bytes,
    })
}
