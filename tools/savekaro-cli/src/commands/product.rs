//! Product detail command.

use anyhow::Result;
use savekaro_auth::Favorites;
use savekaro_browse::{load_product_detail, ProductDetail};
use savekaro_catalog::catalog::format_rupees;
use savekaro_catalog::route::Route;
use savekaro_catalog::ProductId;

use super::ProductArgs;
use crate::context::Context;
use crate::output::discount_badge;

/// Run the product command.
pub async fn run(args: ProductArgs, ctx: &Context) -> Result<()> {
    let id = product_id(&args.id);
    let api = ctx.products_api()?;

    let spinner = ctx.output.spinner(&format!("Loading product {}", id));
    let detail = load_product_detail(&api, &id).await;
    spinner.finish_and_clear();

    let mut detail = detail?;
    if args.no_related {
        detail.related.clear();
    }

    let is_favorite = match ctx.session() {
        Ok(session) => Favorites::new(ctx.auth_api()?).contains(&session, &id).await.ok(),
        Err(e) => {
            ctx.output.debug(&format!("No stored session: {:#}", e));
            None
        }
    };

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "product": detail.product,
            "related": detail.related,
            "is_favorite": is_favorite,
        }));
        return Ok(());
    }

    print_detail(&detail, is_favorite.unwrap_or(false), ctx);
    Ok(())
}

/// Accept a bare id or a `/product/<id>` path.
fn product_id(raw: &str) -> ProductId {
    match Route::parse(raw) {
        Some(Route::Product(id)) => id,
        _ => ProductId::new(raw.trim()),
    }
}

fn print_detail(detail: &ProductDetail, is_favorite: bool, ctx: &Context) {
    let product = &detail.product;
    ctx.output.header(&product.title);

    ctx.output.kv("brand", &product.brand);
    let mut price = product.display_price();
    if let Some(original) = product.original_price.filter(|_| product.is_discounted()) {
        price = format!("{}  (was {}) {}", price, format_rupees(original), discount_badge(product.discount_percent));
    }
    ctx.output.kv("price", &price);
    if let Some(savings) = product.savings() {
        ctx.output.kv("you save", &format_rupees(savings));
    }
    if let Some(category) = &product.category {
        ctx.output.kv("category", category);
    }
    let sizes = product.available_sizes();
    if !sizes.is_empty() {
        ctx.output.kv("sizes", &sizes.join(", "));
    } else if !product.variants.is_empty() {
        ctx.output.kv("sizes", "out of stock");
    }
    if let Some(url) = &product.url {
        ctx.output.kv("buy at", url);
    }
    if is_favorite {
        ctx.output.kv("favorite", "yes");
    }

    if !detail.related.is_empty() {
        ctx.output.header("You may also like");
        for (i, related) in detail.related.iter().enumerate() {
            ctx.output.product_row(i + 1, related);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id_from_path_or_bare() {
        assert_eq!(product_id("/product/65f1"), ProductId::new("65f1"));
        assert_eq!(product_id(" 65f1 "), ProductId::new("65f1"));
    }
}
