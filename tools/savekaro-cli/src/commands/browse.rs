//! Category listing command.

use anyhow::{bail, Result};
use savekaro_browse::{CatalogBrowser, ListingView, LoadState};
use savekaro_catalog::route::Route;
use savekaro_catalog::search::{FilterState, MinDiscount, PriceRange, SortKey};

use super::BrowseArgs;
use crate::context::Context;
use crate::output::state_badge;

/// Run the browse command.
pub async fn run(args: BrowseArgs, ctx: &Context) -> Result<()> {
    let url = listing_url(&args.path)?;
    let overrides = FilterOverrides::from_args(&args)?;

    let browser = CatalogBrowser::new(ctx.products_api()?, ctx.config.catalog);

    let spinner = ctx.output.spinner(&format!("Loading {}", url));
    browser.open_with(&url, |filter| overrides.apply(filter)).await;
    spinner.finish_and_clear();

    if let LoadState::Error(message) = browser.view().await.state {
        bail!("{}", message);
    }

    let mut pages = 1;
    while args.all || pages < args.pages {
        if !browser.load_more().await {
            break;
        }
        pages += 1;
    }

    let view = browser.view().await;
    ctx.output.debug(&format!("Listing {} after {} page(s)", state_badge(&view.state), view.page));

    if args.brands_only {
        print_brands(&view, ctx);
    } else {
        print_listing(&view, ctx);
    }
    Ok(())
}

/// The URL to hand to the browser for a storefront path.
fn listing_url(path: &str) -> Result<String> {
    let path = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    };

    match Route::parse(&path) {
        Some(Route::Category(_)) => Ok(path),
        Some(Route::Home) | Some(Route::Deals) => Ok("/".to_string()),
        Some(Route::Product(id)) => bail!("{} is a product page, use `savekaro product {}`", path, id),
        Some(route) if route.requires_auth() => {
            bail!("{} needs a signed-in account, use `savekaro account me`", route.path())
        }
        Some(other) => bail!("{} is not a listing page", other.path()),
        None => bail!("Unknown storefront path: {}", path),
    }
}

/// Sidebar choices given on the command line.
#[derive(Debug, Default)]
struct FilterOverrides {
    brands: Vec<String>,
    price_range: Option<PriceRange>,
    min_discount: Option<MinDiscount>,
    sort: Option<SortKey>,
}

impl FilterOverrides {
    fn from_args(args: &BrowseArgs) -> Result<Self> {
        let price_range = match (&args.min_price, &args.max_price) {
            (None, None) => None,
            (min, max) => Some(PriceRange::parse(
                min.as_deref().unwrap_or_default(),
                max.as_deref().unwrap_or_default(),
            )?),
        };

        Ok(Self {
            brands: args.brands.clone(),
            price_range,
            min_discount: args.min_discount.map(MinDiscount::new).transpose()?,
            sort: args.sort.as_deref().map(str::parse::<SortKey>).transpose()?,
        })
    }

    fn apply(&self, filter: &mut FilterState) {
        if !self.brands.is_empty() {
            filter.set_brands(self.brands.iter().cloned());
        }
        if let Some(range) = self.price_range {
            filter.set_price_range(range);
        }
        if let Some(min_discount) = self.min_discount {
            filter.set_min_discount(min_discount);
        }
        if let Some(sort) = self.sort {
            filter.set_sort(sort);
        }
    }
}

fn print_listing(view: &ListingView, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(view);
        return;
    }

    ctx.output.header(&view.title);
    if view.products.is_empty() {
        ctx.output.info("No products match these filters");
        return;
    }

    ctx.output.kv("sort", view.filter.sort.display_name());
    if view.filter.min_discount.percent() > 0 {
        ctx.output.kv("discount", &view.filter.min_discount.label());
    }
    if !view.filter.selected_brands.is_empty() {
        let brands: Vec<&str> = view.filter.selected_brands.iter().map(String::as_str).collect();
        ctx.output.kv("brands", &brands.join(", "));
    }
    println!();

    for (i, product) in view.products.iter().enumerate() {
        ctx.output.product_row(i + 1, product);
    }

    println!();
    ctx.output.info(&format!("Showing {} of {} products", view.products.len(), view.total));
    if view.has_more {
        ctx.output.info("Use --pages N or --all to see more");
    }
}

fn print_brands(view: &ListingView, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(&view.available_brands);
        return;
    }

    ctx.output.header(&format!("Brands in {}", view.title));
    for brand in &view.available_brands {
        ctx.output.list_item(brand);
    }
}
