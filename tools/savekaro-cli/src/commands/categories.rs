//! Category menu command.

use anyhow::{Context as _, Result};
use savekaro_catalog::catalog::{CategoryMenu, Gender};

use super::CategoriesArgs;
use crate::context::Context;

/// Run the categories command.
pub async fn run(args: CategoriesArgs, ctx: &Context) -> Result<()> {
    let only: Option<Gender> = args.gender.as_deref().map(str::parse::<Gender>).transpose()?;
    let api = ctx.products_api()?;

    let spinner = ctx.output.spinner("Loading categories");
    let listing = api.menu_categories().await;
    spinner.finish_and_clear();
    let listing = listing.context("Failed to load categories")?;

    if args.raw {
        if ctx.output.is_json() {
            ctx.output.json(&listing);
            return Ok(());
        }
        for (label, items) in [
            ("men", &listing.men),
            ("women", &listing.women),
            ("kids", &listing.kids),
            ("other", &listing.other),
        ] {
            if items.is_empty() {
                continue;
            }
            ctx.output.header(label);
            for item in items {
                ctx.output.list_item(item);
            }
        }
        return Ok(());
    }

    let menu = CategoryMenu::build(&listing);
    let genders: Vec<Gender> = match only {
        Some(gender) => vec![gender],
        None => vec![Gender::Men, Gender::Women],
    };

    if ctx.output.is_json() {
        let sections: serde_json::Map<String, serde_json::Value> = genders
            .iter()
            .map(|g| (g.as_str().to_string(), serde_json::json!(menu.entries(*g))))
            .collect();
        ctx.output.json(&sections);
        return Ok(());
    }

    for gender in genders {
        ctx.output.header(gender.display_name());
        for entry in menu.entries(gender) {
            ctx.output.list_item(&format!("{:<24} {}", entry.label, console::style(&entry.path).dim()));
        }
    }
    Ok(())
}
