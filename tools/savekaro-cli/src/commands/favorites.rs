//! Favorites commands.

use anyhow::{anyhow, Result};
use savekaro_auth::{local_favorites, AuthError, Favorites, Persisted};
use savekaro_catalog::ProductId;

use super::{FavoritesArgs, FavoritesCommand};
use crate::context::Context;

/// Run the favorites command.
pub async fn run(args: FavoritesArgs, ctx: &Context) -> Result<()> {
    let favorites = Favorites::new(ctx.auth_api()?);
    let session = ctx.session()?;

    match args.command.unwrap_or(FavoritesCommand::List) {
        FavoritesCommand::List => {
            if !session.is_authenticated() {
                let ids = local_favorites(session.storage())?;
                if ctx.output.is_json() {
                    ctx.output.json(&ids);
                    return Ok(());
                }
                ctx.output.header("Saved on this device");
                if ids.is_empty() {
                    ctx.output.info("No favorites yet. Sign in to save products");
                }
                for id in &ids {
                    ctx.output.list_item(id.as_str());
                }
                return Ok(());
            }

            let spinner = ctx.output.spinner("Loading favorites");
            let products = favorites.products(&session).await;
            spinner.finish_and_clear();
            let products = products.map_err(|e| anyhow!(e.user_message("Failed to load favorites")))?;

            if ctx.output.is_json() {
                ctx.output.json(&products);
                return Ok(());
            }
            ctx.output.header("My favorites");
            if products.is_empty() {
                ctx.output.info("No favorites yet");
            }
            for (i, product) in products.iter().enumerate() {
                ctx.output.product_row(i + 1, product);
            }
        }
        FavoritesCommand::Toggle { id } => {
            let id = ProductId::new(id);
            let is_favorite = favorites.contains(&session, &id).await?;
            let toggled = favorites.toggle(&session, &id, is_favorite).await.map_err(|e| match e {
                AuthError::LoginRequired => anyhow!("Please sign in to save favorites"),
                other => anyhow::Error::new(other).context("Failed to update favorites"),
            })?;

            let verb = if toggled.is_favorite { "Added" } else { "Removed" };
            ctx.output.success(&format!("{} {} {} favorites", verb, id, if toggled.is_favorite { "to" } else { "from" }));
            if toggled.persisted == Persisted::Local {
                ctx.output.warn("Backend unavailable, saved on this device only");
            }
        }
        FavoritesCommand::Remove { id } => {
            let id = ProductId::new(id);
            favorites
                .remove(&session, &id)
                .await
                .map_err(|e| anyhow!(e.user_message("Failed to remove favorite")))?;
            ctx.output.success(&format!("Removed {} from favorites", id));
        }
    }

    Ok(())
}
