use anyhow::{bail, Context, Result};
use essenza_core::{
    Config, Field, HttpGateway, ImageFile, Ingredient, IngredientField, PageCache, RecipeForm,
    SubmitOutcome,
};
use std::path::PathBuf;
use std::sync::Arc;

pub struct AddRequest {
    pub server: Option<String>,
    pub title: String,
    pub description: String,
    pub duration: String,
    pub instructions: String,
    pub ingredients: Vec<Ingredient>,
    pub image: Option<PathBuf>,
}

/// Parse `NAME=QUANTITY`. The quantity is free text and may contain '='.
pub fn parse_ingredient(s: &str) -> Result<Ingredient, String> {
    match s.split_once('=') {
        Some((name, quantity)) if !name.trim().is_empty() => {
            Ok(Ingredient::new(name.trim(), quantity.trim()))
        }
        _ => Err(format!("expected NAME=QUANTITY, got '{}'", s)),
    }
}

/// Drive one submission through the form controller, the way an interactive
/// frontend would: fill fields, pick the image, submit.
pub async fn add(request: AddRequest) -> Result<()> {
    let mut config = Config::from_env().context("Invalid configuration")?;
    if let Some(server) = &request.server {
        config = config.with_api_url(server)?;
    }

    let cache = Arc::new(PageCache::new());
    let gateway = HttpGateway::new(&config, cache).context("Failed to build HTTP client")?;
    tracing::info!(endpoint = gateway.endpoint(), "using recipe API");

    let form = RecipeForm::new(Arc::new(gateway)).with_reset_delay(config.success_reset);

    form.set_field(Field::Title, request.title);
    form.set_field(Field::Description, request.description);
    form.set_field(Field::Duration, request.duration);
    form.set_field(Field::Instructions, request.instructions);

    for (index, ingredient) in request.ingredients.into_iter().enumerate() {
        if index > 0 {
            form.add_ingredient();
        }
        form.update_ingredient(index, IngredientField::Name, ingredient.name)?;
        form.update_ingredient(index, IngredientField::Quantity, ingredient.quantity)?;
    }

    if let Some(path) = &request.image {
        let file = ImageFile::from_path(path)?;
        println!("{} selected ({})", file.file_name, file.size_label());
        form.select_files(vec![file])?;
    }

    match form.submit().await? {
        SubmitOutcome::Created(data) => {
            if let Some(message) = form.snapshot().success_message {
                println!("{}", message);
            }
            println!("{}", serde_json::to_string_pretty(&data)?);
            Ok(())
        }
        SubmitOutcome::Failed(message) => bail!(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ingredient() {
        assert_eq!(
            parse_ingredient("Salt=1 tsp"),
            Ok(Ingredient::new("Salt", "1 tsp"))
        );
        assert_eq!(
            parse_ingredient(" Water = 1 cup = 240 ml "),
            Ok(Ingredient::new("Water", "1 cup = 240 ml"))
        );
    }

    #[test]
    fn test_parse_ingredient_rejects_missing_name() {
        assert!(parse_ingredient("=2").is_err());
        assert!(parse_ingredient("Salt").is_err());
    }
}
