//! The recipe as it leaves the form, and its multipart encoding.

use reqwest::multipart::{Form, Part};

use crate::image::ImageFile;
use crate::ingredients::Ingredient;

/// Field name of the optional image part.
pub const IMAGE_FIELD: &str = "image";

/// A recipe being submitted. Exists only for the duration of one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftRecipe {
    pub title: String,
    pub description: String,
    /// Minutes, as typed.
    pub duration: String,
    pub instructions: String,
    pub ingredients: Vec<Ingredient>,
    pub image: Option<ImageFile>,
}

impl DraftRecipe {
    /// Text parts in wire order. Ingredients are flattened into
    /// `ingredients[<i>][name]` / `ingredients[<i>][quantity]` pairs.
    pub fn text_fields(&self) -> Vec<(String, String)> {
        let mut fields = vec![
            ("title".to_string(), self.title.clone()),
            ("description".to_string(), self.description.clone()),
            ("duration".to_string(), self.duration.clone()),
            ("instructions".to_string(), self.instructions.clone()),
        ];

        for (index, ingredient) in self.ingredients.iter().enumerate() {
            fields.push((
                format!("ingredients[{}][name]", index),
                ingredient.name.clone(),
            ));
            fields.push((
                format!("ingredients[{}][quantity]", index),
                ingredient.quantity.clone(),
            ));
        }

        fields
    }

    /// Build the multipart body.
    pub fn to_form(&self) -> Result<Form, reqwest::Error> {
        let mut form = Form::new();
        for (name, value) in self.text_fields() {
            form = form.text(name, value);
        }

        if let Some(image) = &self.image {
            let part = Part::bytes(image.data.to_vec())
                .file_name(image.file_name.clone())
                .mime_str(&image.content_type)?;
            form = form.part(IMAGE_FIELD, part);
        }

        Ok(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> DraftRecipe {
        DraftRecipe {
            title: "Pasta".to_string(),
            description: "Quick".to_string(),
            duration: "20".to_string(),
            instructions: "Boil".to_string(),
            ingredients: vec![
                Ingredient::new("Salt", "1 tsp"),
                Ingredient::new("Spaghetti", "200 g"),
            ],
            image: None,
        }
    }

    #[test]
    fn test_text_fields_order_and_indexing() {
        let fields = draft().text_fields();
        let names: Vec<&str> = fields.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "title",
                "description",
                "duration",
                "instructions",
                "ingredients[0][name]",
                "ingredients[0][quantity]",
                "ingredients[1][name]",
                "ingredients[1][quantity]",
            ]
        );
        assert_eq!(fields[5].1, "1 tsp");
        assert_eq!(fields[6].1, "Spaghetti");
    }

    #[test]
    fn test_form_builds_with_image() {
        let mut draft = draft();
        draft.image = Some(ImageFile::new("p.png", "image/png", vec![1u8, 2, 3]));
        let form = draft.to_form().unwrap();
        assert!(!form.boundary().is_empty());
    }

    #[test]
    fn test_form_rejects_unparseable_mime() {
        let mut draft = draft();
        draft.image = Some(ImageFile::new("p.png", "not a mime", vec![1u8]));
        assert!(draft.to_form().is_err());
    }
}
