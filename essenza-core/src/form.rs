//! Recipe form controller.
//!
//! The controller is a headless state store. The host forwards user events to
//! it and renders from the snapshots published on a `watch` channel. Each
//! mutation publishes a new snapshot; nothing is mutated behind a reader's back.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::config::DEFAULT_SUCCESS_RESET_MS;
use crate::draft::DraftRecipe;
use crate::dropzone::{first_file, DragEvent, DragResponse, DropZone};
use crate::error::{FormError, ImageError, IngredientError};
use crate::gateway::RecipeGateway;
use crate::image::ImageFile;
use crate::ingredients::{IngredientField, IngredientList};

/// Banner text after a successful submission.
pub const SUCCESS_MESSAGE: &str = "Recipe added successfully!";

/// Banner text when a failure carries no message of its own.
pub const FALLBACK_ERROR_MESSAGE: &str = "Failed to save the recipe";

/// Plain text inputs of the form. All are required.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Description,
    Duration,
    Instructions,
}

impl Field {
    pub const ALL: &'static [Field] = &[
        Field::Title,
        Field::Description,
        Field::Duration,
        Field::Instructions,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Description => "description",
            Field::Duration => "duration",
            Field::Instructions => "instructions",
        }
    }
}

/// One immutable snapshot of the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub title: String,
    pub description: String,
    pub duration: String,
    pub instructions: String,
    pub ingredients: IngredientList,
    pub image: Option<ImageFile>,
    pub drop_zone: DropZone,
    pub loading: bool,
    pub error: Option<String>,
    pub success_message: Option<String>,
    pub form_visible: bool,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            duration: String::new(),
            instructions: String::new(),
            ingredients: IngredientList::new(),
            image: None,
            drop_zone: DropZone::default(),
            loading: false,
            error: None,
            success_message: None,
            form_visible: true,
        }
    }
}

impl FormState {
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::Description => &self.description,
            Field::Duration => &self.duration,
            Field::Instructions => &self.instructions,
        }
    }

    fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Title => &mut self.title,
            Field::Description => &mut self.description,
            Field::Duration => &mut self.duration,
            Field::Instructions => &mut self.instructions,
        }
    }

    /// The submit control is disabled while a submission is in flight.
    pub fn can_submit(&self) -> bool {
        !self.loading
    }

    /// Label of the banner's show/hide toggle.
    pub fn toggle_label(&self) -> &'static str {
        if self.form_visible {
            "Hide"
        } else {
            "Show"
        }
    }

    /// Check required inputs and the duration.
    ///
    /// Duration must be a non-negative whole number of minutes.
    pub fn validate(&self) -> Result<(), FormError> {
        for field in Field::ALL {
            if self.field(*field).trim().is_empty() {
                return Err(FormError::MissingField(field.as_str()));
            }
        }

        for (index, ingredient) in self.ingredients.iter().enumerate() {
            if ingredient.name.trim().is_empty() {
                return Err(FormError::MissingIngredientField {
                    index,
                    field: IngredientField::Name.as_str(),
                });
            }
            if ingredient.quantity.trim().is_empty() {
                return Err(FormError::MissingIngredientField {
                    index,
                    field: IngredientField::Quantity.as_str(),
                });
            }
        }

        if self.duration.trim().parse::<u32>().is_err() {
            return Err(FormError::InvalidDuration(self.duration.clone()));
        }

        Ok(())
    }

    pub fn to_draft(&self) -> DraftRecipe {
        DraftRecipe {
            title: self.title.clone(),
            description: self.description.clone(),
            duration: self.duration.trim().to_string(),
            instructions: self.instructions.clone(),
            ingredients: self.ingredients.to_vec(),
            image: self.image.clone(),
        }
    }

    /// Clear every input, keeping the banners and visibility.
    fn reset_fields(&mut self) {
        self.title.clear();
        self.description.clear();
        self.duration.clear();
        self.instructions.clear();
        self.ingredients = IngredientList::new();
        self.image = None;
    }
}

/// Result of a submission that reached the gateway.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Created(serde_json::Value),
    /// The gateway failed; the message is now shown in the error banner.
    Failed(String),
}

/// The recipe form controller.
pub struct RecipeForm<G: RecipeGateway> {
    gateway: Arc<G>,
    state: Arc<watch::Sender<FormState>>,
    reset_task: Mutex<Option<JoinHandle<()>>>,
    reset_delay: Duration,
}

impl<G: RecipeGateway + 'static> RecipeForm<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        let (state, _) = watch::channel(FormState::default());
        Self {
            gateway,
            state: Arc::new(state),
            reset_task: Mutex::new(None),
            reset_delay: Duration::from_millis(DEFAULT_SUCCESS_RESET_MS),
        }
    }

    /// How long the success banner stays before the form is shown again.
    pub fn with_reset_delay(mut self, delay: Duration) -> Self {
        self.reset_delay = delay;
        self
    }

    /// Subscribe to state snapshots.
    pub fn subscribe(&self) -> watch::Receiver<FormState> {
        self.state.subscribe()
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> FormState {
        self.state.borrow().clone()
    }

    pub fn set_field(&self, field: Field, value: impl Into<String>) {
        let value = value.into();
        self.state.send_modify(|s| *s.field_mut(field) = value);
    }

    pub fn add_ingredient(&self) {
        self.state.send_modify(|s| s.ingredients = s.ingredients.add());
    }

    pub fn remove_ingredient(&self, index: usize) -> Result<(), IngredientError> {
        self.edit_ingredients(|list| list.remove(index))
    }

    pub fn update_ingredient(
        &self,
        index: usize,
        field: IngredientField,
        value: impl Into<String>,
    ) -> Result<(), IngredientError> {
        let value = value.into();
        self.edit_ingredients(|list| list.update(index, field, value))
    }

    fn edit_ingredients<F>(&self, edit: F) -> Result<(), IngredientError>
    where
        F: FnOnce(&IngredientList) -> Result<IngredientList, IngredientError>,
    {
        let mut result = Ok(());
        self.state.send_if_modified(|s| match edit(&s.ingredients) {
            Ok(list) => {
                s.ingredients = list;
                true
            }
            Err(e) => {
                result = Err(e);
                false
            }
        });
        result
    }

    /// Files chosen through the picker. Only the first one is considered.
    pub fn select_files(&self, files: Vec<ImageFile>) -> Result<(), ImageError> {
        match first_file(files) {
            Some(file) => self.set_image(file),
            None => Ok(()),
        }
    }

    /// Forward a drag/drop event from the drop target.
    pub fn drag(&self, event: DragEvent) -> Result<DragResponse, ImageError> {
        let mut response = None;
        self.state.send_modify(|s| {
            response = Some(s.drop_zone.handle(event));
        });

        let mut response = response.unwrap_or(DragResponse {
            prevent_default: true,
            open_picker: false,
            file: None,
        });

        if let Some(file) = response.file.take() {
            self.set_image(file.clone())?;
            response.file = Some(file);
        }
        Ok(response)
    }

    /// Validate and adopt an image. An invalid file leaves the previous
    /// selection in place and shows the validation message.
    fn set_image(&self, file: ImageFile) -> Result<(), ImageError> {
        match file.validate() {
            Ok(()) => {
                tracing::debug!(file = %file.file_name, size = file.size(), "image selected");
                self.state.send_modify(|s| {
                    s.image = Some(file);
                    s.error = None;
                });
                Ok(())
            }
            Err(e) => {
                tracing::debug!(file = %file.file_name, error = %e, "image rejected");
                self.state.send_modify(|s| {
                    s.error = Some(e.to_string());
                    s.success_message = None;
                });
                Err(e)
            }
        }
    }

    pub fn clear_image(&self) {
        self.state.send_modify(|s| s.image = None);
    }

    /// Manual show/hide, independent of the automatic reset.
    pub fn toggle_form(&self) {
        self.state.send_modify(|s| s.form_visible = !s.form_visible);
    }

    pub fn dismiss_error(&self) {
        self.state.send_modify(|s| s.error = None);
    }

    /// Submit the current draft.
    ///
    /// Errors are returned only when nothing was sent: a submission is
    /// already in flight, or validation failed. Gateway failures come back as
    /// `SubmitOutcome::Failed` with the fields left as entered.
    pub async fn submit(&self) -> Result<SubmitOutcome, FormError> {
        let mut started: Result<DraftRecipe, FormError> = Err(FormError::Busy);
        self.state.send_if_modified(|s| {
            if s.loading {
                return false;
            }
            // A new attempt supersedes the success banner and its pending reset.
            s.success_message = None;
            if let Err(e) = s.validate() {
                s.error = Some(e.to_string());
                started = Err(e);
                return true;
            }
            s.error = None;
            s.loading = true;
            started = Ok(s.to_draft());
            true
        });
        let draft = started?;
        let _loading = LoadingGuard {
            state: Arc::clone(&self.state),
        };

        self.cancel_reset();
        tracing::info!(
            title = %draft.title,
            ingredients = draft.ingredients.len(),
            has_image = draft.image.is_some(),
            "submitting recipe"
        );

        match self.gateway.create_recipe(&draft).await {
            Ok(data) => {
                self.state.send_modify(|s| {
                    s.reset_fields();
                    s.loading = false;
                    s.error = None;
                    s.success_message = Some(SUCCESS_MESSAGE.to_string());
                    s.form_visible = false;
                });
                self.schedule_reset();
                Ok(SubmitOutcome::Created(data))
            }
            Err(e) => {
                let mut message = e.to_string();
                if message.trim().is_empty() {
                    message = FALLBACK_ERROR_MESSAGE.to_string();
                }
                tracing::warn!(error = %message, "recipe submission failed");
                self.state.send_modify(|s| {
                    s.loading = false;
                    s.error = Some(message.clone());
                });
                Ok(SubmitOutcome::Failed(message))
            }
        }
    }

    /// Whether a success-banner reset is pending.
    pub fn reset_pending(&self) -> bool {
        match self.reset_task.lock() {
            Ok(task) => task.as_ref().is_some_and(|h| !h.is_finished()),
            Err(_) => false,
        }
    }

    fn schedule_reset(&self) {
        let state = Arc::clone(&self.state);
        let delay = self.reset_delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            state.send_modify(|s| {
                s.success_message = None;
                s.form_visible = true;
            });
        });

        if let Ok(mut task) = self.reset_task.lock() {
            if let Some(previous) = task.replace(handle) {
                previous.abort();
            }
        }
    }
}

impl<G: RecipeGateway> RecipeForm<G> {
    /// Cancel deferred work. Called automatically on drop.
    pub fn teardown(&self) {
        self.cancel_reset();
    }

    fn cancel_reset(&self) {
        if let Ok(mut task) = self.reset_task.lock() {
            if let Some(handle) = task.take() {
                handle.abort();
            }
        }
    }
}

/// Clears `loading` when a submission ends without reaching either outcome,
/// e.g. when the `submit` future is dropped mid-request.
struct LoadingGuard {
    state: Arc<watch::Sender<FormState>>,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.state.send_if_modified(|s| {
            if !s.loading {
                return false;
            }
            s.loading = false;
            true
        });
    }
}

impl<G: RecipeGateway> Drop for RecipeForm<G> {
    fn drop(&mut self) {
        self.cancel_reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingredients::Ingredient;

    fn filled() -> FormState {
        FormState {
            title: "Soup".to_string(),
            description: "Warm".to_string(),
            duration: "30".to_string(),
            instructions: "Stir".to_string(),
            ingredients: IngredientList::from_ingredients(vec![Ingredient::new("Salt", "1 tsp")]),
            ..FormState::default()
        }
    }

    #[test]
    fn test_default_state() {
        let state = FormState::default();
        assert!(state.form_visible);
        assert!(state.can_submit());
        assert_eq!(state.ingredients.len(), 1);
        assert_eq!(state.toggle_label(), "Hide");
    }

    #[test]
    fn test_validate_filled() {
        assert_eq!(filled().validate(), Ok(()));
    }

    #[test]
    fn test_validate_names_first_missing_field() {
        let mut state = filled();
        state.description = "  ".to_string();
        assert_eq!(state.validate(), Err(FormError::MissingField("description")));
    }

    #[test]
    fn test_validate_ingredient_rows() {
        let mut state = filled();
        state.ingredients = state.ingredients.add();
        assert_eq!(
            state.validate(),
            Err(FormError::MissingIngredientField {
                index: 1,
                field: "name"
            })
        );
    }

    #[test]
    fn test_validate_duration() {
        for bad in ["-5", "1.5", "soon"] {
            let mut state = filled();
            state.duration = bad.to_string();
            assert_eq!(
                state.validate(),
                Err(FormError::InvalidDuration(bad.to_string()))
            );
        }
        let mut state = filled();
        state.duration = " 0 ".to_string();
        assert_eq!(state.validate(), Ok(()));
        assert_eq!(state.to_draft().duration, "0");
    }

    #[test]
    fn test_reset_fields_keeps_banners() {
        let mut state = filled();
        state.success_message = Some("ok".to_string());
        state.reset_fields();
        assert_eq!(state.title, "");
        assert_eq!(state.ingredients, IngredientList::new());
        assert_eq!(state.success_message.as_deref(), Some("ok"));
    }
}
