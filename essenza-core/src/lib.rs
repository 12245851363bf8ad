pub mod cache;
pub mod config;
pub mod draft;
pub mod dropzone;
pub mod error;
pub mod form;
pub mod gateway;
pub mod image;
pub mod ingredients;
pub mod nav;

pub use cache::{CacheStats, PageCache};
pub use config::Config;
pub use draft::DraftRecipe;
pub use dropzone::{DragEvent, DragResponse, DropZone};
pub use error::{ConfigError, FormError, GatewayError, ImageError, IngredientError};
pub use form::{Field, FormState, RecipeForm, SubmitOutcome};
pub use gateway::{HttpGateway, MockGateway, MockResponse, RecipeGateway};
pub use image::{validate_image_file, ImageFile, MAX_FILE_SIZE};
pub use ingredients::{Ingredient, IngredientField, IngredientList};
pub use nav::{is_active, nav_links, NavItem, NavLink, NAV_ITEMS};

/// Unique identifier for this build, generated at compile time.
/// Sent in the user agent of outgoing API requests.
pub const BUILD_ID: &str = env!("BUILD_ID");
