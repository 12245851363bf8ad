//! Drag-and-drop target for the recipe image.

use crate::image::ImageFile;

/// Events the host forwards from the drop target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragEvent {
    Enter,
    Over,
    Leave,
    Drop(Vec<ImageFile>),
    /// Click on the drop area; the host should open its file chooser.
    Click,
}

/// What the host must do after an event was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragResponse {
    /// Dropped files must never be opened by the host itself.
    pub prevent_default: bool,
    pub open_picker: bool,
    /// The first dropped file, if any. Extra files are ignored.
    pub file: Option<ImageFile>,
}

/// Highlight state of the drop target. Purely cosmetic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DropZone {
    pub active: bool,
}

impl DropZone {
    pub fn handle(&mut self, event: DragEvent) -> DragResponse {
        let mut response = DragResponse {
            prevent_default: true,
            open_picker: false,
            file: None,
        };

        match event {
            DragEvent::Enter | DragEvent::Over => self.active = true,
            DragEvent::Leave => self.active = false,
            DragEvent::Drop(files) => {
                self.active = false;
                response.file = first_file(files);
            }
            DragEvent::Click => {
                response.prevent_default = false;
                response.open_picker = true;
            }
        }

        response
    }
}

/// Only the first file of a selection or drop is used.
pub fn first_file(files: impl IntoIterator<Item = ImageFile>) -> Option<ImageFile> {
    files.into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png(name: &str) -> ImageFile {
        ImageFile::new(name, "image/png", vec![1u8, 2, 3])
    }

    #[test]
    fn test_drag_sequence_toggles_active() {
        let mut zone = DropZone::default();
        assert!(zone.handle(DragEvent::Enter).prevent_default);
        assert!(zone.active);
        zone.handle(DragEvent::Over);
        assert!(zone.active);
        assert!(zone.handle(DragEvent::Leave).prevent_default);
        assert!(!zone.active);
    }

    #[test]
    fn test_drop_takes_first_file_and_clears_active() {
        let mut zone = DropZone { active: true };
        let response = zone.handle(DragEvent::Drop(vec![png("a.png"), png("b.png")]));
        assert!(!zone.active);
        assert!(response.prevent_default);
        assert_eq!(response.file.map(|f| f.file_name), Some("a.png".to_string()));
    }

    #[test]
    fn test_empty_drop() {
        let mut zone = DropZone { active: true };
        let response = zone.handle(DragEvent::Drop(Vec::new()));
        assert!(!zone.active);
        assert!(response.file.is_none());
    }

    #[test]
    fn test_click_requests_picker() {
        let mut zone = DropZone::default();
        let response = zone.handle(DragEvent::Click);
        assert!(response.open_picker);
        assert!(!zone.active);
    }
}
