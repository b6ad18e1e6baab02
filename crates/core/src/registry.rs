//! Append-only lookup tables filled by the pre-parse pass.
//!
//! Lookups are linear, exact-match, and the earliest definition wins.

use crate::backend::ImageHandle;
use crate::command::{Command, ImageCommand, LabelCommand};

#[derive(Clone, Debug, Default)]
pub struct LabelRegistry {
    labels: Vec<LabelCommand>,
}

impl LabelRegistry {
    pub fn push(&mut self, label: LabelCommand) {
        self.labels.push(label);
    }

    /// Line the first label called `name` is defined on.
    pub fn line_of(&self, name: &str) -> Option<usize> {
        self.labels
            .iter()
            .find(|label| label.name() == name)
            .map(|label| label.line_number())
    }

    pub fn iter(&self) -> impl Iterator<Item = &LabelCommand> {
        self.labels.iter()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[derive(Clone, Debug, Default)]
pub struct ImageRegistry {
    images: Vec<ImageCommand>,
}

impl ImageRegistry {
    pub fn push(&mut self, image: ImageCommand) {
        self.images.push(image);
    }

    pub fn handle_of(&self, label: &str) -> Option<ImageHandle> {
        self.images
            .iter()
            .find(|image| image.label() == label)
            .map(ImageCommand::handle)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImageCommand> {
        self.images.iter()
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessGraphics;
    use crate::script::tokenize;

    fn label(line: usize, name: &str) -> LabelCommand {
        LabelCommand::parse(line, tokenize(&format!("l, {name}"))).expect("label")
    }

    #[test]
    fn first_definition_wins() {
        let mut labels = LabelRegistry::default();
        labels.push(label(3, "start"));
        labels.push(label(9, "start"));
        labels.push(label(12, "end"));
        assert_eq!(labels.line_of("start"), Some(3));
        assert_eq!(labels.line_of("end"), Some(12));
        assert_eq!(labels.line_of("START"), None);
        assert_eq!(labels.len(), 3);
    }

    #[test]
    fn image_lookup_returns_earliest_handle() {
        let mut graphics = HeadlessGraphics::default();
        let mut images = ImageRegistry::default();
        for (line, text) in ["i, bg, a.png", "i, bg, b.png"].iter().enumerate() {
            images.push(ImageCommand::parse(line, tokenize(text), &mut graphics).expect("image"));
        }
        let handle = images.handle_of("bg").expect("registered");
        assert_eq!(graphics.path_of(handle), Some("a.png"));
        assert!(images.handle_of("fg").is_none());
    }
}
