//! Static text.

use crate::core::block::Block;
use crate::core::color::ColorSet;
use crate::core::generator::{BlockGenerator, GenerationError, Identity};

/// Shows a fixed string.
#[derive(Debug, Clone)]
pub struct PlainText {
    text: String,
}

impl PlainText {
    /// Block name.
    pub const NAME: &'static str = "plaintext";

    /// Creates a generator showing `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl BlockGenerator for PlainText {
    fn identity(&self) -> Identity {
        Identity::new(Self::NAME, "")
    }

    fn generate(&self, _: &ColorSet) -> Result<Option<Block>, GenerationError> {
        Ok(Some(Block::new(Self::NAME, self.text.clone())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shows_its_text_every_tick() {
        let text = PlainText::new("hello");
        assert_eq!(text.cadence(), None);
        let block = text.generate(&ColorSet::default()).unwrap().unwrap();
        assert_eq!(block, Block::new("plaintext", "hello"));
    }
}
