use html::{Boundary, Document};

/// A collaborator that edits the document on the selection's behalf:
/// typing, deletion, formatting. It returns the boundaries the selection
/// should take afterwards.
pub trait EditingOperations {
    type Error: std::error::Error;

    /// The document as it stands after the last [`Self::apply`].
    fn document(&self) -> &Document;

    fn apply(
        &mut self,
        start: Boundary,
        end: Boundary,
    ) -> Result<(Boundary, Boundary), Self::Error>;
}
