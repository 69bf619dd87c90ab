//! Projection of the note list into host-renderable cards.

pub mod html;
pub mod projector;
