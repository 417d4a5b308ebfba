//! Document representation shared by every format.
//!
//! Importers (HTML, JSON) build a [`nodes::DocNode`] tree; the Markdown
//! converter reads it. Trees are plain owned values with no back-references,
//! so a conversion only ever sees an immutable snapshot.

pub mod nodes;
pub mod style;
