//! Fit runs of text into bounded boxes for synthetic document-image generation.
//!
//! A [`layout::TextBox`] takes a box size, some text and a font configuration
//! and produces a rendered [`MeasuredLayer`] together with the text that was
//! actually rendered. Rendering goes through the [`Shaper`] and [`Compositor`]
//! traits; [`TtfShaper`] and [`ImageCompositor`] are provided.

mod colour;
pub use colour::*;

mod compositor;
pub use compositor::*;

mod error;
pub use error::*;

mod font;
pub use font::*;

mod layer;
pub use layer::*;

/// Fitting text into boxes
pub mod layout;

mod rect;
pub use rect::*;

/// Script classification used to pick a rendering strategy
pub mod script;

mod shaper;
pub use shaper::*;

mod units;
pub use units::*;
