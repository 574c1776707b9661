//! Fitting single lines of text into boxes.
//!
//! [`TextBox`] is the entry point. It samples a width budget from its
//! [`FillRange`], accepts as much text as fits with [`accumulate`], and renders
//! the accepted text either as one shaped unit or glyph by glyph.
//!
//! # Example
//!
//! ```
//! use textbox_gen::{FontConfig, MeasuredLayer, Px, RenderError};
//! use textbox_gen::layout::{BoxSize, FillRange, TextBox};
//!
//! // a stand-in shaper: every character is 10x20 pixels
//! let shaper = |text: &str, _: &FontConfig| -> Result<MeasuredLayer, RenderError> {
//!     Ok(MeasuredLayer::blank(Px(10.0 * text.chars().count() as f32), Px(20.0)))
//! };
//!
//! let textbox = TextBox::new(FillRange::full(), shaper);
//! let mut rng = rand::thread_rng();
//! let fitted = textbox
//!     .fit(BoxSize::new(200.0, 20.0), "Hello\nWorld", &FontConfig::default(), &mut rng)
//!     .expect("text fits");
//!
//! assert_eq!(fitted.text, "Hello");
//! assert_eq!(fitted.layer.width(), Px(50.0));
//! ```

mod accumulate;
mod fill;
mod textbox;

pub use accumulate::*;
pub use fill::*;
pub use textbox::*;
