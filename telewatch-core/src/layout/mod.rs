//! Layout builder
//!
//! Turns the current settings into a set of visual elements on the
//! surface. Exactly one element set exists at a time; it is released in
//! full before its replacement is built.

mod builder;
mod elements;

pub use builder::{build, LayoutBuilder};
pub use elements::{
    ElementKind, ElementSet, ElementSlot, HandsElement, ImageElement, Omission, SecondHandElement,
    TextElement, MAX_ELEMENTS,
};
