//! Shorthand constructors for common field definitions.

mod checkbox;
mod number;
mod select;
mod text;

pub use checkbox::checkbox_field;
pub use number::number_field;
pub use select::select_field;
pub use text::{email_field, tel_field, text_field, textarea_field};
