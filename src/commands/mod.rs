pub mod check;
pub mod docs;
pub mod faq;

pub use check::*;
pub use docs::*;
pub use faq::*;
