pub mod header;
pub mod status;

pub use header::{render_header, render_link};
pub use status::{render_checking, render_notice};
