//! HTML pages rendered with maud.

pub mod layout;
pub mod pages;

pub use layout::page_layout;
pub use pages::{home_page, inventory_page, not_found_page, search_page};
