// src/render/mod.rs
pub mod html;
pub mod page;

pub use html::{escape_html, render_podium, render_table};
pub use page::{render_page, LinkStyle, PageModel, RaceSelection, View, STYLESHEET};
