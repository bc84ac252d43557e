pub mod crawler;
pub mod web;


pub use crawler::{Crawler, Renderer};
pub use web::WebDriverRenderer;
