use console::Style;
use once_cell::sync::Lazy;

pub static TIME: Lazy<Style> = Lazy::new(|| Style::new().color256(247).italic());
pub static NOTE_ID: Lazy<Style> = Lazy::new(|| Style::new().dim());
pub static DOMAIN: Lazy<Style> = Lazy::new(|| Style::new().bold());
pub static INFO: Lazy<Style> = Lazy::new(|| Style::new().dim());
pub static SUCCESS: Lazy<Style> = Lazy::new(|| Style::new().green());
pub static WARNING: Lazy<Style> = Lazy::new(|| Style::new().yellow());
