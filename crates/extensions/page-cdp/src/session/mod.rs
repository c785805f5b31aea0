//! A CDP session attached to one tab.

mod core;
mod dom;
mod js;
mod navigation;

pub use self::core::PageSession;
