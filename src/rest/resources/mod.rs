//! Concrete REST resources.

mod shop;

pub use shop::Shop;
