//! 商品目录

pub mod fixture;
pub mod handler;
pub mod model;
pub mod service;
pub mod store;

pub use model::{Product, ProductFilter, ProductView};
pub use service::CatalogService;
pub use store::{CatalogCache, ProductStore};
