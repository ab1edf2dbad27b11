mod product;

pub use product::{CreateProduct, NewProduct, Product};
