mod schema;
mod store;

pub use store::{Session, Store};
