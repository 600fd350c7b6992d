mod located;
mod store;

pub use located::Located;
pub use store::IMemoryStore;
