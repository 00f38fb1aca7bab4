pub mod code_store;

pub use code_store::{CodeCheck, CodeStoreBackend, InMemoryCodeStore};
