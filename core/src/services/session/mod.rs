//! Session bridge between login, redirect codes and token refresh

mod service;


pub use service::SessionBridge;
