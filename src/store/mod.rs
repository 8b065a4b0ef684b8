pub mod loader;
pub mod local_cache;
pub mod remote;
pub mod sync;
