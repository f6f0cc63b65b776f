pub mod compat;
pub mod loader;
pub mod sequential;

pub use sequential::Sequential;
