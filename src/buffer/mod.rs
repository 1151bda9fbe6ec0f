pub mod handle;

pub use handle::Buffer;
