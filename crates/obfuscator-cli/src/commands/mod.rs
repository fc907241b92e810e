pub mod handle;
pub mod mask;
