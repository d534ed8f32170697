pub mod buffer;
pub mod device;
pub mod recorder;
pub mod synthetic;
