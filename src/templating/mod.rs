//! Templates for generating conformant boilerplate

mod skeleton;

pub use skeleton::skeleton;
