pub mod adaptors;
pub mod apply;
#[cfg(test)]
pub mod memory;
pub mod mongo;
pub mod store;
