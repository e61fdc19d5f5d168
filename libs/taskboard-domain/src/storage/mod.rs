//! Persistence port and the in-memory adapter

mod memory;
mod ports;

pub use memory::InMemoryTaskRepository;
pub use ports::TaskRepository;
