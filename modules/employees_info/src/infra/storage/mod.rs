pub mod mapper;
pub mod memory_repo;
pub mod record;
