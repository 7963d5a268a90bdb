pub mod memory;
pub mod notify;
pub mod storage;
pub mod supabase;
