pub mod rpc;
pub mod types;
pub mod utils;
