mod errors;
mod storage;
mod types;
mod upload_handler;

pub use upload_handler::upload;
