mod config;
mod error;
mod request_id;
mod types;
