mod errors;
mod send_emails_handler;
mod types;

pub use send_emails_handler::send_emails;
