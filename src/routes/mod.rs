mod health_check;
mod helpers;
mod login;
mod send_emails;
mod signup;
mod test_email;
mod upload;

pub use health_check::health_check;
pub use helpers::error_chain_fmt;
pub use login::login;
pub use send_emails::send_emails;
pub use signup::signup;
pub use test_email::test_email;
pub use upload::upload;
