mod helpers;
mod login;
mod send_emails;
