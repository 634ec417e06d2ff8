mod recipient;

pub use recipient::Recipient;
