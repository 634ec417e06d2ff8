/// A candidate delivery address. The only admission rule is the presence of
/// an `@` somewhere in the string; anything stricter is left to the relay.
#[derive(Debug, Clone)]
pub struct Recipient(String);

impl Recipient {
    pub fn parse(s: String) -> Result<Self, String> {
        if !s.contains('@') {
            return Err(format!("{} is not a deliverable address.", s));
        };
        Ok(Self(s))
    }
}

impl AsRef<str> for Recipient {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Recipient {
    type Error = String;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        Recipient::parse(value)
    }
}
