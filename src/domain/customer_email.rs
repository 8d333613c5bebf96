use validator::ValidateEmail;

#[derive(Debug, Clone)]
pub struct CustomerEmail(String);

impl CustomerEmail{
    pub fn parse(value: String) -> Result<CustomerEmail, String>{
        if value.validate_email(){
            Ok(CustomerEmail(value))
        } else {
            Err(format!("{} is not a valid customer email", value))
        }
    }

    pub fn inner(&self) -> String {
        self.0.clone()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for CustomerEmail{
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CustomerEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}
