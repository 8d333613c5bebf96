use phonenumber::country;

#[derive(Debug, Clone)]
pub struct CustomerPhone(String);

impl CustomerPhone{
    pub fn parse(number: String) -> Result<CustomerPhone, String>{
        if phonenumber::parse(Some(country::ES), number.clone()).is_ok(){
            Ok(CustomerPhone(number))
        } else {
            Err(format!("{} is not a valid phone number", number))
        }
    }

    pub fn inner(&self) -> String {
        self.0.clone()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for CustomerPhone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}
