#[derive(Debug, Clone)]
pub struct CustomerName(String);

impl CustomerName{
    pub fn parse(value: String) -> Result<CustomerName, String>{
        let trimmed = value.trim();

        if trimmed.chars().count() < 2 {
            return Err("Name must be at least 2 characters".to_string())
        }

        if trimmed.chars().count() > 256 {
            return Err("Name must be at most 256 characters".to_string())
        }

        let forbidden_characters = ['/', '(', ')', '"', '<', '>', '\\', '{', '}'];
        if trimmed.chars().any(|c| forbidden_characters.contains(&c)){
            return Err(format!("{} contains a forbidden character", trimmed))
        }

        Ok(CustomerName(trimmed.to_string()))
    }

    pub fn inner(&self) -> String {
        self.0.clone()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for CustomerName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}
