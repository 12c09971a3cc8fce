use validator::Validate;

/// Input for creating an account. `password` is plaintext.
#[derive(Debug, Clone, Validate)]
pub struct RegisterUserDto {
    #[validate(length(min = 1, message = "username cannot be empty"))]
    pub username: String,
    #[validate(length(min = 1, message = "password cannot be empty"))]
    pub password: String,
}

impl RegisterUserDto {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}
