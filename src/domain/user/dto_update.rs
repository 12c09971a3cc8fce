use validator::Validate;

/// Input for renaming an account.
#[derive(Debug, Clone, Validate)]
pub struct UpdateUsernameDto {
    #[validate(length(min = 1, message = "username cannot be empty"))]
    pub username: String,
}

impl UpdateUsernameDto {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}
