use crate::errors::ChatavelError;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid email address '{email}'")]
    InvalidEmail { email: String },

    #[error("Password must be at least {min} characters")]
    WeakPassword { min: usize },

    #[error("An account already exists for '{email}'")]
    EmailAlreadyInUse { email: String },

    #[error("Incorrect email or password")]
    InvalidCredentials,

    #[error("User '{uid}' not found")]
    UserNotFound { uid: String },

    #[error("Not signed in")]
    NotSignedIn,

    #[error("Authentication backend error: {message}")]
    Backend { message: String },
}

impl ChatavelError for AuthError {
    fn error_code(&self) -> &'static str {
        match self {
            AuthError::InvalidEmail { .. } => "AUTH_INVALID_EMAIL",
            AuthError::WeakPassword { .. } => "AUTH_WEAK_PASSWORD",
            AuthError::EmailAlreadyInUse { .. } => "AUTH_EMAIL_ALREADY_IN_USE",
            AuthError::InvalidCredentials => "AUTH_INVALID_CREDENTIALS",
            AuthError::UserNotFound { .. } => "AUTH_USER_NOT_FOUND",
            AuthError::NotSignedIn => "AUTH_NOT_SIGNED_IN",
            AuthError::Backend { .. } => "AUTH_BACKEND_ERROR",
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            AuthError::InvalidEmail { .. }
            | AuthError::WeakPassword { .. }
            | AuthError::EmailAlreadyInUse { .. }
            | AuthError::InvalidCredentials
            | AuthError::NotSignedIn => true,

            AuthError::UserNotFound { .. } | AuthError::Backend { .. } => false,
        }
    }
}
