use crate::errors::ChatavelError;

#[derive(Debug, thiserror::Error)]
pub enum GroupError {
    #[error("No member '{member}' in this group")]
    MemberNotFound { member: String },

    #[error("The owner '{member}' cannot be changed or removed")]
    OwnerLocked { member: String },

    #[error("The owner role cannot be assigned")]
    OwnerRoleNotAssignable,

    #[error("Invalid email address '{email}'")]
    InvalidEmail { email: String },

    #[error("'{email}' is already a member")]
    AlreadyMember { email: String },

    #[error("'{email}' has already been invited")]
    AlreadyInvited { email: String },

    #[error("'{email}' has no pending invitation")]
    NotInvited { email: String },

    #[error("No member removal is waiting for confirmation")]
    NoPendingRemoval,

    #[error("Group name cannot be empty")]
    EmptyGroupName,
}

impl ChatavelError for GroupError {
    fn error_code(&self) -> &'static str {
        match self {
            GroupError::MemberNotFound { .. } => "GROUP_MEMBER_NOT_FOUND",
            GroupError::OwnerLocked { .. } => "GROUP_OWNER_LOCKED",
            GroupError::OwnerRoleNotAssignable => "GROUP_OWNER_ROLE_NOT_ASSIGNABLE",
            GroupError::InvalidEmail { .. } => "GROUP_INVALID_EMAIL",
            GroupError::AlreadyMember { .. } => "GROUP_ALREADY_MEMBER",
            GroupError::AlreadyInvited { .. } => "GROUP_ALREADY_INVITED",
            GroupError::NotInvited { .. } => "GROUP_NOT_INVITED",
            GroupError::NoPendingRemoval => "GROUP_NO_PENDING_REMOVAL",
            GroupError::EmptyGroupName => "GROUP_EMPTY_NAME",
        }
    }

    fn is_user_error(&self) -> bool {
        true
    }
}
