use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct IssueCodeRequest {
    #[validate(length(min = 1, max = 255))]
    pub identity: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueCodeResponse {
    pub code: String,
    /// Seconds until the code lapses
    pub expires_in: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ValidateCodeRequest {
    #[validate(length(min = 1, max = 255))]
    pub identity: String,
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateCodeResponse {
    pub valid: bool,
}
