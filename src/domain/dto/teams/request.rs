use serde::{Deserialize, Serialize};
use validator::Validate;

/// `POST /api/v1/teams`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTeamRequest {
    #[validate(length(min = 1, max = 50, message = "팀 이름은 1-50자 사이여야 합니다"))]
    pub name: String,
}
