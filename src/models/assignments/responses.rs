use super::entities::Assignment;
use super::lifecycle::AssignmentState;
use crate::models::common::PaginatedResponse;
use serde::Serialize;

// 作业详情，附带生命周期状态
#[derive(Debug, Serialize)]
pub struct AssignmentDetail {
    #[serde(flatten)]
    pub assignment: Assignment,
    pub state: AssignmentState,
}

pub type AssignmentListResponse = PaginatedResponse<Assignment>;
