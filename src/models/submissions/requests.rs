use crate::models::common::PaginationQuery;
use serde::Deserialize;

// 提交创建请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubmissionRequest {
    #[serde(alias = "assignment")]
    pub assignment_id: i64,
    pub solution_text: String,
}

// 提交列表查询条件（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct SubmissionListQuery {
    pub pagination: PaginationQuery,
    // 按作业创建者（教师）过滤
    pub teacher_id: Option<i64>,
}
