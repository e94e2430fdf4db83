use crate::models::common::PaginationQuery;
use serde::Deserialize;

// 评分创建请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGradeRequest {
    #[serde(alias = "assignment")]
    pub assignment_id: i64,
    pub score: i32,
    // 可选，必须与作业的指派学生一致
    #[serde(default)]
    pub graded_to: Option<i64>,
}

// 评分列表查询条件（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct GradeListQuery {
    pub pagination: PaginationQuery,
    pub graded_to: Option<i64>,
}
