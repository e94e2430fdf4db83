use crate::models::common::PaginationQuery;
use serde::Deserialize;

// 作业创建请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAssignmentRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub assigned_to: i64,
}

// 作业更新请求（assigned_to 创建后固定，不在此处）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAssignmentRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

// 作业列表查询参数（来自HTTP请求）
#[derive(Debug, Clone, Deserialize)]
pub struct AssignmentListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
}

// 作业列表查询条件（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct AssignmentListQuery {
    pub pagination: PaginationQuery,
    pub assigned_to: Option<i64>,
    pub search: Option<String>,
}
