use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    // 唯一 ID
    pub id: i64,
    // 作业标题
    pub title: String,
    // 作业描述
    pub description: String,
    // 创建者（教师）ID
    pub created_by: i64,
    // 指派的学生 ID，创建后不可修改
    pub assigned_to: i64,
    // 作业创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
}
