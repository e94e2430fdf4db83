use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grade {
    pub id: i64,
    // 对应作业，一对一
    pub assignment_id: i64,
    // 评分教师（作业创建者）
    pub graded_by: i64,
    // 被评分学生（作业指派对象）
    pub graded_to: i64,
    pub score: i32,
    pub graded_at: chrono::DateTime<chrono::Utc>,
}
