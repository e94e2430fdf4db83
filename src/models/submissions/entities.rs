use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub id: i64,
    // 对应作业，一对一
    pub assignment_id: i64,
    // 提交者（被指派的学生）
    pub submitted_by: i64,
    pub solution_text: String,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}
