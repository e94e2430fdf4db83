//! 作业生命周期
//!
//! 作业状态由提交与评分记录是否存在推导而来，只前进不回退：
//!
//! ```text
//! Created ──submit──▶ Submitted ──grade──▶ Graded
//!    └──────────────grade──────────────────▲
//! ```
//!
//! 默认允许未提交直接评分；`require_submission` 为真时该路径被拒绝。

use serde::Serialize;

use crate::errors::{AssignHubError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentState {
    Created,
    Submitted,
    Graded,
}

impl AssignmentState {
    /// 根据提交、评分记录推导当前状态
    pub fn derive(has_submission: bool, has_grade: bool) -> Self {
        match (has_submission, has_grade) {
            (_, true) => AssignmentState::Graded,
            (true, false) => AssignmentState::Submitted,
            (false, false) => AssignmentState::Created,
        }
    }

    /// 提交：仅允许从 Created 进入
    pub fn submit(self) -> Result<Self> {
        match self {
            AssignmentState::Created => Ok(AssignmentState::Submitted),
            AssignmentState::Submitted => Err(AssignHubError::conflict(
                "Assignment has already been submitted",
            )),
            AssignmentState::Graded => Err(AssignHubError::conflict(
                "Assignment has already been graded",
            )),
        }
    }

    /// 评分：Created 或 Submitted 均可进入 Graded
    pub fn grade(self, require_submission: bool) -> Result<Self> {
        match self {
            AssignmentState::Created if require_submission => Err(AssignHubError::validation(
                "Assignment cannot be graded before it is submitted",
            )),
            AssignmentState::Created | AssignmentState::Submitted => Ok(AssignmentState::Graded),
            AssignmentState::Graded => Err(AssignHubError::conflict(
                "Assignment has already been graded",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_state() {
        assert_eq!(AssignmentState::derive(false, false), AssignmentState::Created);
        assert_eq!(AssignmentState::derive(true, false), AssignmentState::Submitted);
        assert_eq!(AssignmentState::derive(true, true), AssignmentState::Graded);
        // 未提交直接评分的作业同样视为已评分
        assert_eq!(AssignmentState::derive(false, true), AssignmentState::Graded);
    }

    #[test]
    fn test_submit_only_from_created() {
        assert_eq!(
            AssignmentState::Created.submit(),
            Ok(AssignmentState::Submitted)
        );

        let err = AssignmentState::Submitted.submit().unwrap_err();
        assert_eq!(err, AssignHubError::conflict("Assignment has already been submitted"));

        let err = AssignmentState::Graded.submit().unwrap_err();
        assert_eq!(err.code(), "E011");
    }

    #[test]
    fn test_grade_without_submission_allowed_by_default() {
        assert_eq!(
            AssignmentState::Created.grade(false),
            Ok(AssignmentState::Graded)
        );
        assert_eq!(
            AssignmentState::Submitted.grade(false),
            Ok(AssignmentState::Graded)
        );
    }

    #[test]
    fn test_grade_requires_submission_when_enabled() {
        let err = AssignmentState::Created.grade(true).unwrap_err();
        assert_eq!(err.code(), "E005");
        assert_eq!(
            AssignmentState::Submitted.grade(true),
            Ok(AssignmentState::Graded)
        );
    }

    #[test]
    fn test_no_regrade() {
        assert!(AssignmentState::Graded.grade(false).is_err());
        assert!(AssignmentState::Graded.grade(true).is_err());
    }
}
