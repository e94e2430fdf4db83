//! 权限策略
//!
//! 纯函数：给定（用户，操作，资源）判断是否允许访问，不做任何 IO。
//! 中间件在集合层面（尚未加载具体作业）调用一次，服务层加载作业后再次调用。

use actix_web::{HttpRequest, web};

use crate::config::{AppConfig, PolicyConfig};
use crate::errors::{AssignHubError, Result};
use crate::models::assignments::entities::Assignment;
use crate::models::users::entities::User;

/// 受控操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CreateAssignment,
    UpdateAssignment,
    DeleteAssignment,
    ListAssignmentsForStudent,
    CreateSubmission,
    ListSubmissionsForTeacher,
    CreateGrade,
    ListGradesForStudent,
    /// 其余读取操作，任何已登录用户均可
    Read,
}

/// 操作目标
#[derive(Debug, Clone, Copy)]
pub enum Resource<'a> {
    /// 尚未定位到具体记录
    Collection,
    /// 目标作业
    Assignment(&'a Assignment),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Policy {
    pub restrict_update_to_creator: bool,
    pub require_submission_before_grade: bool,
}

impl Policy {
    pub fn from_config(config: &PolicyConfig) -> Self {
        Self {
            restrict_update_to_creator: config.restrict_update_to_creator,
            require_submission_before_grade: config.require_submission_before_grade,
        }
    }

    /// 当前请求生效的策略：优先使用 app_data 中注册的 `Policy`，否则读取全局配置
    pub fn for_request(req: &HttpRequest) -> Self {
        req.app_data::<web::Data<Policy>>()
            .map(|policy| *policy.get_ref())
            .unwrap_or_else(|| Self::from_config(&AppConfig::get().policy))
    }

    pub fn can_perform(&self, user: &User, action: Action, resource: Resource<'_>) -> bool {
        match action {
            Action::CreateAssignment | Action::ListSubmissionsForTeacher => user.is_teacher(),
            Action::ListAssignmentsForStudent | Action::ListGradesForStudent => user.is_student(),
            Action::UpdateAssignment | Action::DeleteAssignment => {
                if !user.is_teacher() {
                    return false;
                }
                match resource {
                    Resource::Assignment(a) if self.restrict_update_to_creator => {
                        a.created_by == user.id
                    }
                    _ => true,
                }
            }
            Action::CreateSubmission => {
                user.is_student()
                    && match resource {
                        Resource::Assignment(a) => a.assigned_to == user.id,
                        Resource::Collection => true,
                    }
            }
            Action::CreateGrade => {
                user.is_teacher()
                    && match resource {
                        Resource::Assignment(a) => a.created_by == user.id,
                        Resource::Collection => true,
                    }
            }
            Action::Read => true,
        }
    }

    pub fn authorize(&self, user: &User, action: Action, resource: Resource<'_>) -> Result<()> {
        if self.can_perform(user, action, resource) {
            return Ok(());
        }

        let message = match (action, resource) {
            (Action::UpdateAssignment, Resource::Assignment(_)) if user.is_teacher() => {
                "Only the teacher who created this assignment can update it"
            }
            (Action::DeleteAssignment, Resource::Assignment(_)) if user.is_teacher() => {
                "Only the teacher who created this assignment can delete it"
            }
            (Action::CreateSubmission, Resource::Assignment(_)) if user.is_student() => {
                "This assignment is not assigned to you"
            }
            (Action::CreateGrade, Resource::Assignment(_)) if user.is_teacher() => {
                "Only the teacher who created this assignment can grade it"
            }
            (
                Action::CreateAssignment
                | Action::UpdateAssignment
                | Action::DeleteAssignment
                | Action::ListSubmissionsForTeacher
                | Action::CreateGrade,
                _,
            ) => "Only teachers can perform this action",
            _ => "Only students can perform this action",
        };

        Err(AssignHubError::authorization(message))
    }
}
