use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::models::{
    assignments::{
        entities::Assignment,
        requests::{AssignmentListQuery, CreateAssignmentRequest, UpdateAssignmentRequest},
        responses::AssignmentListResponse,
    },
    grades::{
        entities::Grade,
        requests::{CreateGradeRequest, GradeListQuery},
        responses::GradeListResponse,
    },
    submissions::{
        entities::Submission,
        requests::{CreateSubmissionRequest, SubmissionListQuery},
        responses::SubmissionListResponse,
    },
    users::{entities::User, requests::CreateUserRequest},
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 统计用户数量
    async fn count_users(&self) -> Result<u64>;

    /// 作业管理方法
    // 创建作业
    async fn create_assignment(
        &self,
        created_by: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment>;
    // 通过ID获取作业
    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>>;
    // 更新作业标题和描述
    async fn update_assignment(
        &self,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>>;
    // 删除作业及其提交、评分，返回是否存在
    async fn delete_assignment(&self, id: i64) -> Result<bool>;
    // 列出作业
    async fn list_assignments_with_pagination(
        &self,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse>;

    /// 提交管理方法
    // 创建提交，同一作业重复提交返回 Conflict
    async fn create_submission(
        &self,
        submitted_by: i64,
        req: CreateSubmissionRequest,
    ) -> Result<Submission>;
    // 通过ID获取提交
    async fn get_submission_by_id(&self, id: i64) -> Result<Option<Submission>>;
    // 获取作业对应的提交
    async fn get_submission_by_assignment_id(
        &self,
        assignment_id: i64,
    ) -> Result<Option<Submission>>;
    // 列出提交
    async fn list_submissions_with_pagination(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse>;

    /// 评分管理方法
    // 创建评分，同一作业重复评分返回 Conflict
    async fn create_grade(
        &self,
        graded_by: i64,
        graded_to: i64,
        req: CreateGradeRequest,
    ) -> Result<Grade>;
    // 通过ID获取评分
    async fn get_grade_by_id(&self, id: i64) -> Result<Option<Grade>>;
    // 获取作业对应的评分
    async fn get_grade_by_assignment_id(&self, assignment_id: i64) -> Result<Option<Grade>>;
    // 列出评分
    async fn list_grades_with_pagination(&self, query: GradeListQuery)
    -> Result<GradeListResponse>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}

/// 基于现有连接创建存储（会执行迁移）
pub async fn create_storage_with_connection(db: DatabaseConnection) -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::from_connection(db).await?;
    Ok(Arc::new(storage))
}
