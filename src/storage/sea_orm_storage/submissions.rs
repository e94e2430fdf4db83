//! 提交存储操作

use super::{SeaOrmStorage, map_insert_error};
use crate::entity::assignments::Column as AssignmentColumn;
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions};
use crate::errors::{AssignHubError, Result};
use crate::models::{
    PaginationInfo,
    submissions::{
        entities::Submission,
        requests::{CreateSubmissionRequest, SubmissionListQuery},
        responses::SubmissionListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, JoinType, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Set,
};

impl SeaOrmStorage {
    /// 创建提交
    ///
    /// `submissions.assignment_id` 上的唯一索引保证每个作业至多一份提交，
    /// 并发重复提交时后到者得到 Conflict。
    pub async fn create_submission_impl(
        &self,
        submitted_by: i64,
        req: CreateSubmissionRequest,
    ) -> Result<Submission> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            assignment_id: Set(req.assignment_id),
            submitted_by: Set(submitted_by),
            solution_text: Set(req.solution_text),
            submitted_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            map_insert_error(
                e,
                "Assignment has already been submitted",
                "Failed to create submission",
            )
        })?;

        Ok(result.into_submission())
    }

    /// 通过 ID 获取提交
    pub async fn get_submission_by_id_impl(&self, id: i64) -> Result<Option<Submission>> {
        let result = Submissions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| {
                AssignHubError::database_operation(format!("Failed to query submission: {e}"))
            })?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 获取作业对应的提交
    pub async fn get_submission_by_assignment_id_impl(
        &self,
        assignment_id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .one(&self.db)
            .await
            .map_err(|e| {
                AssignHubError::database_operation(format!("Failed to query submission: {e}"))
            })?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 分页列出提交
    pub async fn list_submissions_with_pagination_impl(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse> {
        let (page, size) = query.pagination.normalized();

        let mut select = Submissions::find();

        // 按作业创建者筛选，需要 join assignments 表
        if let Some(teacher_id) = query.teacher_id {
            select = select
                .join(
                    JoinType::InnerJoin,
                    crate::entity::submissions::Relation::Assignment.def(),
                )
                .filter(AssignmentColumn::CreatedBy.eq(teacher_id));
        }

        select = select
            .order_by_desc(Column::SubmittedAt)
            .order_by_desc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator.num_items().await.map_err(|e| {
            AssignHubError::database_operation(format!("Failed to count submissions: {e}"))
        })?;

        let pages = paginator.num_pages().await.map_err(|e| {
            AssignHubError::database_operation(format!("Failed to count submission pages: {e}"))
        })?;

        let submissions = paginator.fetch_page(page - 1).await.map_err(|e| {
            AssignHubError::database_operation(format!("Failed to list submissions: {e}"))
        })?;

        Ok(SubmissionListResponse {
            items: submissions
                .into_iter()
                .map(|m| m.into_submission())
                .collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }
}
