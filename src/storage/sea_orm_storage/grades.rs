//! 评分存储操作

use super::{SeaOrmStorage, map_insert_error};
use crate::entity::grades::{ActiveModel, Column, Entity as Grades};
use crate::errors::{AssignHubError, Result};
use crate::models::{
    PaginationInfo,
    grades::{
        entities::Grade,
        requests::{CreateGradeRequest, GradeListQuery},
        responses::GradeListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建评分
    ///
    /// `grades.assignment_id` 唯一，重复评分返回 Conflict。
    pub async fn create_grade_impl(
        &self,
        graded_by: i64,
        graded_to: i64,
        req: CreateGradeRequest,
    ) -> Result<Grade> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            assignment_id: Set(req.assignment_id),
            graded_by: Set(graded_by),
            graded_to: Set(graded_to),
            score: Set(req.score),
            graded_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            map_insert_error(e, "Assignment has already been graded", "Failed to create grade")
        })?;

        Ok(result.into_grade())
    }

    /// 通过 ID 获取评分
    pub async fn get_grade_by_id_impl(&self, id: i64) -> Result<Option<Grade>> {
        let result = Grades::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("Failed to query grade: {e}")))?;

        Ok(result.map(|m| m.into_grade()))
    }

    /// 获取作业对应的评分
    pub async fn get_grade_by_assignment_id_impl(
        &self,
        assignment_id: i64,
    ) -> Result<Option<Grade>> {
        let result = Grades::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .one(&self.db)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("Failed to query grade: {e}")))?;

        Ok(result.map(|m| m.into_grade()))
    }

    /// 分页列出评分
    pub async fn list_grades_with_pagination_impl(
        &self,
        query: GradeListQuery,
    ) -> Result<GradeListResponse> {
        let (page, size) = query.pagination.normalized();

        let mut select = Grades::find();

        if let Some(graded_to) = query.graded_to {
            select = select.filter(Column::GradedTo.eq(graded_to));
        }

        select = select
            .order_by_desc(Column::GradedAt)
            .order_by_desc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| AssignHubError::database_operation(format!("Failed to count grades: {e}")))?;

        let pages = paginator.num_pages().await.map_err(|e| {
            AssignHubError::database_operation(format!("Failed to count grade pages: {e}"))
        })?;

        let grades = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("Failed to list grades: {e}")))?;

        Ok(GradeListResponse {
            items: grades.into_iter().map(|m| m.into_grade()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }
}
