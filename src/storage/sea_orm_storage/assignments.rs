//! 作业存储操作

use super::SeaOrmStorage;
use crate::entity::assignments::{ActiveModel, Column, Entity as Assignments};
use crate::entity::grades::{Column as GradeColumn, Entity as Grades};
use crate::entity::submissions::{Column as SubmissionColumn, Entity as Submissions};
use crate::errors::{AssignHubError, Result};
use crate::models::{
    PaginationInfo,
    assignments::{
        entities::Assignment,
        requests::{AssignmentListQuery, CreateAssignmentRequest, UpdateAssignmentRequest},
        responses::AssignmentListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    /// 创建作业
    pub async fn create_assignment_impl(
        &self,
        created_by: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            title: Set(req.title),
            description: Set(req.description),
            created_by: Set(created_by),
            assigned_to: Set(req.assigned_to),
            created_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            AssignHubError::database_operation(format!("Failed to create assignment: {e}"))
        })?;

        Ok(result.into_assignment())
    }

    /// 通过 ID 获取作业
    pub async fn get_assignment_by_id_impl(&self, id: i64) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| {
                AssignHubError::database_operation(format!("Failed to query assignment: {e}"))
            })?;

        Ok(result.map(|m| m.into_assignment()))
    }

    /// 更新作业标题和描述
    pub async fn update_assignment_impl(
        &self,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        // 先检查作业是否存在
        let existing = self.get_assignment_by_id_impl(id).await?;
        // 不存在，或没有任何字段需要修改
        if existing.is_none() || (update.title.is_none() && update.description.is_none()) {
            return Ok(existing);
        }

        let mut model = ActiveModel {
            id: Set(id),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }

        if let Some(description) = update.description {
            model.description = Set(description);
        }

        model.update(&self.db).await.map_err(|e| {
            AssignHubError::database_operation(format!("Failed to update assignment: {e}"))
        })?;

        self.get_assignment_by_id_impl(id).await
    }

    /// 删除作业
    pub async fn delete_assignment_impl(&self, id: i64) -> Result<bool> {
        // 先删除评分与提交，不依赖数据库是否启用外键级联
        Grades::delete_many()
            .filter(GradeColumn::AssignmentId.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                AssignHubError::database_operation(format!("Failed to delete assignment grade: {e}"))
            })?;

        Submissions::delete_many()
            .filter(SubmissionColumn::AssignmentId.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                AssignHubError::database_operation(format!(
                    "Failed to delete assignment submission: {e}"
                ))
            })?;

        let result = Assignments::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| {
                AssignHubError::database_operation(format!("Failed to delete assignment: {e}"))
            })?;

        Ok(result.rows_affected > 0)
    }

    /// 分页列出作业
    pub async fn list_assignments_with_pagination_impl(
        &self,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse> {
        let (page, size) = query.pagination.normalized();

        let mut select = Assignments::find();

        // 指派学生筛选
        if let Some(assigned_to) = query.assigned_to {
            select = select.filter(Column::AssignedTo.eq(assigned_to));
        }

        // 搜索条件
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let keyword = search.trim();
            select = select.filter(
                Condition::any()
                    .add(Column::Title.contains(keyword))
                    .add(Column::Description.contains(keyword)),
            );
        }

        // 排序
        select = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator.num_items().await.map_err(|e| {
            AssignHubError::database_operation(format!("Failed to count assignments: {e}"))
        })?;

        let pages = paginator.num_pages().await.map_err(|e| {
            AssignHubError::database_operation(format!("Failed to count assignment pages: {e}"))
        })?;

        let assignments = paginator.fetch_page(page - 1).await.map_err(|e| {
            AssignHubError::database_operation(format!("Failed to list assignments: {e}"))
        })?;

        Ok(AssignmentListResponse {
            items: assignments
                .into_iter()
                .map(|m| m.into_assignment())
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
