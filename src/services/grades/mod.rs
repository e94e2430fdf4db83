pub mod create;
pub mod detail;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::Result;
use crate::models::PaginationQuery;
use crate::models::grades::requests::CreateGradeRequest;
use crate::storage::Storage;

pub struct GradeService {
    storage: Option<Arc<dyn Storage>>,
}

impl GradeService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Result<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn create_grade(
        &self,
        request: &HttpRequest,
        req: CreateGradeRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_grade(self, request, req).await
    }

    pub async fn get_grade(&self, request: &HttpRequest, grade_id: i64) -> ActixResult<HttpResponse> {
        detail::get_grade(self, request, grade_id).await
    }

    pub async fn list_grades(
        &self,
        request: &HttpRequest,
        query: PaginationQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_grades(self, request, query).await
    }

    pub async fn list_grades_for_student(
        &self,
        request: &HttpRequest,
        query: PaginationQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_grades_for_student(self, request, query).await
    }
}
