use super::entities::Submission;
use crate::models::common::PaginatedResponse;

pub type SubmissionListResponse = PaginatedResponse<Submission>;
