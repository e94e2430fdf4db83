/*!
 * 基于权限策略的访问控制中间件
 *
 * 必须在 RequireJWT 之后使用。此处只在集合层面（`Resource::Collection`）评估操作，
 * 涉及具体作业的归属检查由服务层在加载作业后完成。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::web;
 * use crate::middlewares::{RequireJWT, RequirePermission};
 * use crate::policy::Action;
 *
 * web::resource("/list-for-student")
 *     .wrap(RequirePermission::new(Action::ListAssignmentsForStudent))
 *     .route(web::get().to(list_for_student));
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::info;

use crate::{
    models::{ErrorCode, users::entities},
    policy::{Action, Policy, Resource},
};

use super::create_error_response;

#[derive(Clone)]
pub struct RequirePermission {
    action: Action,
}

impl RequirePermission {
    pub fn new(action: Action) -> Self {
        Self { action }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequirePermission
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequirePermissionMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequirePermissionMiddleware {
            service: Rc::new(service),
            action: self.action,
        }))
    }
}

pub struct RequirePermissionMiddleware<S> {
    service: Rc<S>,
    action: Action,
}

impl<S, B> Service<ServiceRequest> for RequirePermissionMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let action = self.action;

        Box::pin(async move {
            let user = req.extensions().get::<entities::User>().cloned();

            match user {
                Some(user) => {
                    let policy = Policy::for_request(req.request());
                    match policy.authorize(&user, action, Resource::Collection) {
                        Ok(()) => {
                            let res = srv.call(req).await?.map_into_left_body();
                            Ok(res)
                        }
                        Err(err) => {
                            info!(
                                "Access denied for user {} (role: {}) on {:?}",
                                user.id, user.role, action
                            );
                            Ok(req.into_response(
                                create_error_response(
                                    StatusCode::FORBIDDEN,
                                    ErrorCode::Forbidden,
                                    err.message(),
                                )
                                .map_into_right_body(),
                            ))
                        }
                    }
                }
                None => {
                    info!(
                        "Permission check failed: No user found in request. Make sure RequireJWT middleware is applied first."
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            "Authentication required",
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}
