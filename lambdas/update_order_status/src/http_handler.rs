use crate::validator;
use lambda_http::{Error, Response};
use serde_json::json;
use shared::controller::ExecuteParams;
use shared::core::OrderRepository;
use shared::utils::{bad_request, success_response};

pub(crate) struct HandlerDeps<R: OrderRepository> {
    pub order_repo: R,
}

/// Writes the new status without checking that the order exists; a miss is only logged.
#[tracing::instrument(skip(deps, params), fields(order_id = tracing::field::Empty))]
pub(crate) async fn function_handler<R: OrderRepository>(
    deps: &HandlerDeps<R>,
    params: ExecuteParams,
) -> Result<Response<String>, Error> {
    let Some(order_id) = params.path_parameter("orderId") else {
        return bad_request(&"OrderId is required");
    };
    tracing::Span::current().record("order_id", order_id);

    let request = match validator::validate(params.body.as_ref()) {
        Ok(request) => request,
        Err(errors) => {
            tracing::warn!("Rejected status update: {:?}", errors);
            return bad_request(&errors);
        }
    };

    let updated = deps
        .order_repo
        .update_status(order_id, request.status)
        .await?;
    if updated.is_none() {
        tracing::warn!("No order matched, status {} not applied", request.status);
    }

    success_response(&json!({ "message": format!("Status updated for Order: {}", order_id) }))
}
