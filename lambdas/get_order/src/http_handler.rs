use lambda_http::{Error, Response};
use shared::controller::ExecuteParams;
use shared::core::OrderRepository;
use shared::utils::{bad_request, not_found_response, success_response};

pub(crate) struct HandlerDeps<R: OrderRepository> {
    pub order_repo: R,
}

#[tracing::instrument(skip(deps, params), fields(order_id = tracing::field::Empty))]
pub(crate) async fn function_handler<R: OrderRepository>(
    deps: &HandlerDeps<R>,
    params: ExecuteParams,
) -> Result<Response<String>, Error> {
    let Some(order_id) = params.path_parameter("orderId") else {
        return bad_request(&"OrderId is required");
    };
    tracing::Span::current().record("order_id", order_id);

    match deps.order_repo.get_by_id(order_id).await? {
        Some(order) => success_response(&order),
        None => not_found_response(None),
    }
}
