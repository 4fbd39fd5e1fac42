use lambda_http::{Error, Response};
use shared::controller::ExecuteParams;
use shared::core::OrderRepository;
use shared::utils::{bad_request, success_response};

pub(crate) struct HandlerDeps<R: OrderRepository> {
    pub order_repo: R,
}

#[tracing::instrument(skip(deps, params), fields(user_id = tracing::field::Empty))]
pub(crate) async fn function_handler<R: OrderRepository>(
    deps: &HandlerDeps<R>,
    params: ExecuteParams,
) -> Result<Response<String>, Error> {
    let Some(user_id) = params.path_parameter("userId") else {
        return bad_request(&"UserId is required");
    };
    tracing::Span::current().record("user_id", user_id);

    let orders = deps.order_repo.get_by_user_id(user_id).await?;
    tracing::info!("Found {} orders", orders.len());

    success_response(&orders)
}
