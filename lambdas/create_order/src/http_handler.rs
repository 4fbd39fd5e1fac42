use crate::validator;
use lambda_http::{Error, Response};
use shared::controller::ExecuteParams;
use shared::core::{IdGenerator, Order, OrderRepository};
use shared::utils::{bad_request, created_response};

pub(crate) struct HandlerDeps<R: OrderRepository, I: IdGenerator> {
    pub order_repo: R,
    pub id_generator: I,
}

#[tracing::instrument(skip(deps, params))]
pub(crate) async fn function_handler<R: OrderRepository, I: IdGenerator>(
    deps: &HandlerDeps<R, I>,
    params: ExecuteParams,
) -> Result<Response<String>, Error> {
    let request = match validator::validate(params.body.as_ref()) {
        Ok(request) => request,
        Err(errors) => {
            tracing::warn!("Rejected order payload: {:?}", errors);
            return bad_request(&errors);
        }
    };

    let order = Order::new(
        deps.id_generator.generate_id(),
        request.user_id,
        request.products,
        request.status,
    );
    tracing::info!(order_id = %order.order_id, total_price = order.total_price, "Creating order");

    let created = deps.order_repo.create(order).await?;

    created_response(&created)
}

#[cfg(test)]
mod tests {
    use super::{function_handler, HandlerDeps};
    use mockall::predicate;
    use serde_json::{json, Value};
    use shared::controller::ExecuteParams;
    use shared::core::{MockIdGenerator, MockOrderRepository, Order, RepositoryError};

    fn deps_with(
        order_repo: MockOrderRepository,
    ) -> HandlerDeps<MockOrderRepository, MockIdGenerator> {
        let mut id_generator = MockIdGenerator::new();
        id_generator
            .expect_generate_id()
            .returning(|| "uuid-mock".to_string());
        HandlerDeps {
            order_repo,
            id_generator,
        }
    }

    fn body_of(response: &lambda_http::Response<String>) -> Value {
        serde_json::from_str(response.body()).unwrap()
    }

    #[tokio::test]
    async fn when_body_is_empty_object_should_return_400() {
        let deps = deps_with(MockOrderRepository::new());
        let params = ExecuteParams::default().with_body(json!({}));

        let response = function_handler(&deps, params).await.unwrap();

        assert_eq!(response.status(), 400);
    }

    #[tokio::test]
    async fn when_user_id_is_missing_should_return_400_with_field_error() {
        let mut order_repo = MockOrderRepository::new();
        order_repo.expect_create().times(0);
        let deps = deps_with(order_repo);
        let params = ExecuteParams::default().with_body(json!({
            "products": [{ "productId": "p1", "name": "Product 1", "quantity": 1, "price": 10 }],
            "status": "RECEIVED"
        }));

        let response = function_handler(&deps, params).await.unwrap();

        assert_eq!(response.status(), 400);
        let body = body_of(&response);
        assert_eq!(body["error"]["userId"], json!(["Required"]));
    }

    #[tokio::test]
    async fn when_payload_is_valid_should_store_and_return_201() {
        let mut order_repo = MockOrderRepository::new();
        order_repo
            .expect_create()
            .times(1)
            .withf(|order: &Order| {
                order.order_id == "uuid-mock" && order.user_id == "123" && order.total_price == 20.0
            })
            .returning(Ok);
        let deps = deps_with(order_repo);
        let params = ExecuteParams::default().with_body(json!({
            "userId": "123",
            "products": [{ "productId": "p1", "name": "Product 1", "quantity": 2, "price": 10 }],
            "status": "RECEIVED"
        }));

        let response = function_handler(&deps, params).await.unwrap();

        assert_eq!(response.status(), 201);
        assert_eq!(
            body_of(&response),
            json!({
                "orderId": "uuid-mock",
                "userId": "123",
                "products": [{ "productId": "p1", "name": "Product 1", "quantity": 2, "price": 10.0 }],
                "status": "RECEIVED",
                "totalPrice": 20.0
            })
        );
    }

    #[tokio::test]
    async fn when_several_products_should_sum_price_times_quantity() {
        let mut order_repo = MockOrderRepository::new();
        order_repo
            .expect_create()
            .times(1)
            .withf(|order: &Order| order.total_price == 0.1 * 3.0 + 2.25 * 4.0)
            .returning(Ok);
        let deps = deps_with(order_repo);
        let params = ExecuteParams::default().with_body(json!({
            "userId": "123",
            "products": [
                { "productId": "p1", "name": "Product 1", "quantity": 3, "price": 0.1 },
                { "productId": "p2", "name": "Product 2", "quantity": 4, "price": 2.25 }
            ],
            "status": "IN_PREPARATION"
        }));

        let response = function_handler(&deps, params).await.unwrap();

        assert_eq!(response.status(), 201);
        assert_eq!(body_of(&response)["totalPrice"], json!(0.1 * 3.0 + 2.25 * 4.0));
    }

    #[tokio::test]
    async fn when_client_sends_order_id_and_total_should_ignore_them() {
        let mut order_repo = MockOrderRepository::new();
        order_repo
            .expect_create()
            .times(1)
            .withf(|order: &Order| order.order_id == "uuid-mock" && order.total_price == 10.0)
            .returning(Ok);
        let deps = deps_with(order_repo);
        let params = ExecuteParams::default().with_body(json!({
            "orderId": "client-chosen",
            "totalPrice": 999,
            "userId": "123",
            "products": [{ "productId": "p1", "name": "Product 1", "quantity": 1, "price": 10 }],
            "status": "RECEIVED"
        }));

        let response = function_handler(&deps, params).await.unwrap();

        assert_eq!(response.status(), 201);
    }

    #[tokio::test]
    async fn when_status_is_invalid_should_return_400_without_storing() {
        let mut order_repo = MockOrderRepository::new();
        order_repo.expect_create().times(0);
        let deps = deps_with(order_repo);
        let params = ExecuteParams::default().with_body(json!({
            "userId": "123",
            "products": [{ "productId": "p1", "name": "Product 1", "quantity": 1, "price": 10 }],
            "status": "INVALID_STATUS"
        }));

        let response = function_handler(&deps, params).await.unwrap();

        assert_eq!(response.status(), 400);
        assert!(response.body().contains("Invalid enum value"));
    }

    #[tokio::test]
    async fn when_products_are_empty_should_return_400() {
        let mut order_repo = MockOrderRepository::new();
        order_repo.expect_create().times(0);
        let deps = deps_with(order_repo);
        let params = ExecuteParams::default().with_body(json!({
            "userId": "123",
            "products": [],
            "status": "RECEIVED"
        }));

        let response = function_handler(&deps, params).await.unwrap();

        assert_eq!(response.status(), 400);
        assert_eq!(
            body_of(&response)["error"]["products"],
            json!(["At least one item is required"])
        );
    }

    #[tokio::test]
    async fn when_storage_fails_should_propagate_error() {
        let mut order_repo = MockOrderRepository::new();
        order_repo
            .expect_create()
            .with(predicate::always())
            .times(1)
            .returning(|order| {
                Err(RepositoryError::InvalidRecord {
                    order_id: order.order_id,
                    reason: "Unknown order status 'LOST'".to_string(),
                })
            });
        let deps = deps_with(order_repo);
        let params = ExecuteParams::default().with_body(json!({
            "userId": "123",
            "products": [{ "productId": "p1", "name": "Product 1", "quantity": 1, "price": 10 }],
            "status": "RECEIVED"
        }));

        let result = function_handler(&deps, params).await;

        assert!(result.is_err());
    }
}
