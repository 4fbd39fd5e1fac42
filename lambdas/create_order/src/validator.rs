use serde_json::Value;
use shared::core::{OrderStatus, Product};
use shared::validation::{child_path, ValidationErrors, Validator};

#[derive(Debug, PartialEq)]
pub(crate) struct CreateOrderRequest {
    pub user_id: String,
    pub products: Vec<Product>,
    pub status: OrderStatus,
}

/// `orderId`, `totalPrice`, `createdAt` and `updatedAt` are type-checked when sent but
/// never used: the server assigns them.
pub(crate) fn validate(body: Option<&Value>) -> Result<CreateOrderRequest, ValidationErrors> {
    let mut validator = Validator::new();

    let Some(fields) = validator.object("", body) else {
        return validator.finish(None);
    };

    validator.optional_string("orderId", fields.get("orderId"));
    let user_id = validator.non_empty_string("userId", fields.get("userId"), "User ID is required");
    let products = validator
        .non_empty_array("products", fields.get("products"), "At least one item is required")
        .map(|items| {
            items
                .iter()
                .enumerate()
                .map(|(index, item)| product(&mut validator, &child_path("products", index), item))
                .collect::<Vec<_>>()
        });
    let status = validator.order_status("status", fields.get("status"));
    validator.optional_positive_number("totalPrice", fields.get("totalPrice"));
    validator.optional_string("createdAt", fields.get("createdAt"));
    validator.optional_string("updatedAt", fields.get("updatedAt"));

    let request = match (user_id, products, status) {
        (Some(user_id), Some(products), Some(status)) => products
            .into_iter()
            .collect::<Option<Vec<_>>>()
            .map(|products| CreateOrderRequest {
                user_id,
                products,
                status,
            }),
        _ => None,
    };

    validator.finish(request)
}

fn product(validator: &mut Validator, path: &str, item: &Value) -> Option<Product> {
    let fields = validator.object(path, Some(item))?;

    let product_id = validator.non_empty_string(
        &child_path(path, "productId"),
        fields.get("productId"),
        "Item ID is required",
    );
    let name = validator.non_empty_string(
        &child_path(path, "name"),
        fields.get("name"),
        "Item name is required",
    );
    let quantity = validator.positive_integer(
        &child_path(path, "quantity"),
        fields.get("quantity"),
        "Quantity must be a positive integer",
    );
    let price = validator.positive_number(
        &child_path(path, "price"),
        fields.get("price"),
        "Price must be a positive number",
    );

    Some(Product {
        product_id: product_id?,
        name: name?,
        quantity: quantity?,
        price: price?,
    })
}
