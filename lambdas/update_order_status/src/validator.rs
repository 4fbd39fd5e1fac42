use serde_json::Value;
use shared::core::OrderStatus;
use shared::validation::{ValidationErrors, Validator};

#[derive(Debug, PartialEq)]
pub(crate) struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

pub(crate) fn validate(body: Option<&Value>) -> Result<UpdateOrderStatusRequest, ValidationErrors> {
    let mut validator = Validator::new();

    let status = validator
        .object("", body)
        .and_then(|fields| validator.order_status("status", fields.get("status")));

    validator.finish(status.map(|status| UpdateOrderStatusRequest { status }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn when_status_is_known_should_accept() {
        let request = validate(Some(&json!({ "status": "OUT_FOR_DELIVERY" }))).unwrap();

        assert_eq!(request.status, OrderStatus::OutForDelivery);
    }

    #[test]
    fn when_status_is_missing_should_report_required() {
        let errors = validate(Some(&json!({}))).unwrap_err();

        assert_eq!(errors.get("status").unwrap(), ["Required"]);
    }

    #[test]
    fn when_status_is_lowercase_should_reject() {
        let errors = validate(Some(&json!({ "status": "delivered" }))).unwrap_err();

        assert!(errors.get("status").unwrap()[0].starts_with("Invalid enum value"));
    }

    #[test]
    fn when_body_is_null_should_report_root_error() {
        let errors = validate(Some(&Value::Null)).unwrap_err();

        assert_eq!(errors.get("_errors").unwrap(), ["Expected object, received null"]);
    }
}
