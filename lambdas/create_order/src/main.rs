use crate::http_handler::{function_handler, HandlerDeps};
use lambda_http::{run, service_fn, tracing, Error};
use shared::adapters::PostgresOrderRepository;
use shared::configuration::Configuration;
use shared::controller;
use shared::core::CuidGenerator;

mod http_handler;
mod validator;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let ssm_client = aws_sdk_ssm::Client::new(&aws_config);
    let secret_client = aws_sdk_secretsmanager::Client::new(&aws_config);
    let configuration = Configuration::load(&ssm_client, &secret_client).await?;

    let deps = HandlerDeps {
        order_repo: PostgresOrderRepository::from_configuration(&configuration),
        id_generator: CuidGenerator::new(),
    };
    let deps = &deps;

    run(service_fn(move |event| {
        controller::handle(event, move |params| function_handler(deps, params))
    }))
    .await
}
