use std::sync::Arc;

use hello_world_lambda::config::Config;
use hello_world_lambda::handlers::{ScheduleHandler, UserHandler};
use hello_world_lambda::router::Router;
use hello_world_lambda::telemetry::init_tracing;
use hello_world_lambda::users::UserService;
use hello_world_lambda::{Dispatcher, Response};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();

    let cfg = Config::from_env();
    cfg.log_environment();

    // One dispatcher per process: the user store lives as long as the warm container.
    let users = UserHandler::new(UserService::default())
        .with_strict_validation(cfg.strict_user_validation);
    let dispatcher = Arc::new(Dispatcher::new(
        Router::new(users),
        ScheduleHandler::default(),
    ));

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let dispatcher = Arc::clone(&dispatcher);
        async move {
            tracing::info!(request_id = %event.context.request_id, "invocation received");
            Ok::<Response, Error>(dispatcher.dispatch(event.payload).await)
        }
    }))
    .await
}
