use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use async_trait::async_trait;
use hello_world_lambda::dispatch::RecordProcessor;
use hello_world_lambda::event::BatchRecord;
use hello_world_lambda::users::{InMemoryUserStore, UserService};
use hello_world_lambda::{Dispatcher, Response};
use serde_json::{json, Value};

fn http(method: &str, path: &str) -> Value {
    json!({
        "httpMethod": method,
        "path": path,
        "pathParameters": null,
        "queryStringParameters": null,
        "body": null
    })
}

fn message(resp: &Response) -> String {
    resp.body_json().unwrap()["message"]
        .as_str()
        .unwrap_or_default()
        .to_string()
}

fn sqs(bodies: &[&str]) -> Value {
    let records: Vec<Value> = bodies
        .iter()
        .enumerate()
        .map(|(i, body)| {
            json!({
                "messageId": format!("m-{i}"),
                "eventSource": "aws:sqs",
                "body": body
            })
        })
        .collect();
    json!({ "Records": records })
}

#[derive(Default)]
struct CountingProcessor {
    seen: AtomicUsize,
}

#[async_trait]
impl RecordProcessor for CountingProcessor {
    async fn process(&self, _record: &BatchRecord, _message: &Value) -> anyhow::Result<()> {
        self.seen.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[tokio::test]
async fn hello_returns_greeting() {
    let resp = Dispatcher::default().dispatch(http("GET", "/hello")).await;
    assert_eq!(resp.status_code, 200);
    assert_eq!(
        resp.body_json().unwrap(),
        json!({ "message": "Hello from Lambda!" })
    );
}

#[tokio::test]
async fn unrecognised_events_are_rejected() {
    let dispatcher = Dispatcher::default();
    for event in [
        json!({}),
        json!({ "path": "/hello" }),
        json!({ "source": "aws.s3" }),
        json!({ "Records": [] }),
        json!([1, 2, 3]),
    ] {
        let resp = dispatcher.dispatch(event).await;
        assert_eq!(resp.status_code, 400);
        assert_eq!(message(&resp), "Tipo de evento no soportado");
    }
}

#[tokio::test]
async fn unmatched_route_is_not_found() {
    let resp = Dispatcher::default().dispatch(http("GET", "/orders")).await;
    assert_eq!(resp.status_code, 404);
    assert_eq!(message(&resp), "Ruta no encontrada");
}

#[tokio::test]
async fn malformed_ids_are_bad_requests() {
    let dispatcher = Dispatcher::default();
    for id in ["0", "abc", "-1"] {
        let mut event = http("GET", &format!("/users/{id}"));
        event["pathParameters"] = json!({ "id": id });
        let resp = dispatcher.dispatch(event).await;
        assert_eq!(resp.status_code, 400, "id {id}");
        assert_eq!(
            message(&resp),
            "Bad Request - El id debe ser un numero mayor a 0"
        );
    }
}

#[tokio::test]
async fn unknown_user_is_null() {
    let mut event = http("GET", "/users/42");
    event["pathParameters"] = json!({ "id": "42" });

    let resp = Dispatcher::default().dispatch(event).await;
    assert_eq!(resp.status_code, 200);
    assert_eq!(resp.body, "null");
}

#[tokio::test]
async fn listing_is_idempotent_per_page() {
    let dispatcher = Dispatcher::default();
    let mut event = http("GET", "/users");
    event["queryStringParameters"] = json!({ "page": "3" });

    let first = dispatcher.dispatch(event.clone()).await;
    let second = dispatcher.dispatch(event).await;
    assert_eq!(first, second);
    assert_eq!(
        first.body_json().unwrap(),
        json!([
            { "id": 1, "name": "User 1 y llego el parametro page: 3" },
            { "id": 2, "name": "User 2" },
            { "id": 3, "name": "User 3" }
        ])
    );
}

#[tokio::test]
async fn created_user_is_retrievable() {
    let service = UserService::new(Arc::new(InMemoryUserStore::new()));
    let dispatcher = Dispatcher::with_service(service);

    let mut create = http("POST", "/users");
    create["body"] = json!(r#"{"name":"Alice"}"#);
    let created = dispatcher.dispatch(create).await;
    assert_eq!(created.status_code, 201);
    let id = created.body_json().unwrap()["id"].as_u64().unwrap();

    let mut get = http("GET", &format!("/user/{id}"));
    get["pathParameters"] = json!({ "id": id.to_string() });
    let found = dispatcher.dispatch(get).await;
    assert_eq!(found.status_code, 200);
    assert_eq!(found.body_json().unwrap(), json!({ "id": id, "name": "Alice" }));
}

#[tokio::test]
async fn create_without_name_is_a_server_error() {
    let mut event = http("POST", "/users");
    event["body"] = json!("{}");

    let resp = Dispatcher::default().dispatch(event).await;
    assert_eq!(resp.status_code, 500);
    assert_eq!(
        message(&resp),
        "Server Error - Error al procesar la solicitud"
    );
}

#[tokio::test]
async fn daily_schedule_is_recognised() {
    let resp = Dispatcher::default()
        .dispatch(json!({
            "source": "aws.events",
            "detail-type": "Scheduled Event",
            "resources": ["arn:aws:events:us-east-1:123456789012:rule/daily-user-check-every-day"]
        }))
        .await;
    assert_eq!(resp.status_code, 200);
    let body = resp.body_json().unwrap();
    assert_eq!(body["details"], "Este evento se ejecuta diariamente a las 5 AM");
    assert_eq!(body["name"], "daily-user-check-every-day");
}

#[tokio::test]
async fn unknown_schedule_is_acknowledged() {
    let resp = Dispatcher::default()
        .dispatch(json!({
            "source": "aws.events",
            "resources": ["arn:aws:events:us-east-1:123456789012:rule/unknown-thing"]
        }))
        .await;
    assert_eq!(resp.status_code, 200);
    assert_eq!(resp.body_json().unwrap()["details"], "Este evento es desconocido");
}

#[tokio::test]
async fn sqs_batch_is_processed() {
    let processor = Arc::new(CountingProcessor::default());
    let dispatcher = Dispatcher::default().with_record_processor(processor.clone());

    let resp = dispatcher
        .dispatch(sqs(&[r#"{"order":1}"#, r#"{"order":2}"#]))
        .await;
    assert_eq!(resp.status_code, 200);
    assert_eq!(message(&resp), "Mensajes de SQS procesados");
    assert_eq!(processor.seen.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn invalid_record_fails_the_whole_batch() {
    let processor = Arc::new(CountingProcessor::default());
    let dispatcher = Dispatcher::default().with_record_processor(processor.clone());

    let resp = dispatcher.dispatch(sqs(&["not json", r#"{"ok":true}"#])).await;
    assert_eq!(resp.status_code, 500);
    assert!(message(&resp).starts_with("Error interno en el servidor, "));
    assert_eq!(processor.seen.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn malformed_http_envelope_is_a_server_error() {
    let resp = Dispatcher::default()
        .dispatch(json!({ "httpMethod": "GET", "path": null }))
        .await;
    assert_eq!(resp.status_code, 500);
    assert!(message(&resp).starts_with("Error interno en el servidor"));
}

#[tokio::test]
async fn hello_ignores_non_string_body() {
    let mut event = http("GET", "/hello");
    event["body"] = json!({ "a": 1 });

    let resp = Dispatcher::default().dispatch(event).await;
    assert_eq!(resp.status_code, 200);
    assert_eq!(message(&resp), "Hello from Lambda!");
}

#[tokio::test]
async fn numeric_path_parameter_is_looked_up() {
    let mut event = http("GET", "/users/7");
    event["pathParameters"] = json!({ "id": 7 });

    let resp = Dispatcher::default().dispatch(event).await;
    assert_eq!(resp.status_code, 200);
    assert_eq!(resp.body, "null");
}

#[tokio::test]
async fn null_method_matches_no_route() {
    let dispatcher = Dispatcher::default();

    let resp = dispatcher
        .dispatch(json!({ "httpMethod": null, "path": "/orders" }))
        .await;
    assert_eq!(resp.status_code, 404);
    assert_eq!(message(&resp), "Ruta no encontrada");

    let resp = dispatcher
        .dispatch(json!({ "httpMethod": 1, "path": "/hello" }))
        .await;
    assert_eq!(resp.status_code, 404);
}
