use axum::{
    http::{header, Method, StatusCode},
    routing::{get, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        health::{healthz, livez},
        queues::{list_queues, receive_messages},
        tables::{get_graph, list_tables, put_graph},
        topics::{get_topic, list_topics, publish},
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([header::CONTENT_TYPE]);

    let timeout = state.config.request_timeout();

    Router::new()
        .route("/livez", get(livez))
        .route("/healthz", get(healthz))
        // DynamoDB routes
        .route("/dynamo-test", put(put_graph))
        .route("/dynamo-test/tables", get(list_tables))
        .route("/dynamo-test/{guid}", get(get_graph))
        // SNS routes
        .route("/publish/topics", get(list_topics))
        .route("/publish/topics/{topic_name}", get(get_topic).post(publish))
        // SQS routes
        .route("/queues", get(list_queues))
        .route("/queues/{queue_name}", get(receive_messages))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use async_trait::async_trait;
    use awsrelay_core::dynamo::{
        GetItemOutput, GetItemParams, ListTablesOutput, ListTablesParams, PutItemOutput,
        PutItemParams,
    };
    use awsrelay_core::queues::{
        DeleteEntry, DeleteMessageBatchOutput, ListQueuesOutput, ReceiveMessageOutput,
        ReceiveParams,
    };
    use awsrelay_core::topics::{
        ListTopicsOutput, PublishOutput, PublishParams, Topic, TopicAttributesOutput,
    };
    use awsrelay_core::{QueueGateway, Result, ServiceError, TableGateway, TopicGateway};
    use axum::{
        body::Body,
        http::{Request, Response},
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::backends::inmemory::{InMemoryQueues, InMemoryTables, InMemoryTopics};
    use crate::config::Config;
    use crate::state::Backend;

    struct Fixture {
        app: Router,
        tables: InMemoryTables,
        topics: InMemoryTopics,
        queues: InMemoryQueues,
    }

    fn fixture() -> Fixture {
        let config = Config::default();
        let tables = InMemoryTables::with_tables([config.table_name.clone()]);
        let topics = InMemoryTopics::new(config.region.clone());
        let queues = InMemoryQueues::new(config.region.clone());

        let state = AppState::with_gateways(
            Arc::new(tables.clone()),
            Arc::new(topics.clone()),
            Arc::new(queues.clone()),
            config,
            Backend::Memory,
        );

        Fixture {
            app: create_app(state),
            tables,
            topics,
            queues,
        }
    }

    /// Gateway failing every call with the same error.
    struct Failing(ServiceError);

    #[async_trait]
    impl TableGateway for Failing {
        async fn list_tables(&self, _: ListTablesParams) -> Result<ListTablesOutput> {
            Err(self.0.clone())
        }
        async fn get_item(&self, _: GetItemParams) -> Result<GetItemOutput> {
            Err(self.0.clone())
        }
        async fn put_item(&self, _: PutItemParams) -> Result<PutItemOutput> {
            Err(self.0.clone())
        }
    }

    #[async_trait]
    impl TopicGateway for Failing {
        async fn list_topics(&self, _: Option<String>) -> Result<ListTopicsOutput> {
            Err(self.0.clone())
        }
        async fn find_topic(&self, _: &str) -> Result<Option<Topic>> {
            Err(self.0.clone())
        }
        async fn topic_attributes(&self, _: &str) -> Result<TopicAttributesOutput> {
            Err(self.0.clone())
        }
        async fn publish(&self, _: &str, _: PublishParams) -> Result<PublishOutput> {
            Err(self.0.clone())
        }
    }

    #[async_trait]
    impl QueueGateway for Failing {
        async fn list_queues(&self, _: Option<String>) -> Result<ListQueuesOutput> {
            Err(self.0.clone())
        }
        async fn queue_url(&self, _: &str) -> Result<String> {
            Err(self.0.clone())
        }
        async fn receive_messages(&self, _: &str, _: ReceiveParams) -> Result<ReceiveMessageOutput> {
            Err(self.0.clone())
        }
        async fn delete_messages(
            &self,
            _: &str,
            _: Vec<DeleteEntry>,
        ) -> Result<DeleteMessageBatchOutput> {
            Err(self.0.clone())
        }
    }

    fn failing_app(error: ServiceError) -> Router {
        let failing = Arc::new(Failing(error));
        let state = AppState::with_gateways(
            failing.clone(),
            failing.clone(),
            failing,
            Config::default(),
            Backend::Aws,
        );
        create_app(state)
    }

    fn upstream() -> ServiceError {
        ServiceError::Upstream {
            operation: "Test",
            code: Some("InternalFailure".to_string()),
            message: "kaput".to_string(),
        }
    }

    async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
        app.clone().oneshot(request).await.unwrap()
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn json_req(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_text(response: Response<Body>) -> String {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(body.to_vec()).unwrap()
    }

    async fn body_json(response: Response<Body>) -> Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    // ------------------------------------------------------------------------
    // Health
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_livez() {
        let fx = fixture();
        let response = send(&fx.app, get_req("/livez")).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_healthz_reports_backend() {
        let fx = fixture();
        let response = send(&fx.app, get_req("/healthz")).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"status": "ok", "backend": "memory", "region": "us-west-2"})
        );
    }

    // ------------------------------------------------------------------------
    // DynamoDB
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_list_tables() {
        let fx = fixture();
        let response = send(&fx.app, get_req("/dynamo-test/tables")).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"TableNames": ["test-coinstar"]})
        );
    }

    #[tokio::test]
    async fn test_put_then_get_graph() {
        let fx = fixture();

        let response = send(
            &fx.app,
            json_req("PUT", "/dynamo-test", json!({"guid": "abc", "graphId": "g-1"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"ConsumedCapacity": {"TableName": "test-coinstar", "CapacityUnits": 1.0}})
        );

        let response = send(&fx.app, get_req("/dynamo-test/abc")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({
                "Item": {"graph_id": {"S": "g-1"}},
                "ConsumedCapacity": {"TableName": "test-coinstar", "CapacityUnits": 0.5}
            })
        );
    }

    #[tokio::test]
    async fn test_put_without_graph_id_stores_none() {
        let fx = fixture();

        let response = send(&fx.app, json_req("PUT", "/dynamo-test", json!({"guid": "abc"}))).await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = send(&fx.app, get_req("/dynamo-test/abc")).await;
        let json = body_json(response).await;
        assert_eq!(json["Item"]["graph_id"], json!({"S": "NONE"}));
    }

    #[tokio::test]
    async fn test_put_without_guid_is_rejected() {
        let fx = fixture();

        let response = send(
            &fx.app,
            json_req("PUT", "/dynamo-test", json!({"graphId": "g-1"})),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({"message": "Invalid input: guid is required"})
        );
        assert_eq!(fx.tables.item_count("test-coinstar").await, Some(0));
    }

    #[tokio::test]
    async fn test_get_missing_graph_has_no_item() {
        let fx = fixture();
        let response = send(&fx.app, get_req("/dynamo-test/missing")).await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert!(json.get("Item").is_none());
        assert!(json.get("ConsumedCapacity").is_some());
    }

    #[tokio::test]
    async fn test_put_with_mistyped_guid_is_message_object() {
        let fx = fixture();
        let response = send(&fx.app, json_req("PUT", "/dynamo-test", json!({"guid": 5}))).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert!(json["message"]
            .as_str()
            .unwrap()
            .starts_with("Invalid input: Failed to deserialize the JSON body"));
        assert_eq!(fx.tables.item_count("test-coinstar").await, Some(0));
    }

    #[tokio::test]
    async fn test_put_with_malformed_json_is_message_object() {
        let fx = fixture();
        let request = Request::builder()
            .method("PUT")
            .uri("/dynamo-test")
            .header("Content-Type", "application/json")
            .body(Body::from("{\"guid\":"))
            .unwrap();
        let response = send(&fx.app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert!(json["message"].as_str().unwrap().starts_with("Invalid input: "));
    }

    #[tokio::test]
    async fn test_list_tables_with_bad_limit_is_message_object() {
        let fx = fixture();
        let response = send(&fx.app, get_req("/dynamo-test/tables?limit=abc")).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert!(json["message"]
            .as_str()
            .unwrap()
            .starts_with("Invalid input: Failed to deserialize query string"));
    }

    #[tokio::test]
    async fn test_get_graph_failure_is_boom() {
        let app = failing_app(upstream());
        let response = send(&app, get_req("/dynamo-test/abc")).await;

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(body_text(response).await, "BOOM");
    }

    #[tokio::test]
    async fn test_put_graph_failure_is_message_object() {
        let app = failing_app(upstream());
        let response = send(&app, json_req("PUT", "/dynamo-test", json!({"guid": "abc"}))).await;

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            body_json(response).await,
            json!({"message": "Test failed: kaput"})
        );
    }

    #[tokio::test]
    async fn test_list_tables_failure_is_message_object() {
        let app = failing_app(ServiceError::Unavailable("dispatch failure".into()));
        let response = send(&app, get_req("/dynamo-test/tables")).await;

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            body_json(response).await,
            json!({"message": "Service unavailable: dispatch failure"})
        );
    }

    // ------------------------------------------------------------------------
    // SNS
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_list_topics() {
        let fx = fixture();
        let arn = fx.topics.create_topic("orders").await;

        let response = send(&fx.app, get_req("/publish/topics")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"Topics": [{"TopicArn": arn}]})
        );
    }

    #[tokio::test]
    async fn test_get_topic_attributes_by_name() {
        let fx = fixture();
        let arn = fx.topics.create_topic("orders").await;

        let response = send(&fx.app, get_req("/publish/topics/orders")).await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["Attributes"]["TopicArn"], json!(arn));
    }

    #[tokio::test]
    async fn test_get_unknown_topic_is_404_text() {
        let fx = fixture();
        let response = send(&fx.app, get_req("/publish/topics/nope")).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(response).await, "Topic not found: nope");
    }

    #[tokio::test]
    async fn test_publish_by_name() {
        let fx = fixture();
        let arn = fx.topics.create_topic("orders").await;

        let response = send(
            &fx.app,
            json_req(
                "POST",
                "/publish/topics/orders",
                json!({"message": "hello", "subject": "greeting"}),
            ),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert!(json["MessageId"].is_string());

        let published = fx.topics.published(&arn).await;
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].message, "hello");
        assert_eq!(published[0].subject.as_deref(), Some("greeting"));
    }

    #[tokio::test]
    async fn test_publish_without_message_is_rejected() {
        let fx = fixture();
        let arn = fx.topics.create_topic("orders").await;

        let response = send(
            &fx.app,
            json_req("POST", "/publish/topics/orders", json!({"subject": "x"})),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, "Invalid input: message is required");
        assert!(fx.topics.published(&arn).await.is_empty());
    }

    #[tokio::test]
    async fn test_publish_with_mistyped_message_is_text() {
        let fx = fixture();
        let arn = fx.topics.create_topic("orders").await;

        let response = send(
            &fx.app,
            json_req("POST", "/publish/topics/orders", json!({"message": 5})),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(response)
            .await
            .starts_with("Invalid input: Failed to deserialize the JSON body"));
        assert!(fx.topics.published(&arn).await.is_empty());
    }

    #[tokio::test]
    async fn test_list_topics_with_repeated_token_is_text() {
        let fx = fixture();
        let response = send(&fx.app, get_req("/publish/topics?nextToken=1&nextToken=2")).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(response)
            .await
            .starts_with("Invalid input: Failed to deserialize query string"));
    }

    #[tokio::test]
    async fn test_topic_failure_is_text() {
        let app = failing_app(ServiceError::Forbidden("not authorized".into()));
        let response = send(&app, get_req("/publish/topics")).await;

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(body_text(response).await, "Access denied: not authorized");
    }

    // ------------------------------------------------------------------------
    // SQS
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_list_queues() {
        let fx = fixture();
        let url = fx.queues.create_queue("jobs").await;

        let response = send(&fx.app, get_req("/queues")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"QueueUrls": [url]}));
    }

    #[tokio::test]
    async fn test_receive_without_delete_keeps_messages() {
        let fx = fixture();
        fx.queues.create_queue("jobs").await;
        fx.queues.send_message("jobs", "hello").await.unwrap();

        let response = send(&fx.app, get_req("/queues/jobs")).await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["Messages"][0]["Body"], "hello");
        assert!(json["Messages"][0]["ReceiptHandle"].is_string());
        assert!(json.get("Deleted").is_none());
        assert_eq!(fx.queues.depth("jobs").await, Some(1));
    }

    #[tokio::test]
    async fn test_receive_with_delete_removes_messages() {
        let fx = fixture();
        fx.queues.create_queue("jobs").await;
        fx.queues.send_message("jobs", "one").await.unwrap();
        fx.queues.send_message("jobs", "two").await.unwrap();

        let response = send(&fx.app, get_req("/queues/jobs?delete=true")).await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["Messages"].as_array().unwrap().len(), 2);
        assert_eq!(
            json["Deleted"],
            json!({"Successful": [{"Id": "0"}, {"Id": "1"}], "Failed": []})
        );
        assert_eq!(fx.queues.depth("jobs").await, Some(0));
    }

    #[tokio::test]
    async fn test_receive_with_delete_on_empty_queue() {
        let fx = fixture();
        fx.queues.create_queue("jobs").await;

        let response = send(&fx.app, get_req("/queues/jobs?delete=true")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"Messages": []}));
    }

    #[tokio::test]
    async fn test_receive_with_other_delete_value_keeps_messages() {
        let fx = fixture();
        fx.queues.create_queue("jobs").await;
        fx.queues.send_message("jobs", "hello").await.unwrap();

        let response = send(&fx.app, get_req("/queues/jobs?delete=yes")).await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["Messages"].as_array().unwrap().len(), 1);
        assert!(json.get("Deleted").is_none());
        assert_eq!(fx.queues.depth("jobs").await, Some(1));
    }

    #[tokio::test]
    async fn test_receive_with_repeated_delete_is_error_object() {
        let fx = fixture();
        fx.queues.create_queue("jobs").await;

        let response = send(&fx.app, get_req("/queues/jobs?delete=true&delete=true")).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "InvalidInput");
        assert_eq!(json["statusCode"], 400);
        assert!(json["message"]
            .as_str()
            .unwrap()
            .starts_with("Invalid input: Failed to deserialize query string"));
    }

    #[tokio::test]
    async fn test_list_queues_with_repeated_prefix_is_error_object() {
        let fx = fixture();
        let response = send(&fx.app, get_req("/queues?prefix=a&prefix=b")).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "InvalidInput");
        assert_eq!(json["statusCode"], 400);
    }

    #[tokio::test]
    async fn test_receive_from_unknown_queue_is_error_object() {
        let fx = fixture();
        let response = send(&fx.app, get_req("/queues/missing")).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            json!({
                "code": "NotFound",
                "message": "Queue not found: missing",
                "statusCode": 404
            })
        );
    }

    #[tokio::test]
    async fn test_queue_failure_is_error_object() {
        let app = failing_app(upstream());
        let response = send(&app, get_req("/queues")).await;

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            body_json(response).await,
            json!({"code": "InternalFailure", "message": "Test failed: kaput", "statusCode": 502})
        );
    }
}
