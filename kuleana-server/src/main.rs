//! HTTP control plane for the workflow engine: start, list, get and
//! cancel instances, plus health and service-info endpoints.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::Utc;
use serde_json::json;
use strum::IntoEnumIterator;

use kuleana_common::prelude::*;
use kuleana_common::{ActivityName, StartProcessRequest, WorkflowKind};
use kuleana_core::{
    ActivityRegistry, EngineProperties, ExecutionService, WorkflowEngine, WorkflowService,
};

const SERVICE_NAME: &str = "Kuleana Compliance Workflow Engine";

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let properties = match EngineProperties::from_env() {
        Ok(properties) => properties,
        Err(e) => {
            error!("invalid engine configuration: {}", e);
            std::process::exit(1);
        }
    };
    info!("starting {}", SERVICE_NAME);
    info!("namespace: {}", properties.namespace);
    info!("task queue: {}", properties.task_queue);

    let addr: SocketAddr = match format!("{}:{}", properties.address, properties.port).parse() {
        Ok(addr) => addr,
        Err(e) => {
            error!(
                "invalid listen address {}:{}: {}",
                properties.address, properties.port, e
            );
            std::process::exit(1);
        }
    };

    let engine = WorkflowEngine::new(properties, ActivityRegistry::with_defaults());
    let workflows = Arc::new(WorkflowService::new(engine.clone()));
    let executions = Arc::new(ExecutionService::new(engine.clone()));

    let app = Router::new()
        .route("/api/health", get(health))
        .route("/api/info", get(service_info))
        .route("/api/workflows", get(list_workflows).post(start_workflow))
        .route("/api/workflows/:workflow_id", get(get_workflow))
        .route("/api/workflows/:workflow_id/cancel", post(cancel_workflow))
        .layer(Extension(engine.clone()))
        .layer(Extension(workflows))
        .layer(Extension(executions));

    info!("workflow control plane listening on {}", addr);
    let server = axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal());
    if let Err(e) = server.await {
        error!("server error: {}", e);
    }

    info!("draining in-flight workflow continuations");
    engine.drain().await;
    info!("{} stopped", SERVICE_NAME);
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received");
}

async fn health(
    Extension(engine): Extension<Arc<WorkflowEngine>>,
) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": SERVICE_NAME,
            "timestamp": Utc::now().timestamp_millis(),
            "engineRunning": true,
            "taskQueue": engine.properties().task_queue.as_str(),
            "namespace": engine.properties().namespace.as_str(),
            "workflowsStored": engine.instance_count(),
        })),
    )
}

async fn service_info() -> (StatusCode, Json<serde_json::Value>) {
    let workflows: Vec<String> = WorkflowKind::iter()
        .map(|kind| kind.as_ref().to_string())
        .collect();
    let activities: Vec<String> = ActivityName::iter()
        .map(|activity| activity.as_ref().to_string())
        .collect();
    (
        StatusCode::OK,
        Json(json!({
            "service": SERVICE_NAME,
            "version": env!("CARGO_PKG_VERSION"),
            "description": "Workflow orchestration for county short-term-rental compliance processes",
            "workflows": workflows,
            "activities": activities,
            "features": [
                "In-memory workflow storage",
                "Durable logical timers",
                "Activity retry policies",
                "History tracking",
                "Cancellation",
            ],
        })),
    )
}

async fn list_workflows(
    Extension(executions): Extension<Arc<ExecutionService>>,
) -> (StatusCode, Json<serde_json::Value>) {
    let workflows = executions.list_executions();
    let total = workflows.len();
    match serde_json::to_value(&workflows) {
        Ok(workflows) => (
            StatusCode::OK,
            Json(json!({ "workflows": workflows, "total": total })),
        ),
        Err(e) => error_response(e.into()),
    }
}

async fn start_workflow(
    Extension(workflows): Extension<Arc<WorkflowService>>,
    Json(body): Json<serde_json::Value>,
) -> (StatusCode, Json<serde_json::Value>) {
    let request = match StartProcessRequest::try_from(body) {
        Ok(request) => request,
        Err(e) => return error_response(e),
    };
    match workflows.start_workflow(request) {
        Ok(workflow_id) => (
            StatusCode::CREATED,
            Json(json!({
                "success": true,
                "workflowId": workflow_id.as_str(),
                "status": "RUNNING",
                "message": "Workflow started successfully",
            })),
        ),
        Err(e) => error_response(e),
    }
}

async fn get_workflow(
    Path(workflow_id): Path<String>,
    Extension(executions): Extension<Arc<ExecutionService>>,
) -> (StatusCode, Json<serde_json::Value>) {
    match executions.get_execution_status(&workflow_id) {
        Ok(instance) => match serde_json::to_value(&instance) {
            Ok(instance) => (StatusCode::OK, Json(instance)),
            Err(e) => error_response(e.into()),
        },
        Err(e) => error_response(e),
    }
}

async fn cancel_workflow(
    Path(workflow_id): Path<String>,
    Extension(workflows): Extension<Arc<WorkflowService>>,
) -> (StatusCode, Json<serde_json::Value>) {
    match workflows.cancel_workflow(&workflow_id) {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "workflowId": workflow_id,
                "status": "CANCELLED",
            })),
        ),
        Err(e) => error_response(e),
    }
}

fn error_response(e: ErrorCode) -> (StatusCode, Json<serde_json::Value>) {
    let status = match e.code() {
        code if code == ErrorCode::not_found_code() => StatusCode::NOT_FOUND,
        code if code == ErrorCode::illegal_argument_code()
            || code == ErrorCode::unknown_workflow_type_code() =>
        {
            StatusCode::BAD_REQUEST
        }
        code if code == ErrorCode::conflict_code() => StatusCode::CONFLICT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "success": false, "error": e.message() })))
}
