// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{
        Path, Query, State as AxumState,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use staff_ledger_api::{
    AddEmployeeRequest, ApiError, ApplyTransactionRequest, AttendanceInfo,
    AttendanceReportRequest, AttendanceReportResponse, DeleteEmployeeResponse, EmployeeInfo,
    EmployeeWithTodayInfo, FinancialSummaryResponse, ListEmployeesRequest,
    MarkAttendanceRequest, MarkAttendanceResponse, SettleAccountResponse, StoreStatusResponse,
    TodayPayoutsResponse, TransactionInfo, UpdateEmployeeRequest, add_employee,
    apply_transaction, attendance_report, delete_employee, financial_summary, get_employee,
    list_attendance, list_employees, list_transactions, mark_attendance, parse_update_body,
    settle_account, store_status, today_payouts, update_employee,
};
use staff_ledger_persistence::{LedgerStore, StoreConfig};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use time::{Date, OffsetDateTime, UtcOffset};
use tracing::{error, info, warn};

/// Response header set when the ledger store could not be reached.
const FALLBACK_MODE_HEADER: &str = "x-fallback-mode";

/// Staff Ledger Server - HTTP server for employee payroll and attendance
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: IpAddr,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3001)]
    port: u16,

    /// Maximum number of pooled database connections (file databases only)
    #[arg(long, default_value_t = 8)]
    pool_size: u32,

    /// How long a writer waits for the database write lock, in milliseconds
    #[arg(long, default_value_t = 5000)]
    busy_timeout_ms: u64,

    /// UTC offset of the business, in whole hours, used to compute "today"
    #[arg(
        long,
        default_value_t = 0,
        allow_negative_numbers = true,
        value_parser = clap::value_parser!(i8).range(-23..=23)
    )]
    utc_offset_hours: i8,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// Handle to the ledger store. Clones share one connection pool.
    store: LedgerStore,
    /// Offset applied to the wall clock to find the business date.
    utc_offset: UtcOffset,
    /// Pins the business date; `None` reads the wall clock.
    fixed_today: Option<Date>,
}

impl AppState {
    /// The business date for the current request.
    fn today(&self) -> Date {
        self.fixed_today
            .unwrap_or_else(|| OffsetDateTime::now_utc().to_offset(self.utc_offset).date())
    }

    /// Runs a store operation on the blocking thread pool.
    async fn run<T, F>(&self, operation: F) -> Result<T, HttpError>
    where
        T: Send + 'static,
        F: FnOnce(&LedgerStore) -> Result<T, ApiError> + Send + 'static,
    {
        let store: LedgerStore = self.store.clone();
        tokio::task::spawn_blocking(move || operation(&store))
            .await
            .map_err(|e| HttpError {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: format!("Store task failed: {e}"),
            })?
            .map_err(HttpError::from)
    }

    async fn store_available(&self) -> bool {
        let store: LedgerStore = self.store.clone();
        tokio::task::spawn_blocking(move || store.is_store_available())
            .await
            .unwrap_or(false)
    }
}

/// Response for the health endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct HealthResponse {
    /// `ok` or `degraded`.
    status: String,
    store_available: bool,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
#[derive(Debug)]
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        let mut response: Response = (self.status, body).into_response();
        // Only an unreachable store maps to 503.
        if self.status == StatusCode::SERVICE_UNAVAILABLE {
            response
                .headers_mut()
                .insert(FALLBACK_MODE_HEADER, HeaderValue::from_static("true"));
        }
        response
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => {
                warn!(error = %err, "Resource not found");
                StatusCode::NOT_FOUND
            }
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::StoreUnavailable { .. } => {
                error!(error = %err, "Ledger store unavailable");
                StatusCode::SERVICE_UNAVAILABLE
            }
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<JsonRejection> for HttpError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for HttpError {
    fn from(rejection: QueryRejection) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for HttpError {
    fn from(rejection: PathRejection) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: rejection.body_text(),
        }
    }
}

type IdPath = Result<Path<i64>, PathRejection>;

// ========================================================================
// Employees
// ========================================================================

/// Handler for GET `/api/employees`.
async fn handle_list_employees(
    AxumState(app_state): AxumState<AppState>,
    query: Result<Query<ListEmployeesRequest>, QueryRejection>,
) -> Result<Json<Vec<EmployeeWithTodayInfo>>, HttpError> {
    let Query(request) = query?;
    let today: Date = app_state.today();
    let employees: Vec<EmployeeWithTodayInfo> = app_state
        .run(move |store| list_employees(store, &request, today))
        .await?;
    Ok(Json(employees))
}

/// Handler for POST `/api/employees`.
async fn handle_add_employee(
    AxumState(app_state): AxumState<AppState>,
    body: Result<Json<AddEmployeeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<EmployeeInfo>), HttpError> {
    let Json(request) = body?;
    info!(name = %request.name, position = %request.position, "Handling add_employee request");

    let today: Date = app_state.today();
    let employee: EmployeeInfo = app_state
        .run(move |store| add_employee(store, &request, today))
        .await?;
    Ok((StatusCode::CREATED, Json(employee)))
}

/// Handler for GET `/api/employees/{id}`.
async fn handle_get_employee(
    AxumState(app_state): AxumState<AppState>,
    path: IdPath,
) -> Result<Json<EmployeeInfo>, HttpError> {
    let Path(employee_id) = path?;
    let employee: EmployeeInfo = app_state
        .run(move |store| get_employee(store, employee_id))
        .await?;
    Ok(Json(employee))
}

/// Handler for PUT `/api/employees/{id}`.
///
/// The body is parsed against the closed patch field set before any store
/// access.
async fn handle_update_employee(
    AxumState(app_state): AxumState<AppState>,
    path: IdPath,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<EmployeeInfo>, HttpError> {
    let Path(employee_id) = path?;
    let Json(value) = body?;
    let request: UpdateEmployeeRequest = parse_update_body(value).map_err(ApiError::from)?;
    info!(employee_id, "Handling update_employee request");

    let employee: EmployeeInfo = app_state
        .run(move |store| update_employee(store, employee_id, &request))
        .await?;
    Ok(Json(employee))
}

/// Handler for DELETE `/api/employees/{id}`.
async fn handle_delete_employee(
    AxumState(app_state): AxumState<AppState>,
    path: IdPath,
) -> Result<Json<DeleteEmployeeResponse>, HttpError> {
    let Path(employee_id) = path?;
    info!(employee_id, "Handling delete_employee request");
    let response: DeleteEmployeeResponse = app_state
        .run(move |store| delete_employee(store, employee_id))
        .await?;
    Ok(Json(response))
}

// ========================================================================
// Attendance
// ========================================================================

/// Handler for POST `/api/employees/{id}/attendance`.
async fn handle_mark_attendance(
    AxumState(app_state): AxumState<AppState>,
    path: IdPath,
    body: Result<Json<MarkAttendanceRequest>, JsonRejection>,
) -> Result<Json<MarkAttendanceResponse>, HttpError> {
    let Path(employee_id) = path?;
    let Json(request) = body?;
    let today: Date = app_state.today();
    let response: MarkAttendanceResponse = app_state
        .run(move |store| mark_attendance(store, employee_id, &request, today))
        .await?;
    Ok(Json(response))
}

/// Handler for GET `/api/employees/{id}/attendance`.
async fn handle_list_attendance(
    AxumState(app_state): AxumState<AppState>,
    path: IdPath,
) -> Result<Json<Vec<AttendanceInfo>>, HttpError> {
    let Path(employee_id) = path?;
    let records: Vec<AttendanceInfo> = app_state
        .run(move |store| list_attendance(store, employee_id))
        .await?;
    Ok(Json(records))
}

// ========================================================================
// Ledger
// ========================================================================

/// Handler for POST `/api/employees/{id}/transactions`.
async fn handle_apply_transaction(
    AxumState(app_state): AxumState<AppState>,
    path: IdPath,
    body: Result<Json<ApplyTransactionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TransactionInfo>), HttpError> {
    let Path(employee_id) = path?;
    let Json(request) = body?;
    info!(
        employee_id,
        transaction_type = %request.transaction_type,
        amount = %request.amount,
        "Handling apply_transaction request"
    );

    let today: Date = app_state.today();
    let transaction: TransactionInfo = app_state
        .run(move |store| apply_transaction(store, employee_id, &request, today))
        .await?;
    Ok((StatusCode::CREATED, Json(transaction)))
}

/// Handler for GET `/api/employees/{id}/transactions`.
async fn handle_list_transactions(
    AxumState(app_state): AxumState<AppState>,
    path: IdPath,
) -> Result<Json<Vec<TransactionInfo>>, HttpError> {
    let Path(employee_id) = path?;
    let transactions: Vec<TransactionInfo> = app_state
        .run(move |store| list_transactions(store, employee_id))
        .await?;
    Ok(Json(transactions))
}

/// Handler for POST `/api/employees/{id}/settle`.
async fn handle_settle_account(
    AxumState(app_state): AxumState<AppState>,
    path: IdPath,
) -> Result<Json<SettleAccountResponse>, HttpError> {
    let Path(employee_id) = path?;
    info!(employee_id, "Handling settle_account request");
    let today: Date = app_state.today();
    let response: SettleAccountResponse = app_state
        .run(move |store| settle_account(store, employee_id, today))
        .await?;
    Ok(Json(response))
}

// ========================================================================
// Reports
// ========================================================================

/// Handler for GET `/api/reports/attendance`.
async fn handle_attendance_report(
    AxumState(app_state): AxumState<AppState>,
    query: Result<Query<AttendanceReportRequest>, QueryRejection>,
) -> Result<Json<AttendanceReportResponse>, HttpError> {
    let Query(request) = query?;
    let report: AttendanceReportResponse = app_state
        .run(move |store| attendance_report(store, &request))
        .await?;
    Ok(Json(report))
}

/// Handler for GET `/api/reports/financial-summary`.
async fn handle_financial_summary(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<FinancialSummaryResponse>, HttpError> {
    let summary: FinancialSummaryResponse = app_state.run(financial_summary).await?;
    Ok(Json(summary))
}

/// Handler for GET `/api/reports/today-payouts`.
async fn handle_today_payouts(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<TodayPayoutsResponse>, HttpError> {
    let today: Date = app_state.today();
    let payouts: TodayPayoutsResponse = app_state
        .run(move |store| today_payouts(store, today))
        .await?;
    Ok(Json(payouts))
}

// ========================================================================
// Health
// ========================================================================

/// Handler for GET `/health`.
async fn handle_health(AxumState(app_state): AxumState<AppState>) -> Response {
    let store_available: bool = app_state.store_available().await;
    let status: &str = if store_available { "ok" } else { "degraded" };
    let mut response: Response = Json(HealthResponse {
        status: status.to_string(),
        store_available,
    })
    .into_response();
    if !store_available {
        warn!("Ledger store unreachable, responding in fallback mode");
        response
            .headers_mut()
            .insert(FALLBACK_MODE_HEADER, HeaderValue::from_static("true"));
    }
    response
}

/// Handler for GET `/api/connection-status`.
async fn handle_connection_status(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<StoreStatusResponse>, HttpError> {
    let status: StoreStatusResponse = app_state
        .run(|store| Ok(store_status(store)))
        .await?;
    Ok(Json(status))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/api/connection-status", get(handle_connection_status))
        .route(
            "/api/employees",
            get(handle_list_employees).post(handle_add_employee),
        )
        .route(
            "/api/employees/{id}",
            get(handle_get_employee)
                .put(handle_update_employee)
                .delete(handle_delete_employee),
        )
        .route(
            "/api/employees/{id}/attendance",
            get(handle_list_attendance).post(handle_mark_attendance),
        )
        .route(
            "/api/employees/{id}/transactions",
            get(handle_list_transactions).post(handle_apply_transaction),
        )
        .route("/api/employees/{id}/settle", post(handle_settle_account))
        .route("/api/reports/attendance", get(handle_attendance_report))
        .route(
            "/api/reports/financial-summary",
            get(handle_financial_summary),
        )
        .route("/api/reports/today-payouts", get(handle_today_payouts))
        .with_state(app_state)
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Staff Ledger Server");

    let store: LedgerStore = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        let config: StoreConfig = StoreConfig {
            pool_size: args.pool_size,
            busy_timeout: Duration::from_millis(args.busy_timeout_ms),
            ..StoreConfig::default()
        };
        LedgerStore::open_file(db_path, &config)?
    } else {
        info!("Using in-memory database");
        LedgerStore::open_in_memory()?
    };

    let app_state: AppState = AppState {
        store,
        utc_offset: UtcOffset::from_hms(args.utc_offset_hours, 0, 0)?,
        fixed_today: None,
    };

    let app: Router = build_router(app_state);

    let addr: SocketAddr = SocketAddr::new(args.bind, args.port);
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
