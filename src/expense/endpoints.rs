//! Route handlers for creating, updating, getting and listing expenses.

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};

use crate::{
    AppState, Error,
    expense::{Expense, ExpenseData, ExpenseId, ExpenseService},
};

/// Handle `POST /expenses`, responding with 201 and the created expense.
pub async fn create_expense_endpoint<S: ExpenseService>(
    State(state): State<AppState<S>>,
    payload: Result<Json<ExpenseData>, JsonRejection>,
) -> Result<(StatusCode, Json<Expense>), Error> {
    let data = parse_body(payload)?;
    data.validate()?;

    let expense = state.expense_service.save(data).await?;

    Ok((StatusCode::CREATED, Json(expense)))
}

/// Handle `PUT /expenses/{expense_id}`, responding with the updated expense.
///
/// The ID is checked before the body, and the body before the expense rules.
pub async fn update_expense_endpoint<S: ExpenseService>(
    State(state): State<AppState<S>>,
    expense_id: Result<Path<ExpenseId>, PathRejection>,
    payload: Result<Json<ExpenseData>, JsonRejection>,
) -> Result<Json<Expense>, Error> {
    let expense_id = parse_expense_id(expense_id)?;
    let data = parse_body(payload)?;
    data.validate()?;

    let expense = state.expense_service.update(expense_id, data).await?;

    Ok(Json(expense))
}

/// Handle `GET /expenses/{expense_id}`.
pub async fn get_expense_endpoint<S: ExpenseService>(
    State(state): State<AppState<S>>,
    expense_id: Result<Path<ExpenseId>, PathRejection>,
) -> Result<Json<Expense>, Error> {
    let expense_id = parse_expense_id(expense_id)?;

    let expense = state.expense_service.get_by_id(expense_id).await?;

    Ok(Json(expense))
}

/// Handle `GET /expenses`, responding with all expenses newest first.
pub async fn list_expenses_endpoint<S: ExpenseService>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<Expense>>, Error> {
    let expenses = state.expense_service.list().await?;

    Ok(Json(expenses))
}

fn parse_expense_id(expense_id: Result<Path<ExpenseId>, PathRejection>) -> Result<ExpenseId, Error> {
    expense_id
        .map(|Path(expense_id)| expense_id)
        .map_err(|rejection| {
            tracing::debug!("Rejected expense ID: {rejection}");
            Error::InvalidParams
        })
}

fn parse_body(payload: Result<Json<ExpenseData>, JsonRejection>) -> Result<ExpenseData, Error> {
    payload.map(|Json(data)| data).map_err(|rejection| {
        tracing::debug!("Rejected request body: {rejection}");
        Error::InvalidRequestBody
    })
}


#[cfg(test)]
mod internal_error_tests {
    use axum::{
        Router,
        http::StatusCode,
        routing::{get, post},
    };
    use axum_test::TestServer;
    use serde_json::json;

    use crate::{
        AppState, Error,
        endpoints::{self, format_endpoint},
        error::INTERNAL_SERVER_ERROR_MESSAGE,
        expense::{
            Expense, ExpenseData, ExpenseId, ExpenseService, create_expense_endpoint,
            get_expense_endpoint, list_expenses_endpoint, update_expense_endpoint,
        },
    };

    /// An expense service where every operation fails as if the database were unreachable.
    #[derive(Debug, Clone)]
    struct UnreachableExpenseService;

    fn store_unreachable(operation: &str) -> Error {
        Error::SqlError(rusqlite::Error::InvalidQuery).context(operation)
    }

    impl ExpenseService for UnreachableExpenseService {
        async fn save(&self, _data: ExpenseData) -> Result<Expense, Error> {
            Err(store_unreachable("create_expense()"))
        }

        async fn update(&self, id: ExpenseId, _data: ExpenseData) -> Result<Expense, Error> {
            Err(store_unreachable(&format!("get_expense({id})")))
        }

        async fn get_by_id(&self, id: ExpenseId) -> Result<Expense, Error> {
            Err(store_unreachable(&format!("get_expense({id})")))
        }

        async fn list(&self) -> Result<Vec<Expense>, Error> {
            Err(store_unreachable("get_all_expenses()"))
        }
    }

    fn get_test_server() -> TestServer {
        let state = AppState {
            expense_service: UnreachableExpenseService,
        };

        let app = Router::new()
            .route(
                endpoints::EXPENSES,
                post(create_expense_endpoint::<UnreachableExpenseService>)
                    .get(list_expenses_endpoint::<UnreachableExpenseService>),
            )
            .route(
                endpoints::EXPENSE,
                get(get_expense_endpoint::<UnreachableExpenseService>)
                    .put(update_expense_endpoint::<UnreachableExpenseService>),
            )
            .with_state(state);

        TestServer::new(app).expect("Could not create test server.")
    }

    fn internal_server_error_body() -> String {
        format!(r#"{{"code":500,"message":"{INTERNAL_SERVER_ERROR_MESSAGE}"}}"#)
    }

    #[tokio::test]
    async fn create_expense_hides_store_error() {
        let server = get_test_server();

        let response = server
            .post(endpoints::EXPENSES)
            .json(&json!({"amount": 30, "title": "add-title", "note": "", "tags": []}))
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.text(), internal_server_error_body());
    }

    #[tokio::test]
    async fn update_expense_hides_store_error() {
        let server = get_test_server();

        let response = server
            .put(&format_endpoint(endpoints::EXPENSE, 1))
            .json(&json!({"amount": 30, "title": "update-title", "note": "", "tags": []}))
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.text(), internal_server_error_body());
    }

    #[tokio::test]
    async fn get_expense_hides_store_error() {
        let server = get_test_server();

        let response = server.get(&format_endpoint(endpoints::EXPENSE, 1)).await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.text(), internal_server_error_body());
    }

    #[tokio::test]
    async fn list_expenses_hides_store_error() {
        let server = get_test_server();

        let response = server.get(endpoints::EXPENSES).await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.text(), internal_server_error_body());
    }
}
