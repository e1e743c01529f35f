//! In-process fake of the directory API for screen tests

use async_trait::async_trait;
use parking_lot::Mutex;
use shared::{
    EmployeeListResponse, EmployeeRecord, FilterOptions, ListQuery, LoginRequest, LoginResponse,
    PaginationData, RegisterRequest, RegisterResponse,
};
use staff_client::{ClientError, ClientResult, DirectoryApi};
use std::time::Duration;

/// `rows` employees on page `current` of `pages`
pub fn page_of(rows: usize, current: u32, limit: u32, total: u64, pages: u32) -> EmployeeListResponse {
    EmployeeListResponse {
        employee_data: (0..rows)
            .map(|i| EmployeeRecord::new(format!("Employee {i}"), "Active", "Dev", "Ops", "User"))
            .collect(),
        pagination_data: PaginationData {
            current_page: current,
            limit,
            total,
            num_of_pages: pages,
        },
    }
}

// ClientError carries a reqwest::Error and is not Clone
fn replay_error(error: &ClientError) -> ClientError {
    match error {
        ClientError::Unauthorized => ClientError::Unauthorized,
        ClientError::Api { status, message } => ClientError::Api {
            status: *status,
            message: message.clone(),
        },
        other => ClientError::InvalidResponse(other.to_string()),
    }
}

fn replay<T: Clone>(result: &ClientResult<T>) -> ClientResult<T> {
    match result {
        Ok(value) => Ok(value.clone()),
        Err(e) => Err(replay_error(e)),
    }
}

/// Records every call and answers with configurable canned results
pub struct FakeApi {
    list_response: Mutex<ClientResult<EmployeeListResponse>>,
    list_delay: Mutex<Duration>,
    list_calls: Mutex<Vec<ListQuery>>,
    options_response: Mutex<ClientResult<FilterOptions>>,
    options_calls: Mutex<usize>,
    login_response: Mutex<ClientResult<LoginResponse>>,
    login_calls: Mutex<Vec<LoginRequest>>,
    register_response: Mutex<ClientResult<RegisterResponse>>,
    register_calls: Mutex<Vec<RegisterRequest>>,
}

impl FakeApi {
    pub fn with_page(page: EmployeeListResponse) -> Self {
        Self {
            list_response: Mutex::new(Ok(page)),
            list_delay: Mutex::new(Duration::ZERO),
            list_calls: Mutex::new(Vec::new()),
            options_response: Mutex::new(Ok(FilterOptions {
                designation: vec!["Dev".into(), "Lead".into()],
                department: vec!["Ops".into(), "R&D".into()],
            })),
            options_calls: Mutex::new(0),
            login_response: Mutex::new(Ok(LoginResponse {
                access_token: "token-123".into(),
            })),
            login_calls: Mutex::new(Vec::new()),
            register_response: Mutex::new(Ok(RegisterResponse::default())),
            register_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn new() -> Self {
        Self::with_page(page_of(0, 1, 8, 0, 0))
    }

    pub fn set_response(&self, response: ClientResult<EmployeeListResponse>) {
        *self.list_response.lock() = response;
    }

    /// Delay applied to list calls started from now on
    pub fn set_delay(&self, delay: Duration) {
        *self.list_delay.lock() = delay;
    }

    pub fn set_options(&self, response: ClientResult<FilterOptions>) {
        *self.options_response.lock() = response;
    }

    pub fn set_login(&self, response: ClientResult<LoginResponse>) {
        *self.login_response.lock() = response;
    }

    pub fn set_register(&self, response: ClientResult<RegisterResponse>) {
        *self.register_response.lock() = response;
    }

    pub fn list_calls(&self) -> Vec<ListQuery> {
        self.list_calls.lock().clone()
    }

    pub fn options_calls(&self) -> usize {
        *self.options_calls.lock()
    }

    pub fn login_calls(&self) -> Vec<LoginRequest> {
        self.login_calls.lock().clone()
    }

    pub fn register_calls(&self) -> Vec<RegisterRequest> {
        self.register_calls.lock().clone()
    }
}

#[async_trait]
impl DirectoryApi for FakeApi {
    async fn list_employees(&self, query: &ListQuery) -> ClientResult<EmployeeListResponse> {
        self.list_calls.lock().push(query.clone());
        // Answer is fixed when the call starts, like a real request
        let response = replay(&self.list_response.lock());
        let delay = *self.list_delay.lock();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        response
    }

    async fn filter_options(&self) -> ClientResult<FilterOptions> {
        *self.options_calls.lock() += 1;
        replay(&self.options_response.lock())
    }

    async fn login(&self, request: &LoginRequest) -> ClientResult<LoginResponse> {
        self.login_calls.lock().push(request.clone());
        replay(&self.login_response.lock())
    }

    async fn register(&self, request: &RegisterRequest) -> ClientResult<RegisterResponse> {
        self.register_calls.lock().push(request.clone());
        replay(&self.register_response.lock())
    }
}
