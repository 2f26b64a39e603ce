//! Integration tests for the Argus wait handlers.
//!
//! A mocked API client serves a fixed instance status or job list, or fails
//! every request with HTTP 500.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use resource_wait::{CancellationToken, WaitError};
use resource_wait_argus::{
    create_instance_wait_handler, create_scrape_config_wait_handler, delete_instance_wait_handler,
    delete_scrape_config_wait_handler, update_instance_wait_handler, ApiError, ArgusApi,
    InstanceResponse, Job, ScrapeConfigsResponse, CREATE_FAILED, CREATE_SUCCEEDED, DELETE_FAILED,
    DELETE_SUCCEEDED, INSTANCE_DELETE_TIMEOUT, INSTANCE_PROVISION_TIMEOUT, SCRAPE_CONFIG_TIMEOUT,
    UPDATE_FAILED, UPDATE_SUCCEEDED,
};
use rstest::rstest;

const TEST_TIMEOUT: Duration = Duration::from_millis(10);

#[derive(Default)]
struct ApiClientMocked {
    get_fails: bool,
    resource_state: Option<String>,
    jobs: Vec<Job>,
    calls: AtomicUsize,
}

impl ApiClientMocked {
    fn with_state(get_fails: bool, resource_state: Option<&str>) -> Arc<Self> {
        Arc::new(Self {
            get_fails,
            resource_state: resource_state.map(str::to_string),
            ..Default::default()
        })
    }

    fn with_jobs(get_fails: bool, job_names: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            get_fails,
            jobs: job_names.iter().map(|name| Job::named(*name)).collect(),
            ..Default::default()
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ArgusApi for ApiClientMocked {
    async fn get_instance(
        &self,
        _instance_id: &str,
        _project_id: &str,
    ) -> Result<InstanceResponse, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.get_fails {
            return Err(ApiError::new(500, "internal server error"));
        }
        Ok(InstanceResponse {
            id: Some("iid".to_string()),
            status: self.resource_state.clone(),
            ..Default::default()
        })
    }

    async fn get_scrape_configs(
        &self,
        _instance_id: &str,
        _project_id: &str,
    ) -> Result<ScrapeConfigsResponse, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.get_fails {
            return Err(ApiError::new(500, "internal server error"));
        }
        Ok(ScrapeConfigsResponse {
            data: Some(self.jobs.clone()),
            ..Default::default()
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    Success,
    Failed,
    Transport,
    Malformed,
    Timeout,
}

fn check_outcome<T: std::fmt::Debug>(result: Result<T, WaitError>, expect: Expect) -> Option<T> {
    match (result, expect) {
        (Ok(value), Expect::Success) => Some(value),
        (Err(WaitError::OperationFailed { .. }), Expect::Failed)
        | (Err(WaitError::TransportFailure(_)), Expect::Transport)
        | (Err(WaitError::MalformedResponse { .. }), Expect::Malformed)
        | (Err(WaitError::Timeout(_)), Expect::Timeout) => None,
        (other, expect) => panic!("expected {expect:?}, got {other:?}"),
    }
}

#[rstest]
#[case::create_succeeded(false, Some(CREATE_SUCCEEDED), Expect::Success)]
#[case::create_failed(false, Some(CREATE_FAILED), Expect::Failed)]
#[case::get_fails(true, Some(""), Expect::Transport)]
#[case::broken_response(false, None, Expect::Malformed)]
#[case::timeout(false, Some("ANOTHER STATE"), Expect::Timeout)]
#[tokio::test(start_paused = true)]
async fn create_instance_wait_handler_cases(
    #[case] get_fails: bool,
    #[case] resource_state: Option<&str>,
    #[case] expect: Expect,
) {
    let api = ApiClientMocked::with_state(get_fails, resource_state);

    let result = create_instance_wait_handler(api.clone(), "iid", "pid")
        .timeout(TEST_TIMEOUT)
        .build()
        .expect("config is valid")
        .wait_until_done()
        .await;

    if let Some(got) = check_outcome(result, expect) {
        assert_eq!(
            got,
            InstanceResponse {
                id: Some("iid".to_string()),
                status: resource_state.map(str::to_string),
                ..Default::default()
            }
        );
    }
    if expect != Expect::Timeout {
        assert_eq!(api.calls(), 1);
    }
}

#[rstest]
#[case::update_succeeded(false, Some(UPDATE_SUCCEEDED), Expect::Success)]
#[case::update_failed(false, Some(UPDATE_FAILED), Expect::Failed)]
#[case::get_fails(true, Some(""), Expect::Transport)]
#[case::broken_response(false, None, Expect::Malformed)]
#[case::timeout(false, Some("ANOTHER STATE"), Expect::Timeout)]
#[case::create_token_is_not_update(false, Some(CREATE_SUCCEEDED), Expect::Timeout)]
#[tokio::test(start_paused = true)]
async fn update_instance_wait_handler_cases(
    #[case] get_fails: bool,
    #[case] resource_state: Option<&str>,
    #[case] expect: Expect,
) {
    let api = ApiClientMocked::with_state(get_fails, resource_state);

    let result = update_instance_wait_handler(api, "iid", "pid")
        .timeout(TEST_TIMEOUT)
        .build()
        .expect("config is valid")
        .wait_until_done()
        .await;

    if let Some(got) = check_outcome(result, expect) {
        assert_eq!(got.id.as_deref(), Some("iid"));
        assert_eq!(got.status.as_deref(), resource_state);
    }
}

#[rstest]
#[case::delete_succeeded(false, Some(DELETE_SUCCEEDED), Expect::Success)]
#[case::delete_failed(false, Some(DELETE_FAILED), Expect::Failed)]
#[case::get_fails(true, Some(""), Expect::Transport)]
#[case::broken_response(false, None, Expect::Malformed)]
#[case::timeout(false, Some("ANOTHER STATE"), Expect::Timeout)]
#[tokio::test(start_paused = true)]
async fn delete_instance_wait_handler_cases(
    #[case] get_fails: bool,
    #[case] resource_state: Option<&str>,
    #[case] expect: Expect,
) {
    let api = ApiClientMocked::with_state(get_fails, resource_state);

    let result = delete_instance_wait_handler(api, "iid", "pid")
        .timeout(TEST_TIMEOUT)
        .build()
        .expect("config is valid")
        .wait_until_done()
        .await;

    if let Some(got) = check_outcome(result, expect) {
        assert_eq!(got.status.as_deref(), Some(DELETE_SUCCEEDED));
    }
}

#[rstest]
#[case::create_succeeded(false, &["job", "other-job"], Expect::Success)]
#[case::create_failed_and_timeout(false, &["other-job"], Expect::Timeout)]
#[case::get_fails(true, &[], Expect::Transport)]
#[tokio::test(start_paused = true)]
async fn create_scrape_config_wait_handler_cases(
    #[case] get_fails: bool,
    #[case] job_names: &[&str],
    #[case] expect: Expect,
) {
    let api = ApiClientMocked::with_jobs(get_fails, job_names);

    let result = create_scrape_config_wait_handler(api.clone(), "", "job", "")
        .timeout(TEST_TIMEOUT)
        .build()
        .expect("config is valid")
        .wait_until_done()
        .await;

    if let Some(got) = check_outcome(result, expect) {
        assert_eq!(got.data, Some(api.jobs.clone()));
    }
}

#[rstest]
#[case::delete_succeeded(false, &["other-job"], Expect::Success)]
#[case::delete_succeeded_empty_list(false, &[], Expect::Success)]
#[case::timeout(false, &["job"], Expect::Timeout)]
#[case::get_fails(true, &[], Expect::Transport)]
#[tokio::test(start_paused = true)]
async fn delete_scrape_config_wait_handler_cases(
    #[case] get_fails: bool,
    #[case] job_names: &[&str],
    #[case] expect: Expect,
) {
    let api = ApiClientMocked::with_jobs(get_fails, job_names);

    let result = delete_scrape_config_wait_handler(api.clone(), "", "job", "")
        .timeout(TEST_TIMEOUT)
        .build()
        .expect("config is valid")
        .wait_until_done()
        .await;

    if let Some(got) = check_outcome(result, expect) {
        assert_eq!(got.data, Some(api.jobs.clone()));
    }
}

#[test]
fn factories_preset_operation_timeouts() {
    let api = ApiClientMocked::with_state(false, None);

    let create = create_instance_wait_handler(api.clone(), "iid", "pid");
    let update = update_instance_wait_handler(api.clone(), "iid", "pid");
    let delete = delete_instance_wait_handler(api.clone(), "iid", "pid");
    let scrape = create_scrape_config_wait_handler(api.clone(), "iid", "job", "pid");
    let unscrape = delete_scrape_config_wait_handler(api, "iid", "job", "pid");

    assert_eq!(create.current_config().timeout, INSTANCE_PROVISION_TIMEOUT);
    assert_eq!(update.current_config().timeout, INSTANCE_PROVISION_TIMEOUT);
    assert_eq!(delete.current_config().timeout, INSTANCE_DELETE_TIMEOUT);
    assert_eq!(scrape.current_config().timeout, SCRAPE_CONFIG_TIMEOUT);
    assert_eq!(unscrape.current_config().timeout, SCRAPE_CONFIG_TIMEOUT);
}

#[test_log::test(tokio::test(start_paused = true))]
async fn transport_error_keeps_api_error_as_source() {
    let api = ApiClientMocked::with_state(true, None);

    let err = create_instance_wait_handler(api, "iid", "pid")
        .build()
        .expect("config is valid")
        .wait_until_done()
        .await
        .expect_err("wait should fail");

    let source = match err {
        WaitError::TransportFailure(source) => source,
        other => panic!("expected transport failure, got {other:?}"),
    };
    let api_error = source
        .downcast_ref::<ApiError>()
        .expect("source should be the API error");
    assert_eq!(api_error.status_code, 500);
}

#[tokio::test(start_paused = true)]
async fn works_with_trait_object_client() {
    let api: Arc<dyn ArgusApi> = ApiClientMocked::with_jobs(false, &["job"]);

    let response = create_scrape_config_wait_handler(api, "iid", "job", "pid")
        .build()
        .expect("config is valid")
        .wait(&CancellationToken::new())
        .await
        .expect("wait should succeed");

    assert!(response.contains_job("job"));
}

#[tokio::test(start_paused = true)]
async fn cancelled_wait_stops_polling() {
    let api = ApiClientMocked::with_state(false, Some("CREATING"));
    let cancel = CancellationToken::new();

    let handler = create_instance_wait_handler(api.clone(), "iid", "pid")
        .poll_interval(Duration::from_secs(5))
        .build()
        .expect("config is valid");

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(12)).await;
        trigger.cancel();
    });

    let err = handler.wait(&cancel).await.expect_err("wait should be cancelled");
    assert!(err.is_cancelled());
    // polls at t = 0, 5, 10
    assert_eq!(api.calls(), 3);
}
