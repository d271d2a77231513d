use drydock_deploy::client::{DeployError, KubectlClient, PreflightError, RolloutStatus};
use drydock_deploy::executor::KubectlExecutor;
use drydock_deploy::kubectl::KubectlError;
use mockall::mock;

mock! {
    Executor {}

    impl KubectlExecutor for Executor {
        async fn exec(&self, args: &[String]) -> Result<String, KubectlError>;
        async fn exec_streaming(&self, args: &[String]) -> Result<(), KubectlError>;
    }
}

// ── Availability ──

#[tokio::test]
async fn check_available_returns_first_version_line() {
    let mut mock = MockExecutor::new();
    mock.expect_exec()
        .withf(|args| args.contains(&"version".to_owned()) && args.contains(&"--client".to_owned()))
        .returning(|_| Ok("Client Version: v1.31.0\nKustomize Version: v5.4.2\n".to_owned()));

    let client = KubectlClient::with_executor(mock);
    assert_eq!(
        client.check_available().await.unwrap(),
        "Client Version: v1.31.0"
    );
}

#[tokio::test]
async fn check_available_maps_missing_cli_to_preflight_error() {
    let mut mock = MockExecutor::new();
    mock.expect_exec().returning(|_| {
        Err(KubectlError::NotFound {
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        })
    });

    let client = KubectlClient::with_executor(mock);
    let result = client.check_available().await;

    assert!(matches!(result, Err(PreflightError::KubectlNotAvailable)));
}

// ── Set image ──

#[tokio::test]
async fn set_image_addresses_the_deployment_and_namespace() {
    let mut mock = MockExecutor::new();
    mock.expect_exec()
        .withf(|args| {
            args[0] == "set"
                && args[1] == "image"
                && args[2] == "deployment/api-server"
                && args[3] == "api-server=registry.test/acme/api:20260101-000000"
                && args[4] == "--namespace"
                && args[5] == "staging"
        })
        .times(1)
        .returning(|_| Ok("deployment.apps/api-server image updated\n".to_owned()));

    let client = KubectlClient::with_executor(mock);
    client
        .set_image(
            "api-server",
            "registry.test/acme/api:20260101-000000",
            "staging",
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn set_image_failure_names_the_deployment() {
    let mut mock = MockExecutor::new();
    mock.expect_exec().returning(|args| {
        Err(KubectlError::CommandFailed {
            args: args.to_vec(),
            stderr: "deployments.apps \"api-server\" not found".to_owned(),
        })
    });

    let client = KubectlClient::with_executor(mock);
    let err = client
        .set_image("api-server", "registry.test/acme/api:t1", "default")
        .await
        .unwrap_err();

    assert!(matches!(err, DeployError::Apply { .. }));
    assert!(err.to_string().contains("api-server"));
}

// ── Rollout wait ──

#[tokio::test]
async fn rollout_converged_when_kubectl_exits_cleanly() {
    let mut mock = MockExecutor::new();
    mock.expect_exec_streaming()
        .withf(|args| {
            args[0] == "rollout"
                && args[1] == "status"
                && args[2] == "deployment/api-server"
                && args.contains(&"--timeout=120s".to_owned())
        })
        .returning(|_| Ok(()));

    let client = KubectlClient::with_executor(mock);
    let status = client
        .rollout_status("api-server", "default", 120)
        .await
        .unwrap();

    assert_eq!(status, RolloutStatus::Converged);
}

#[tokio::test]
async fn rollout_running_out_of_budget_is_not_an_error() {
    let mut mock = MockExecutor::new();
    mock.expect_exec_streaming().returning(|args| {
        Err(KubectlError::CommandFailed {
            args: args.to_vec(),
            stderr: "error: timed out waiting for the condition".to_owned(),
        })
    });

    let client = KubectlClient::with_executor(mock);
    let status = client
        .rollout_status("api-server", "default", 5)
        .await
        .unwrap();

    assert_eq!(status, RolloutStatus::TimedOut);
}

#[tokio::test]
async fn rollout_with_missing_cli_is_an_error() {
    let mut mock = MockExecutor::new();
    mock.expect_exec_streaming().returning(|_| {
        Err(KubectlError::NotFound {
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        })
    });

    let client = KubectlClient::with_executor(mock);
    let result = client.rollout_status("api-server", "default", 5).await;

    assert!(matches!(result, Err(DeployError::Apply { .. })));
}
