//! Connection string format of ready emulators.

use super::test_utils::ScriptedRuntime;
use cosmos_testcontainer::container::ContainerBuilder;
use cosmos_testcontainer::cosmos::EMULATOR_ACCOUNT_KEY;
use cosmos_testcontainer::runtime::ContainerRuntime;
use cosmos_testcontainer::CosmosDbBuilder;
use std::sync::Arc;

#[tokio::test(start_paused = true)]
async fn test_connection_string_exact_format() {
    let runtime: Arc<dyn ContainerRuntime> = Arc::new(ScriptedRuntime::ready_after(1));
    let container = CosmosDbBuilder::with_account_key("K")
        .with_port(8081)
        .build(runtime)
        .await
        .unwrap();

    assert_eq!(container.hostname(), "localhost");
    assert_eq!(
        container.connection_string(),
        "AccountEndpoint=https://localhost:8081;AccountKey=K"
    );
}

#[tokio::test(start_paused = true)]
async fn test_default_connection_string_uses_emulator_key() {
    let runtime: Arc<dyn ContainerRuntime> = Arc::new(ScriptedRuntime::ready_after(1));
    let container = CosmosDbBuilder::new().build(runtime).await.unwrap();

    assert_eq!(
        container.connection_string(),
        format!(
            "AccountEndpoint=https://localhost:8081;AccountKey={}",
            EMULATOR_ACCOUNT_KEY
        )
    );
}

#[tokio::test(start_paused = true)]
async fn test_connection_string_follows_remapped_host_port() {
    let runtime: Arc<dyn ContainerRuntime> = Arc::new(ScriptedRuntime::ready_after(1));
    let container = CosmosDbBuilder::with_account_key("K")
        .with_port(8081)
        .with_port_binding(8081, 18081)
        .build(runtime)
        .await
        .unwrap();

    assert_eq!(
        container.connection_string(),
        "AccountEndpoint=https://localhost:18081;AccountKey=K"
    );
}
