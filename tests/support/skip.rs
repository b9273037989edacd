/// Skip a test if no live vault is configured.
#[macro_export]
macro_rules! skip_without_azure {
    () => {
        if std::env::var("KVSECRETS_TEST_VAULT").is_err() {
            eprintln!("SKIPPED: KVSECRETS_TEST_VAULT not set (set to a key vault name)");
            return;
        }
        if std::env::var("KVSECRETS_TEST_TOKEN").is_err() {
            eprintln!("SKIPPED: KVSECRETS_TEST_TOKEN not set (az account get-access-token --resource https://vault.azure.net)");
            return;
        }
    };
}
