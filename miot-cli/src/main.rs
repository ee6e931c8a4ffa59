use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use miot_sdk::{
    AccessMode, DeviceId, MemoryStore, MiotOpenHome, RegionTable, SpecCacheConfig,
    DEFAULT_REGISTRY_URL,
};
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// MIoT OpenHome command line client
///
/// Resolves device ids to MIoT property ids using a cache snapshot and the
/// public spec registry, then reads the properties from the OpenHome cloud.
#[derive(Parser, Debug)]
#[command(name = "miot-cli")]
#[command(about = "Read MIoT device properties through the OpenHome cloud API")]
#[command(version)]
pub struct Args {
    /// OpenHome application id
    #[arg(long, default_value = "")]
    pub app_id: String,

    /// OpenHome access token
    #[arg(long, default_value = "")]
    pub access_token: String,

    /// Cache snapshot file (JSON hash-of-hashes) backing the device type and spec caches.
    /// Created if missing and rewritten after every run.
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Spec registry instance endpoint
    #[arg(long, default_value = DEFAULT_REGISTRY_URL)]
    pub registry_url: String,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Read all readable properties of the given devices
    Query {
        /// Cloud region (cn, us, sg, de, ru, in)
        #[arg(short, long, default_value = "cn")]
        region: String,

        /// Device ids
        #[arg(required = true)]
        dids: Vec<String>,
    },

    /// Print the property ids of the given devices without calling the API
    Pids {
        /// Access mode to filter on (read, write, notify)
        #[arg(short, long, default_value = "read")]
        access: AccessMode,

        /// Device ids
        #[arg(required = true)]
        dids: Vec<String>,
    },
}

impl Args {
    /// Validate command line arguments
    pub fn validate(&self) -> Result<()> {
        match self.log_level.to_lowercase().as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => {}
            _ => {
                return Err(anyhow::anyhow!(
                    "Invalid log level '{}'. Valid levels: error, warn, info, debug, trace",
                    self.log_level
                ));
            }
        }

        if let Command::Query { region, .. } = &self.command {
            let regions = RegionTable::default();
            if regions.host(region).is_none() {
                let known: Vec<&str> = regions.regions().collect();
                return Err(anyhow::anyhow!(
                    "Unknown region '{}'. Valid regions: {}",
                    region,
                    known.join(", ")
                ));
            }

            if self.app_id.is_empty() || self.access_token.is_empty() {
                return Err(anyhow::anyhow!(
                    "query requires --app-id and --access-token \
                     (or MIOT_APP_ID / MIOT_ACCESS_TOKEN)"
                ));
            }
        }

        Ok(())
    }

    /// Apply `MIOT_*` environment overrides
    pub fn apply_env(&mut self) {
        if let Ok(app_id) = std::env::var("MIOT_APP_ID") {
            self.app_id = app_id;
        }

        if let Ok(token) = std::env::var("MIOT_ACCESS_TOKEN") {
            self.access_token = token;
        }

        if let Ok(snapshot) = std::env::var("MIOT_SNAPSHOT") {
            self.snapshot = Some(PathBuf::from(snapshot));
        }

        if let Ok(log_level) = std::env::var("MIOT_LOG_LEVEL") {
            self.log_level = log_level;
        }

        if let Ok(region) = std::env::var("MIOT_REGION") {
            if let Command::Query { region: current, .. } = &mut self.command {
                *current = region;
            }
        }
    }
}

/// Create configuration from command line arguments and environment variables
fn load_args() -> Result<Args> {
    let mut args = Args::parse();
    args.apply_env();
    args.validate()?;
    Ok(args)
}

/// Initialize tracing/logging with the specified log level
fn init_tracing(log_level: &str) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level.to_lowercase())),
        )
        .init();
}

fn load_store(path: &Path) -> Result<MemoryStore> {
    if !path.exists() {
        debug!(path = %path.display(), "no cache snapshot yet, starting empty");
        return Ok(MemoryStore::new());
    }

    debug!(path = %path.display(), "loading cache snapshot");
    MemoryStore::from_snapshot_file(path).context("Failed to load cache snapshot")
}

fn save_store(store: &MemoryStore, path: &Path) -> Result<()> {
    let json = store.snapshot_json().context("Failed to serialize cache snapshot")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write cache snapshot {}", path.display()))?;
    debug!(path = %path.display(), "cache snapshot saved");
    Ok(())
}

fn build_client(args: &Args, store: &MemoryStore) -> Result<MiotOpenHome> {
    // `pids` never calls the API, so placeholder credentials are fine there.
    let app_id = if args.app_id.is_empty() { "-" } else { args.app_id.as_str() };
    let token = if args.access_token.is_empty() { "-" } else { args.access_token.as_str() };

    MiotOpenHome::builder()
        .credentials(app_id, token)
        .store(Arc::new(store.clone()))
        .cache_config(SpecCacheConfig::default().with_registry_url(args.registry_url.as_str()))
        .build()
        .context("Failed to create MIoT client")
}

fn to_device_ids(dids: &[String]) -> Vec<DeviceId> {
    dids.iter().map(|d| DeviceId::new(d.as_str())).collect()
}

fn execute(client: &MiotOpenHome, command: &Command) -> Result<()> {
    match command {
        Command::Query { region, dids } => {
            info!(region = %region, devices = dids.len(), "querying properties");
            let response = client
                .query(region, &to_device_ids(dids))
                .context("Property query failed")?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Command::Pids { access, dids } => {
            let pids = client
                .resolve_pids(&to_device_ids(dids), *access)
                .context("Property id resolution failed")?;
            for pid in pids {
                println!("{}", pid);
            }
        }
    }

    Ok(())
}

fn run(args: Args) -> Result<()> {
    let store = match &args.snapshot {
        Some(path) => load_store(path)?,
        None => MemoryStore::new(),
    };
    let client = build_client(&args, &store)?;

    let result = execute(&client, &args.command);

    // Specs fetched before a failing API call are still worth keeping.
    if let Some(path) = &args.snapshot {
        save_store(&store, path)?;
    }

    result
}

fn main() -> Result<()> {
    let args = load_args()?;
    init_tracing(&args.log_level);
    run(args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use miot_sdk::CacheStore;
    use mockito::{Matcher, Server};
    use rstest::rstest;
    use std::sync::Mutex;

    // Serializes the tests that mutate MIOT_* variables.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const ENV_VARS: [&str; 5] = [
        "MIOT_APP_ID",
        "MIOT_ACCESS_TOKEN",
        "MIOT_SNAPSHOT",
        "MIOT_LOG_LEVEL",
        "MIOT_REGION",
    ];

    const LIGHT: &str = "urn:miot-spec-v2:device:light:0000A001:yeelink-color1:1";

    fn temp_snapshot(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("miot-cli-{}-{}.json", std::process::id(), name))
    }

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).expect("arguments should parse")
    }

    #[test]
    fn test_query_defaults() {
        let args = parse(&[
            "miot-cli",
            "--app-id",
            "a",
            "--access-token",
            "t",
            "query",
            "123",
            "456",
        ]);
        match &args.command {
            Command::Query { region, dids } => {
                assert_eq!(region, "cn");
                assert_eq!(dids, &vec!["123".to_string(), "456".to_string()]);
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_pids_access_mode() {
        let args = parse(&["miot-cli", "pids", "--access", "notify", "123"]);
        assert!(matches!(args.command, Command::Pids { access: AccessMode::Notify, .. }));
        // pids does not need credentials
        assert!(args.validate().is_ok());
    }

    #[rstest]
    #[case(&["miot-cli", "--app-id", "a", "--access-token", "t", "query", "-r", "eu", "1"])]
    #[case(&["miot-cli", "query", "1"])]
    #[case(&["miot-cli", "--log-level", "loud", "pids", "1"])]
    fn test_invalid_arguments(#[case] argv: &[&str]) {
        assert!(parse(argv).validate().is_err());
    }

    #[test]
    fn test_rejects_unknown_access_mode() {
        assert!(Args::try_parse_from(["miot-cli", "pids", "--access", "execute", "1"]).is_err());
    }

    #[rstest]
    #[case(&["miot-cli", "query", "1"], Some("sg"))]
    #[case(&["miot-cli", "pids", "1"], None)]
    fn test_env_overrides(#[case] argv: &[&str], #[case] expected_region: Option<&str>) {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        std::env::set_var("MIOT_APP_ID", "env-app");
        std::env::set_var("MIOT_ACCESS_TOKEN", "env-token");
        std::env::set_var("MIOT_SNAPSHOT", "/tmp/miot-env.json");
        std::env::set_var("MIOT_LOG_LEVEL", "debug");
        std::env::set_var("MIOT_REGION", "sg");

        let mut args = parse(argv);
        args.apply_env();

        for var in ENV_VARS {
            std::env::remove_var(var);
        }

        assert_eq!(args.app_id, "env-app");
        assert_eq!(args.access_token, "env-token");
        assert_eq!(args.snapshot, Some(PathBuf::from("/tmp/miot-env.json")));
        assert_eq!(args.log_level, "debug");
        match (&args.command, expected_region) {
            (Command::Query { region, .. }, Some(expected)) => assert_eq!(region, expected),
            (Command::Pids { .. }, None) => {}
            (other, _) => panic!("unexpected command {:?}", other),
        }
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_registry_fetch_is_saved_to_snapshot() {
        let mut server = Server::new();
        let registry = server
            .mock("GET", "/miot-spec-v2/instance")
            .match_query(Matcher::UrlEncoded("type".into(), LIGHT.into()))
            .with_status(200)
            .with_body(
                r#"{"services": [{"iid": 2, "properties": [{"iid": 1, "access": ["read"]}]}]}"#,
            )
            .expect(1)
            .create();

        let path = temp_snapshot("registry-save");
        std::fs::write(&path, "{}").unwrap();
        let registry_url = format!("{}/miot-spec-v2/instance", server.url());
        let argv = [
            "miot-cli",
            "--snapshot",
            path.to_str().unwrap(),
            "--registry-url",
            registry_url.as_str(),
            "pids",
            "123",
        ];

        run(Args::try_parse_from(argv).unwrap()).unwrap();
        // Second run is served from the saved snapshot
        run(Args::try_parse_from(argv).unwrap()).unwrap();

        let saved = MemoryStore::from_snapshot_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert!(saved.hget("miot:instance:spec", LIGHT).unwrap().is_some());
        registry.assert();
    }

    #[test]
    fn test_missing_snapshot_is_created() {
        let mut server = Server::new();
        let _registry = server
            .mock("GET", "/miot-spec-v2/instance")
            .match_query(Matcher::Any)
            .with_status(503)
            .create();

        let path = temp_snapshot("created");
        let _ = std::fs::remove_file(&path);
        let registry_url = format!("{}/miot-spec-v2/instance", server.url());

        let result = run(
            Args::try_parse_from([
                "miot-cli",
                "--snapshot",
                path.to_str().unwrap(),
                "--registry-url",
                registry_url.as_str(),
                "pids",
                "123",
            ])
            .unwrap(),
        );

        assert!(result.is_err());
        let saved = MemoryStore::from_snapshot_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert!(saved.is_empty());
    }
}
