use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use regex::Regex;
use serde::Serialize;
use serde_json::{json, Value};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

/// Cap on the `cargo stylus` output kept in the deployments JSON.
const MAX_STORED_OUTPUT: usize = 16_000;

/// Deploy the wallet with `cargo stylus deploy`, passing its constructor arguments,
/// then upsert the result into a deployments JSON.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Directory of the Stylus contract crate (where `cargo stylus deploy` runs).
    #[arg(long, default_value = "src/autoexec-wallet")]
    contract_dir: PathBuf,

    /// RPC URL used by `cargo stylus deploy`.
    #[arg(long, env = "RPC_URL")]
    rpc_url: String,

    /// Path to a file containing the deployer private key.
    #[arg(long, env = "PRIV_KEY_PATH", conflicts_with = "private_key")]
    private_key_path: Option<String>,

    /// Private key (hex string, 0x...).
    #[arg(long, env = "PRIV_KEY", conflicts_with = "private_key_path")]
    private_key: Option<String>,

    /// Wallet owner passed to the constructor.
    #[arg(long, env = "WALLET_OWNER")]
    owner: String,

    /// Keep staged calls armed after they run instead of triggering them once.
    #[arg(long, env = "WALLET_REARM", default_value_t = false)]
    rearm: bool,

    /// Path to write deployment info (eg, deployments.devnet.json).
    #[arg(long, default_value = "deployments.devnet.json")]
    deployments_path: PathBuf,

    /// Key under `deployments` to store this contract.
    #[arg(long, default_value = "autoexec-wallet")]
    contract_key: String,

    /// Network name (eg, devnet, arb-sepolia).
    #[arg(long, default_value = "devnet")]
    network: String,

    /// Extra args passed through to `cargo stylus deploy` (after `--`), eg `-- --estimate-gas`.
    #[arg(last = true)]
    passthrough: Vec<String>,
}

/// Wallet constructor arguments, recorded next to the address.
#[derive(Debug, Serialize)]
struct ConstructorArgs<'a> {
    owner: &'a str,
    rearm: bool,
}

/// What a successful `cargo stylus deploy` run reported.
#[derive(Debug, PartialEq, Eq)]
struct DeployReport {
    address: String,
    tx_hashes: Vec<String>,
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let owner = parse_owner(&cli.owner)?;
    let raw_output = run_cargo_stylus_deploy(&cli, &owner)?;
    let report = parse_deploy_output(&raw_output)?;

    let existing = if cli.deployments_path.exists() {
        fs::read_to_string(&cli.deployments_path)
            .with_context(|| format!("failed reading {}", cli.deployments_path.display()))?
    } else {
        String::new()
    };
    let now = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string());
    let constructor = ConstructorArgs {
        owner: &owner,
        rearm: cli.rearm,
    };
    let entry = json!({
        "address": report.address,
        "rpc_url": cli.rpc_url,
        "deployed_at": now,
        "constructor": constructor,
        "tx_hashes": report.tx_hashes,
        "cargo_stylus_output": truncate_output(&raw_output),
    });
    let root = upsert_deployment(&existing, &cli.network, &cli.contract_key, entry, &now)
        .with_context(|| format!("failed parsing JSON in {}", cli.deployments_path.display()))?;
    write_json_atomic(&cli.deployments_path, &root)?;

    println!(
        "Deployed `{}` to {} (owner {}, {})",
        cli.contract_key,
        report.address,
        owner,
        if cli.rearm { "rearm" } else { "one-shot" }
    );
    Ok(())
}

/// Checks the owner is a non-zero 20-byte hex address; the constructor rejects zero.
fn parse_owner(raw: &str) -> Result<String> {
    let re = Regex::new(r"^0x[a-fA-F0-9]{40}$")?;
    let owner = raw.trim();
    if !re.is_match(owner) {
        bail!("--owner must be a 0x-prefixed 20-byte hex address, got `{owner}`");
    }
    if owner[2..].bytes().all(|b| b == b'0') {
        bail!("--owner must not be the zero address");
    }
    Ok(owner.to_string())
}

fn run_cargo_stylus_deploy(cli: &Cli, owner: &str) -> Result<String> {
    let mut cmd = Command::new("cargo");
    cmd.current_dir(&cli.contract_dir);
    cmd.arg("stylus").arg("deploy");
    cmd.arg("-e").arg(&cli.rpc_url);

    if let Some(ref pk_path) = cli.private_key_path {
        cmd.arg("--private-key-path").arg(pk_path);
    } else if let Some(ref pk) = cli.private_key {
        cmd.arg("--private-key").arg(pk);
    } else {
        return Err(anyhow!(
            "missing deployer key: provide --private-key-path or --private-key (or set PRIV_KEY_PATH/PRIV_KEY)"
        ));
    }

    cmd.arg("--constructor-args")
        .arg(owner)
        .arg(cli.rearm.to_string());
    cmd.args(&cli.passthrough);
    cmd.stdout(Stdio::piped()).stderr(Stdio::piped());

    let output = cmd
        .output()
        .context("failed to run `cargo stylus deploy`")?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    let combined = format!("{stdout}\n{stderr}");

    if !output.status.success() {
        return Err(anyhow!(
            "`cargo stylus deploy` failed (exit {}):\n{}",
            output.status,
            combined
        ));
    }
    Ok(combined)
}

/// Pulls the deployed address and tx hashes out of `cargo stylus deploy` output.
///
/// Older releases print `Deploying program to address 0x..` / `Confirmed tx 0x..`,
/// newer ones `deployed code at address: 0x..` / `deployment tx hash: 0x..`.
fn parse_deploy_output(output: &str) -> Result<DeployReport> {
    let re_address = Regex::new(
        r"(?:Deploying program to address|deployed code at address:?)\s+(0x[a-fA-F0-9]{40})",
    )?;
    let re_tx = Regex::new(r"(?:Confirmed tx|deployment tx hash:?)\s+(0x[a-fA-F0-9]{64})")?;

    let address = re_address
        .captures(output)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| anyhow!("could not parse deployed address from `cargo stylus deploy` output"))?;

    let mut tx_hashes: Vec<String> = Vec::new();
    for hash in re_tx.captures_iter(output).filter_map(|c| c.get(1)) {
        let hash = hash.as_str().to_string();
        if !tx_hashes.contains(&hash) {
            tx_hashes.push(hash);
        }
    }

    Ok(DeployReport { address, tx_hashes })
}

/// Inserts `entry` under `deployments[contract_key]`, keeping other contracts' entries.
fn upsert_deployment(
    existing: &str,
    network: &str,
    contract_key: &str,
    entry: Value,
    now: &str,
) -> Result<Value> {
    let mut root: Value = if existing.trim().is_empty() {
        json!({})
    } else {
        serde_json::from_str(existing)?
    };
    if !root.is_object() {
        root = json!({});
    }

    root["network"] = json!(network);
    root["updated_at"] = json!(now);
    if root.get("deployments").and_then(Value::as_object).is_none() {
        root["deployments"] = json!({});
    }
    root["deployments"][contract_key] = entry;
    Ok(root)
}

fn truncate_output(raw: &str) -> &str {
    let trimmed = raw.trim();
    if trimmed.len() <= MAX_STORED_OUTPUT {
        return trimmed;
    }
    let mut end = MAX_STORED_OUTPUT;
    while !trimmed.is_char_boundary(end) {
        end -= 1;
    }
    &trimmed[..end]
}

fn write_json_atomic(path: &Path, value: &Value) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if !parent.exists() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed creating directory {}", parent.display()))?;
    }

    let serialised =
        serde_json::to_string_pretty(value).context("failed serialising deployments JSON")?;
    let tmp_path = tmp_path_for(path);
    fs::write(&tmp_path, serialised.as_bytes())
        .with_context(|| format!("failed writing temp file {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("failed replacing {}", path.display()))?;
    Ok(())
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_os_string();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDR: &str = "0x5fbdb2315678afecb367f032d93f642f64180aa3";

    #[test]
    fn parses_legacy_and_current_output() {
        let tx = format!("0x{}", "ab".repeat(32));
        let legacy = format!("Deploying program to address {ADDR}\nConfirmed tx {tx}\n");
        let report = parse_deploy_output(&legacy).unwrap();
        assert_eq!(report.address, ADDR);
        assert_eq!(report.tx_hashes, vec![tx.clone()]);

        let current = format!("deployed code at address: {ADDR}\ndeployment tx hash: {tx}\nConfirmed tx {tx}");
        let report = parse_deploy_output(&current).unwrap();
        assert_eq!(report.address, ADDR);
        assert_eq!(report.tx_hashes.len(), 1);
    }

    #[test]
    fn missing_address_is_an_error() {
        assert!(parse_deploy_output("error: insufficient funds").is_err());
    }

    #[test]
    fn owner_must_be_a_non_zero_address() {
        assert_eq!(parse_owner(&format!(" {ADDR} ")).unwrap(), ADDR);
        assert!(parse_owner("0x1234").is_err());
        assert!(parse_owner(&format!("0x{}", "0".repeat(40))).is_err());
    }

    #[test]
    fn upsert_keeps_other_deployments() {
        let existing = r#"{"network":"devnet","deployments":{"counter":{"address":"0x01"}}}"#;
        let root = upsert_deployment(
            existing,
            "arb-sepolia",
            "autoexec-wallet",
            json!({ "address": ADDR }),
            "2026-01-01T00:00:00Z",
        )
        .unwrap();

        assert_eq!(root["network"], "arb-sepolia");
        assert_eq!(root["deployments"]["counter"]["address"], "0x01");
        assert_eq!(root["deployments"]["autoexec-wallet"]["address"], ADDR);
        assert!(upsert_deployment("not json", "devnet", "k", json!({}), "now").is_err());
    }

    #[test]
    fn long_output_is_truncated_on_a_char_boundary() {
        let raw = "é".repeat(MAX_STORED_OUTPUT);
        let kept = truncate_output(&raw);
        assert!(kept.len() <= MAX_STORED_OUTPUT);
        assert!(kept.chars().all(|c| c == 'é'));
    }
}
