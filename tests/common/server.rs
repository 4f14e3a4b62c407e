use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;

const BIN: &str = env!("CARGO_BIN_EXE_commons-api");

/// A `commons-api serve` child process on a free port, killed on drop
pub struct TestServer {
    pub base_url: String,
    secret: String,
    child: Child,
}

impl TestServer {
    pub async fn spawn(secret: &str) -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let child = Command::new(BIN)
            .args(["serve", "--port", &port.to_string(), "--storage", "memory"])
            .env("APP_ENV", "development")
            .env("JWT_SECRET", secret)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::inherit())
            .spawn()
            .context("failed to spawn server binary")?;

        let server = Self {
            base_url,
            secret: secret.to_string(),
            child,
        };
        server.wait_ready(Duration::from_secs(10)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    /// Mint a token with the binary's own `token` subcommand
    pub fn token(&self, user_id: i64, admin: bool) -> Result<String> {
        let mut cmd = Command::new(BIN);
        cmd.args(["token", "--user-id", &user_id.to_string()])
            .env("JWT_SECRET", &self.secret);
        if admin {
            cmd.arg("--admin");
        }
        let output = cmd.output().context("failed to run token command")?;
        anyhow::ensure!(output.status.success(), "token command failed");
        Ok(String::from_utf8(output.stdout)?.trim().to_string())
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
