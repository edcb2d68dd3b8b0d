//! Submit command handler
//!
//! Reads a workflow file, sends it through the relay and prints the job id,
//! return code and response payload.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use colored::*;
use conduit_client::{ClientError, RelayClient};
use conduit_core::codec;
use conduit_core::domain::submission::PayloadEncoding;
use conduit_core::dto::submit::{SubmitRequest, SubmitResponse};

use crate::config::Config;

/// Arguments for `conduit submit`
#[derive(Args)]
pub struct SubmitArgs {
    /// Workflow JSON file, or '-' to read from stdin
    pub file: PathBuf,

    /// Job server username
    #[arg(short, long, env = "CONDUIT_USERNAME")]
    pub username: String,

    /// Job server password
    #[arg(short, long, env = "CONDUIT_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Send the workflow base64-encoded
    #[arg(long)]
    pub base64: bool,

    /// Print the relay's JSON response instead of a summary
    #[arg(long)]
    pub json: bool,
}

/// Handle `conduit submit`
///
/// Fails (non-zero exit) when the job server returns a non-zero code.
pub async fn handle_submit(args: SubmitArgs, config: &Config) -> Result<()> {
    let client = RelayClient::new(&config.relay_url);

    let workflow = read_workflow(&args.file)?;
    let encoding = if args.base64 {
        PayloadEncoding::Base64
    } else {
        PayloadEncoding::Plain
    };
    let request = build_request(args.username, args.password, workflow, encoding)?;

    let response = client.submit(&request).await.map_err(|e| {
        print_hint(&e);
        anyhow::Error::from(e).context("Submission failed")
    })?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print_response(&response, encoding);
    }

    if response.return_code != 0 {
        anyhow::bail!("job server returned code {}", response.return_code);
    }

    Ok(())
}

/// Read the workflow from a file, or stdin for "-"
fn read_workflow(path: &Path) -> Result<Vec<u8>> {
    if path.as_os_str() == "-" {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .context("Failed to read workflow from stdin")?;
        return Ok(buf);
    }

    std::fs::read(path).with_context(|| format!("Failed to read workflow file {}", path.display()))
}

fn build_request(
    username: String,
    password: String,
    workflow: Vec<u8>,
    encoding: PayloadEncoding,
) -> Result<SubmitRequest> {
    let payload = match encoding {
        PayloadEncoding::Plain => {
            String::from_utf8(workflow).context("Workflow is not valid UTF-8; use --base64")?
        }
        PayloadEncoding::Base64 => {
            // base64 output is always ASCII
            String::from_utf8(codec::encode(&workflow, encoding))?
        }
    };

    Ok(SubmitRequest {
        username,
        password,
        payload,
        encoding,
    })
}

/// Payload as it should be shown to a person
///
/// Successful base64 replies are decoded when they turn out to be text.
fn display_payload(response: &SubmitResponse, encoding: PayloadEncoding) -> String {
    if encoding == PayloadEncoding::Base64 && response.return_code == 0 {
        if let Some(text) = codec::decode(response.payload.as_bytes(), encoding)
            .ok()
            .and_then(|bytes| String::from_utf8(bytes).ok())
        {
            return text;
        }
    }

    response.payload.clone()
}

fn print_response(response: &SubmitResponse, encoding: PayloadEncoding) {
    if response.return_code == 0 {
        println!("{} Workflow submitted", "✓".green());
        match &response.job_id {
            Some(job_id) => println!("  Job ID:      {}", job_id.bold()),
            None => println!("  Job ID:      {}", "(none)".dimmed()),
        }
        println!("  Return code: {}", response.return_code.to_string().green());
    } else {
        println!("{} Workflow rejected", "✗".red());
        println!("  Return code: {}", response.return_code.to_string().red());
    }

    let payload = display_payload(response, encoding);
    if !payload.is_empty() {
        println!("{}", "─".repeat(80).dimmed());
        println!("{}", payload);
        println!("{}", "─".repeat(80).dimmed());
    }
}

fn print_hint(err: &ClientError) {
    if err.is_server_error() {
        eprintln!(
            "{}",
            "hint: the relay could not reach the job server".yellow()
        );
    } else if err.is_client_error() {
        eprintln!(
            "{}",
            "hint: check the credentials and the payload encoding".yellow()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_request_plain() {
        let req = build_request(
            "alice".to_string(),
            "secret".to_string(),
            b"{\"query\":\"list\"}".to_vec(),
            PayloadEncoding::Plain,
        )
        .unwrap();
        assert_eq!(req.payload, "{\"query\":\"list\"}");
        assert_eq!(req.encoding, PayloadEncoding::Plain);
    }

    #[test]
    fn test_build_request_base64() {
        let req = build_request(
            "alice".to_string(),
            "secret".to_string(),
            b"{\"query\":\"list\"}".to_vec(),
            PayloadEncoding::Base64,
        )
        .unwrap();
        assert_eq!(req.payload, "eyJxdWVyeSI6Imxpc3QifQ==");
    }

    #[test]
    fn test_build_request_plain_rejects_binary() {
        let result = build_request(
            "alice".to_string(),
            "secret".to_string(),
            vec![0xff, 0xfe],
            PayloadEncoding::Plain,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_display_payload_decodes_successful_base64() {
        let response = SubmitResponse {
            job_id: Some("123".to_string()),
            payload: "T0s=".to_string(),
            return_code: 0,
        };
        assert_eq!(display_payload(&response, PayloadEncoding::Base64), "OK");
        assert_eq!(display_payload(&response, PayloadEncoding::Plain), "T0s=");
    }

    #[test]
    fn test_display_payload_keeps_failure_diagnostics() {
        let response = SubmitResponse {
            job_id: None,
            payload: "bad credentials".to_string(),
            return_code: 1,
        };
        assert_eq!(
            display_payload(&response, PayloadEncoding::Base64),
            "bad credentials"
        );
    }
}
