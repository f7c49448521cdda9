//! Generator protocol
//!
//! The host compiler drives generators with newline-delimited JSON-RPC 2.0:
//! requests arrive on stdin, responses are written to stderr. The loop here
//! is generic over its streams so it can be driven from memory.

use crate::error::GeneratorError;
use crate::generator;
use crate::options::{CLIENT_PROVIDER, GeneratorOptions};
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};
use tracing::{debug, error};

/// Default output directory, relative to the schema
pub const DEFAULT_OUTPUT: &str = "./generated";

/// Human-readable generator name shown by the host
pub const PRETTY_NAME: &str = "Prisma Repository Generator";

/// JSON-RPC code for a failed `generate`
pub const GENERATE_FAILED: i64 = -32000;

/// JSON-RPC code for an unknown method
pub const METHOD_NOT_FOUND: i64 = -32601;

/// What the generator declares about itself
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    /// Output used when the schema sets none
    pub default_output: String,

    /// Display name
    pub pretty_name: String,

    /// Generators that must run first
    pub requires_generators: Vec<String>,
}

impl Default for Manifest {
    fn default() -> Self {
        Manifest {
            default_output: DEFAULT_OUTPUT.to_string(),
            pretty_name: PRETTY_NAME.to_string(),
            requires_generators: vec![CLIENT_PROVIDER.to_string()],
        }
    }
}

/// An incoming request
#[derive(Debug, Deserialize)]
pub struct Request {
    /// Method name
    pub method: String,

    /// Method parameters
    #[serde(default)]
    pub params: serde_json::Value,

    /// Request id echoed in the response
    pub id: serde_json::Value,
}

/// An outgoing response
#[derive(Debug, Serialize)]
pub struct Response {
    jsonrpc: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<RpcError>,
    id: serde_json::Value,
}

/// Error object of a failed response
#[derive(Debug, Serialize)]
pub struct RpcError {
    code: i64,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<serde_json::Value>,
}

impl Response {
    fn ok(id: serde_json::Value, result: serde_json::Value) -> Self {
        Response {
            jsonrpc: "2.0",
            result: Some(result),
            error: None,
            id,
        }
    }

    fn err(id: serde_json::Value, code: i64, message: String, data: Option<serde_json::Value>) -> Self {
        Response {
            jsonrpc: "2.0",
            result: None,
            error: Some(RpcError {
                code,
                message,
                data,
            }),
            id,
        }
    }
}

/// Answer a single request
pub fn handle(request: Request) -> Response {
    debug!(method = %request.method, id = %request.id, "request");

    match request.method.as_str() {
        "getManifest" => {
            let manifest = serde_json::json!({ "manifest": Manifest::default() });
            Response::ok(request.id, manifest)
        }
        "generate" => match run_generate(request.params) {
            // Success is a `null` result
            Ok(()) => Response::ok(request.id, serde_json::Value::Null),
            Err(e) => {
                error!(error = %e, "generation failed");
                let message = e.to_string();
                let data = serde_json::json!({ "stack": format!("{:?}", e) });
                Response::err(request.id, GENERATE_FAILED, message, Some(data))
            }
        },
        other => Response::err(
            request.id,
            METHOD_NOT_FOUND,
            format!("Method not found: {}", other),
            None,
        ),
    }
}

fn run_generate(params: serde_json::Value) -> Result<(), GeneratorError> {
    let options: GeneratorOptions = serde_json::from_value(params)?;
    generator::generate(&options)?;
    Ok(())
}

/// Serve requests from `input` until EOF, writing responses to `output`
pub fn serve<R: BufRead, W: Write>(input: R, mut output: W) -> Result<(), GeneratorError> {
    for line in input.lines() {
        let line = line.map_err(|e| GeneratorError::io("<stdin>", e))?;
        if line.trim().is_empty() {
            continue;
        }

        let request: Request = serde_json::from_str(&line)?;
        let response = handle(request);

        let mut encoded = serde_json::to_vec(&response)?;
        encoded.push(b'\n');
        output
            .write_all(&encoded)
            .and_then(|_| output.flush())
            .map_err(|e| GeneratorError::io("<stderr>", e))?;
    }

    Ok(())
}
