// In crates/web-server/src/types.rs

use platform::ErrorCode;
use serde::{Deserialize, Serialize};

/// The envelope of every successful procedure call.
#[derive(Debug, Serialize)]
pub struct RpcResponse<T> {
    pub result: T,
}

/// The envelope of every failed procedure call.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: ErrorCode,
    pub message: String,
}

/// Query parameters of `GET /api/rpc/{procedure}`.
///
/// `input` carries the procedure input as a JSON document.
#[derive(Debug, Deserialize)]
pub struct RpcQuery {
    pub input: Option<String>,
}

/// Whether a procedure only reads (`query`) or writes (`mutation`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcedureKind {
    Query,
    Mutation,
}

/// One entry of the procedure catalog served at `GET /api/rpc`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Procedure {
    pub name: &'static str,
    pub kind: ProcedureKind,
    pub description: &'static str,
}
