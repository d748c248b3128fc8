//! Response DTOs and the uniform result envelope.

use serde::{Deserialize, Serialize};

/// Result codes carried in every envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultCode {
    Success,
    Error,
    Exception,
    ValidateFailed,
    InvalidArgs,
    NotLogin,
    NotPower,
}

impl ResultCode {
    /// Numeric code.
    pub fn code(self) -> u16 {
        match self {
            Self::Success => 200,
            Self::Error | Self::Exception => 500,
            Self::ValidateFailed => 400,
            Self::InvalidArgs => 422,
            Self::NotLogin => 401,
            Self::NotPower => 403,
        }
    }

    /// Machine-readable status label.
    pub fn status(self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::Error => "ERROR",
            Self::Exception => "EXCEPTION",
            Self::ValidateFailed => "VALIDATE_FAILED",
            Self::InvalidArgs => "INVALID_ARGS",
            Self::NotLogin => "NOT_LOGIN",
            Self::NotPower => "FORBIDDEN",
        }
    }

    pub fn default_message(self) -> &'static str {
        match self {
            Self::Success => "Request succeeded",
            Self::Error | Self::Exception => "Internal server error",
            Self::ValidateFailed => "Parameter validation failed",
            Self::InvalidArgs => "Invalid arguments",
            Self::NotLogin => "Not logged in",
            Self::NotPower => "Permission denied",
        }
    }

    pub fn is_success(self) -> bool {
        self == Self::Success
    }
}

/// The uniform response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseResult<T> {
    pub code: u16,
    pub status: String,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ResponseResult<T> {
    fn from_code(code: ResultCode, message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            code: code.code(),
            status: code.status().to_string(),
            message: message.into(),
            data,
        }
    }

    pub fn success(data: T) -> Self {
        Self::from_code(ResultCode::Success, ResultCode::Success.default_message(), Some(data))
    }

    /// Success without a payload.
    pub fn success_empty() -> Self {
        Self::from_code(ResultCode::Success, ResultCode::Success.default_message(), None)
    }

    pub fn success_with(data: T, message: impl Into<String>) -> Self {
        Self::from_code(ResultCode::Success, message, Some(data))
    }

    /// Generic failure (`EXCEPTION`) with a custom message.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::from_code(ResultCode::Exception, message, None)
    }

    pub fn failed_with(code: ResultCode, message: impl Into<String>) -> Self {
        Self::from_code(code, message, None)
    }

    pub fn validate_failed(message: impl Into<String>) -> Self {
        Self::from_code(ResultCode::ValidateFailed, message, None)
    }

    pub fn invalid_args(message: impl Into<String>) -> Self {
        Self::from_code(ResultCode::InvalidArgs, message, None)
    }

    pub fn unauthorized() -> Self {
        Self::from_code(ResultCode::NotLogin, ResultCode::NotLogin.default_message(), None)
    }

    pub fn forbidden() -> Self {
        Self::from_code(ResultCode::NotPower, ResultCode::NotPower.default_message(), None)
    }

    pub fn exception() -> Self {
        Self::from_code(ResultCode::Exception, ResultCode::Exception.default_message(), None)
    }

    /// Envelope with an arbitrary code and status.
    pub fn of(code: u16, status: impl Into<String>, message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            code,
            status: status.into(),
            message: message.into(),
            data,
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == ResultCode::Success.code() && self.status == ResultCode::Success.status()
    }
}

/// One page of rows with paging metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult<T> {
    pub total: u64,
    pub total_pages: u64,
    pub page_size: u64,
    pub page_number: u64,
    pub list: Vec<T>,
}

impl<T> PageResult<T> {
    /// `total_pages` is `ceil(total / page_size)`, zero for an empty page
    /// size.
    pub fn of(list: Vec<T>, total: u64, page_size: u64, page_number: u64) -> Self {
        let total_pages = if page_size == 0 {
            0
        } else {
            total.div_ceil(page_size)
        };
        Self {
            total,
            total_pages,
            page_size,
            page_number,
            list,
        }
    }
}

/// Health check payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Password policy verdict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordCheckResponse {
    pub strong: bool,
    /// Why the password fails, when it does.
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_shape() {
        let json = serde_json::to_value(ResponseResult::success(vec![1, 2])).unwrap();
        assert_eq!(json["code"], 200);
        assert_eq!(json["status"], "SUCCESS");
        assert_eq!(json["data"], serde_json::json!([1, 2]));
    }

    #[test]
    fn test_failure_codes() {
        let forbidden: ResponseResult<()> = ResponseResult::forbidden();
        assert_eq!(forbidden.code, 403);
        assert_eq!(forbidden.status, "FORBIDDEN");
        assert!(!forbidden.is_success());

        let invalid: ResponseResult<()> = ResponseResult::invalid_args("bad id");
        assert_eq!((invalid.code, invalid.message.as_str()), (422, "bad id"));
        assert!(invalid.data.is_none());
    }

    #[test]
    fn test_page_result_total_pages() {
        let page = PageResult::of(vec!["a", "b"], 5, 2, 1);
        assert_eq!(page.total_pages, 3);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["totalPages"], 3);
        assert_eq!(json["pageNumber"], 1);
    }
}
