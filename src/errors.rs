use std::fmt;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrivacyApiError {
    Validation(String),
    NotFound(String),
    Lookup(String),
    NotOpen(String),
    Database(String),
    FileOperation(String),
    Config(String),
    Serialization(String),
}

impl PrivacyApiError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            PrivacyApiError::Validation(_) => "E001",
            PrivacyApiError::NotFound(_) => "E002",
            PrivacyApiError::Lookup(_) => "E003",
            PrivacyApiError::NotOpen(_) => "E004",
            PrivacyApiError::Database(_) => "E005",
            PrivacyApiError::FileOperation(_) => "E006",
            PrivacyApiError::Config(_) => "E007",
            PrivacyApiError::Serialization(_) => "E008",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            PrivacyApiError::Validation(_) => "Validation Error",
            PrivacyApiError::NotFound(_) => "Address Not Found",
            PrivacyApiError::Lookup(_) => "Lookup Error",
            PrivacyApiError::NotOpen(_) => "Database Not Open",
            PrivacyApiError::Database(_) => "Database Error",
            PrivacyApiError::FileOperation(_) => "File Operation Error",
            PrivacyApiError::Config(_) => "Configuration Error",
            PrivacyApiError::Serialization(_) => "Serialization Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            PrivacyApiError::Validation(msg)
            | PrivacyApiError::NotFound(msg)
            | PrivacyApiError::Lookup(msg)
            | PrivacyApiError::NotOpen(msg)
            | PrivacyApiError::Database(msg)
            | PrivacyApiError::FileOperation(msg)
            | PrivacyApiError::Config(msg)
            | PrivacyApiError::Serialization(msg) => msg,
        }
    }

    /// Whether the failure was caused by the caller's input.
    ///
    /// Client errors are answered with their message; everything else is
    /// answered with an opaque body.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            PrivacyApiError::Validation(_)
                | PrivacyApiError::NotFound(_)
                | PrivacyApiError::Lookup(_)
        )
    }

    /// HTTP 状态码映射
    pub fn http_status(&self) -> StatusCode {
        if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    /// 格式化为彩色输出（用于 Server 模式）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出（用于 CLI 模式）
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for PrivacyApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for PrivacyApiError {}

// 便捷的构造函数
impl PrivacyApiError {
    pub fn validation<T: Into<String>>(msg: T) -> Self {
        PrivacyApiError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        PrivacyApiError::NotFound(msg.into())
    }

    pub fn lookup<T: Into<String>>(msg: T) -> Self {
        PrivacyApiError::Lookup(msg.into())
    }

    pub fn not_open<T: Into<String>>(msg: T) -> Self {
        PrivacyApiError::NotOpen(msg.into())
    }

    pub fn database<T: Into<String>>(msg: T) -> Self {
        PrivacyApiError::Database(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        PrivacyApiError::FileOperation(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        PrivacyApiError::Config(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        PrivacyApiError::Serialization(msg.into())
    }
}

impl From<std::io::Error> for PrivacyApiError {
    fn from(err: std::io::Error) -> Self {
        PrivacyApiError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for PrivacyApiError {
    fn from(err: serde_json::Error) -> Self {
        PrivacyApiError::Serialization(err.to_string())
    }
}

impl From<maxminddb::MaxMindDbError> for PrivacyApiError {
    fn from(err: maxminddb::MaxMindDbError) -> Self {
        PrivacyApiError::Database(err.to_string())
    }
}

impl From<config::ConfigError> for PrivacyApiError {
    fn from(err: config::ConfigError) -> Self {
        PrivacyApiError::Config(err.to_string())
    }
}

/// JSON 错误响应体
#[derive(Debug, Serialize)]
pub struct ErrorBody<'a> {
    pub code: &'static str,
    pub detail: &'a str,
}

const INTERNAL_ERROR_DETAIL: &str = "Internal server error";

impl ResponseError for PrivacyApiError {
    fn status_code(&self) -> StatusCode {
        self.http_status()
    }

    fn error_response(&self) -> HttpResponse {
        let detail = if self.is_client_error() {
            self.message()
        } else {
            // 服务端错误只写日志，不回传内部细节
            tracing::error!("{} {}: {}", self.code(), self.error_type(), self.message());
            INTERNAL_ERROR_DETAIL
        };

        HttpResponse::build(self.http_status())
            .append_header(("Content-Type", "application/json; charset=utf-8"))
            .json(ErrorBody {
                code: self.code(),
                detail,
            })
    }
}

pub type Result<T> = std::result::Result<T, PrivacyApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_map_to_bad_request() {
        for err in [
            PrivacyApiError::validation("bad input"),
            PrivacyApiError::not_found("missing"),
            PrivacyApiError::lookup("whois failed"),
        ] {
            assert_eq!(err.http_status(), StatusCode::BAD_REQUEST);
            assert!(err.is_client_error());
        }
    }

    #[test]
    fn test_infrastructure_errors_map_to_internal() {
        for err in [
            PrivacyApiError::not_open("closed"),
            PrivacyApiError::database("corrupt"),
            PrivacyApiError::file_operation("io"),
            PrivacyApiError::config("bad"),
            PrivacyApiError::serialization("json"),
        ] {
            assert_eq!(err.http_status(), StatusCode::INTERNAL_SERVER_ERROR);
            assert!(!err.is_client_error());
        }
    }

    #[test]
    fn test_codes_are_unique() {
        let codes = [
            PrivacyApiError::validation("").code(),
            PrivacyApiError::not_found("").code(),
            PrivacyApiError::lookup("").code(),
            PrivacyApiError::not_open("").code(),
            PrivacyApiError::database("").code(),
            PrivacyApiError::file_operation("").code(),
            PrivacyApiError::config("").code(),
            PrivacyApiError::serialization("").code(),
        ];
        let unique: std::collections::HashSet<_> = codes.iter().collect();
        assert_eq!(unique.len(), codes.len());
    }

    #[test]
    fn test_display_uses_simple_format() {
        let err = PrivacyApiError::validation("Invalid IP address: nope");
        assert_eq!(err.to_string(), "Validation Error: Invalid IP address: nope");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: PrivacyApiError = io.into();
        assert!(matches!(err, PrivacyApiError::FileOperation(_)));
        assert!(err.message().contains("no such file"));
    }
}
