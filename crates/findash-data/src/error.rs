//! 데이터 모듈 오류 타입.

use findash_core::FinanceError;
use thiserror::Error;

/// 데이터 관련 오류.
#[derive(Debug, Error)]
pub enum DataError {
    /// 파일 입출력 오류
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// 직렬화/역직렬화 오류
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// 저장된 컬렉션이 손상됨
    #[error("Corrupt collection {path}: {reason}")]
    Corrupt { path: String, reason: String },

    /// 잘못된 데이터 형식
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// 외부 소스 연결 오류
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// 데이터 가져오기 오류 (외부 소스)
    #[error("Fetch error: {0}")]
    FetchError(String),

    /// 파싱 오류
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        DataError::SerializationError(err.to_string())
    }
}

impl From<DataError> for FinanceError {
    /// 저장소/시세 실패는 모두 협력자 실패로 보고합니다.
    fn from(err: DataError) -> Self {
        FinanceError::Collaborator(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DataError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_error_maps_to_collaborator() {
        let err: FinanceError = DataError::FetchError("timeout".to_string()).into();
        assert!(err.is_collaborator_failure());
        assert!(err.to_string().contains("timeout"));
    }
}
