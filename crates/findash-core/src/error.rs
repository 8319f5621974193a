//! 재무 대시보드의 에러 타입.
//!
//! 호출자에게 전달되는 에러는 세 갈래로 나뉩니다:
//! 사용자 입력 검증 실패, 수학적으로 정의되지 않는 계산, 외부 협력자(저장소, 시세) 실패.

use thiserror::Error;

/// 핵심 재무 에러.
#[derive(Debug, Error)]
pub enum FinanceError {
    /// 입력 검증 에러 (필수 필드 누락, 숫자가 아닌 금액 등)
    #[error("입력 검증 에러: {0}")]
    Validation(String),

    /// 계산 결과가 정의되지 않음 (예: 시장 분산이 0인 베타)
    #[error("계산 불가: {0}")]
    ComputationUndefined(String),

    /// 레코드 저장소 또는 시세 제공자 실패
    #[error("외부 협력자 에러: {0}")]
    Collaborator(String),

    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 직렬화 에러
    #[error("직렬화 에러: {0}")]
    Serialization(String),

    /// 잘못된 입력 (파라미터 범위 등)
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),

    /// 찾을 수 없음
    #[error("찾을 수 없음: {0}")]
    NotFound(String),
}

/// 재무 작업을 위한 Result 타입.
pub type FinanceResult<T> = Result<T, FinanceError>;

impl FinanceError {
    /// 사용자에게 그대로 보여줄 수 있는 에러인지 확인합니다.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            FinanceError::Validation(_) | FinanceError::InvalidInput(_)
        )
    }

    /// 외부 협력자 실패인지 확인합니다.
    ///
    /// 호출자는 이 경우 빈 차트나 에러 화면을 그릴지 결정합니다.
    pub fn is_collaborator_failure(&self) -> bool {
        matches!(self, FinanceError::Collaborator(_))
    }

    /// 화면에 표시할 메시지를 반환합니다.
    pub fn user_message(&self) -> String {
        match self {
            FinanceError::Validation(msg) | FinanceError::InvalidInput(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

impl From<serde_json::Error> for FinanceError {
    fn from(err: serde_json::Error) -> Self {
        FinanceError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for FinanceError {
    fn from(err: config::ConfigError) -> Self {
        FinanceError::Config(err.to_string())
    }
}

impl From<validator::ValidationErrors> for FinanceError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{}: 유효하지 않은 값", field))
                })
            })
            .collect();
        // HashMap 순회 순서와 무관하게 메시지를 고정
        messages.sort();
        FinanceError::Validation(messages.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_user_facing() {
        let err = FinanceError::Validation("카테고리를 입력하세요".to_string());
        assert!(err.is_user_facing());
        assert_eq!(err.user_message(), "카테고리를 입력하세요");

        let err = FinanceError::Collaborator("disk full".to_string());
        assert!(!err.is_user_facing());
        assert!(err.is_collaborator_failure());
        assert!(err.user_message().contains("disk full"));
    }

    #[test]
    fn test_computation_undefined_is_not_collaborator() {
        let err = FinanceError::ComputationUndefined("market variance is zero".to_string());
        assert!(!err.is_collaborator_failure());
        assert!(!err.is_user_facing());
    }
}
