//! Transient user notifications.

use tabula_net::NetworkError;

/// Severity of a [`Notice`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A dismissible message for the user, such as a toast.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }

    /// Error notice for a failed request.
    ///
    /// Server messages and network failures keep their own wording. Any
    /// other failure, such as an undecodable body, is reported as `fallback`.
    pub fn from_error(error: &NetworkError, fallback: &str) -> Self {
        let message = if error.status().is_some() || error.is_transport() {
            error.user_message()
        } else {
            fallback.to_string()
        };
        Self::error(message)
    }
}

/// Korean message strings shown by the pages.
pub mod messages {
    pub const USER_DELETED: &str = "사용자가 삭제되었습니다.";
    pub const USER_CREATED: &str = "사용자가 생성되었습니다!";
    pub const USER_UPDATED: &str = "사용자 정보가 수정되었습니다!";
    pub const CHECK_INPUT: &str = "입력값을 확인해주세요.";
    pub const FORM_SUBMITTED: &str = "폼이 성공적으로 제출되었습니다!";
    pub const CONFIRM_DELETE: &str = "정말 삭제하시겠습니까?";
    pub const EMPTY_USERS: &str = "사용자가 없습니다.";
    pub const RETRY: &str = "다시 시도";
    pub const FORM_SUBMIT_FAILED: &str = "폼 제출 중 오류가 발생했습니다.";
    pub const LIST_LOAD_FAILED: &str = "사용자 목록을 불러오는데 실패했습니다.";
    pub const USER_LOAD_FAILED: &str = "사용자 정보를 불러올 수 없습니다.";
    pub const USER_CREATE_FAILED: &str = "사용자 생성 중 오류가 발생했습니다.";
    pub const USER_UPDATE_FAILED: &str = "사용자 정보 수정 중 오류가 발생했습니다.";
    pub const USER_DELETE_FAILED: &str = "사용자 삭제에 실패했습니다.";
}
