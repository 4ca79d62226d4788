//! Domain layer
//! 인증 값 객체/오류 분류/로그인 상태 머신을 외부 의존성 없이 표현한다.

pub mod credential;
pub mod error;
pub mod login_state;
