//! lifepoop-auth library root.
//! Apple/Kakao 로그인 세션 관리(초기화 게이트, 토큰 요청, 로그인 화면 뷰모델)를
//! Clean Architecture 계층으로 외부에 노출한다.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interface;
