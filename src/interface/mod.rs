//! Interface layer
//! CLI 입력 파싱과 실행 조립, 콘솔 화면을 담당한다.

pub mod cli;
