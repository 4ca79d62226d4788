//! Infrastructure layer
//! 외부 시스템(설정 파일/환경변수/로그인 헬퍼 프로세스)과 직접 통신하는 구현체 집합.

pub mod adapters;
pub mod config;
pub mod native;
pub mod providers;
