//! 네이티브 로그인 흐름(외부 경계) 구현.

mod command_flow;

pub use command_flow::CommandAuthorizationFlow;
