//! 입력 의도(Input) 전달자.

use std::fmt;
use std::sync::Arc;

use tokio::sync::mpsc;

use super::BindingError;

type Sink<T> = Arc<dyn Fn(T) -> Result<(), BindingError> + Send + Sync>;

/// 이름 있는 입력 의도. 값 하나(또는 `()`)를 받아 뷰모델 입력 큐에 넣는다.
pub struct Relay<T> {
    sink: Sink<T>,
}

impl<T> Clone for Relay<T> {
    fn clone(&self) -> Self {
        Self {
            sink: Arc::clone(&self.sink),
        }
    }
}

impl<T> fmt::Debug for Relay<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Relay").finish_non_exhaustive()
    }
}

impl<T: 'static> Relay<T> {
    pub fn new(sink: impl Fn(T) -> Result<(), BindingError> + Send + Sync + 'static) -> Self {
        Self {
            sink: Arc::new(sink),
        }
    }

    /// 뷰모델의 단일 입력 큐로 전달하는 relay를 만든다.
    /// 여러 relay가 같은 큐를 공유하므로 수락 순서가 곧 처리 순서다.
    pub fn forwarding<E: Send + 'static>(queue: mpsc::UnboundedSender<E>, wrap: fn(T) -> E) -> Self {
        Self::new(move |value| {
            queue
                .send(wrap(value))
                .map_err(|_closed| BindingError::Closed)
        })
    }

    /// 입력을 수락한다. 뷰모델이 종료되었으면 `Closed`를 반환한다.
    pub fn accept(&self, value: T) -> Result<(), BindingError> {
        (self.sink)(value)
    }
}
