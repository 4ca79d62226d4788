//! 출력 스트림(Output).

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{mpsc, watch};

/// 이름 있는 출력 이벤트 스트림(hot, 재생 없음).
/// 구독자마다 무제한 큐를 두어 느린 구독자도 이벤트를 잃지 않는다.
pub struct Signal<T> {
    subscribers: Arc<Mutex<Vec<mpsc::UnboundedSender<T>>>>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            subscribers: Arc::clone(&self.subscribers),
        }
    }
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self {
            subscribers: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl<T: Clone> Signal<T> {
    /// 구독 이후 방출되는 이벤트만 받는다.
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<T> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(tx);
        rx
    }

    /// 살아 있는 구독자 모두에게 순서대로 전달하고, 닫힌 구독자는 정리한다.
    pub fn emit(&self, value: T) {
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        subscribers.retain(|tx| tx.send(value.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// 현재 값을 가진 출력(상태). 새 구독자는 최신 값부터 본다.
pub struct StateSignal<T> {
    sender: Arc<watch::Sender<T>>,
}

impl<T> Clone for StateSignal<T> {
    fn clone(&self) -> Self {
        Self {
            sender: Arc::clone(&self.sender),
        }
    }
}

impl<T: Clone> StateSignal<T> {
    pub fn new(initial: T) -> Self {
        let (sender, _receiver) = watch::channel(initial);
        Self {
            sender: Arc::new(sender),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.sender.subscribe()
    }

    pub fn current(&self) -> T {
        self.sender.borrow().clone()
    }

    pub fn set(&self, value: T) {
        self.sender.send_replace(value);
    }
}
