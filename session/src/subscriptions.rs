use tether_shared::Tick;

/// Handle returned by `Session::subscribe`, used to unsubscribe
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickSubscription(u64);

type TickCallback = Box<dyn FnMut(Tick)>;

/// Per-tick callbacks, notified in the order they subscribed
pub(crate) struct TickSubscriptions {
    next_key: u64,
    callbacks: Vec<(TickSubscription, TickCallback)>,
}

impl TickSubscriptions {
    pub fn new() -> Self {
        Self {
            next_key: 0,
            callbacks: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, callback: TickCallback) -> TickSubscription {
        let key = TickSubscription(self.next_key);
        self.next_key = self.next_key.wrapping_add(1);
        self.callbacks.push((key, callback));
        key
    }

    /// Returns whether the subscription existed
    pub fn unsubscribe(&mut self, key: TickSubscription) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(existing, _)| *existing != key);
        self.callbacks.len() != before
    }

    pub fn notify(&mut self, tick: Tick) {
        for (_, callback) in self.callbacks.iter_mut() {
            callback(tick);
        }
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }
}
