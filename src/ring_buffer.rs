/// Fixed-capacity window of the most recent samples.
///
/// `push` appends and, once full, evicts the oldest sample. `replace`
/// overwrites the newest sample in place, which is how amended bars are
/// applied without shifting the window.
#[derive(Clone, Debug)]
pub(crate) struct RingBuffer {
    buffer: Vec<f64>,
    head: usize,
    tail: usize,
    len: usize,
    capacity: usize,
}

impl RingBuffer {
    #[must_use]
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            buffer: vec![0.0; capacity],
            head: 0,
            tail: 0,
            len: 0,
            capacity,
        }
    }

    #[inline]
    pub(crate) fn is_ready(&self) -> bool {
        self.len == self.capacity
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub(crate) fn push(&mut self, value: f64) -> Option<f64> {
        if self.is_ready() {
            let old = self.buffer[self.head];

            self.buffer[self.head] = value;

            self.tail = self.head;
            self.head += 1;
            if self.head == self.capacity {
                self.head = 0;
            }

            Some(old)
        } else {
            self.buffer[self.len] = value;
            self.tail = self.len;
            self.len += 1;

            None
        }
    }

    /// Overwrites the newest sample and returns the one it replaced.
    #[inline]
    pub(crate) fn replace(&mut self, value: f64) -> f64 {
        debug_assert!(!self.is_empty(), "replace called on an empty ring buffer");

        let old = self.buffer[self.tail];

        self.buffer[self.tail] = value;

        old
    }
}
