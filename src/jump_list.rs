use std::collections::VecDeque;

/// A position inside one tab's document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLocation {
    pub page: usize,
    pub scroll_y: i64,
}

impl PageLocation {
    pub fn new(page: usize, scroll_y: i64) -> Self {
        Self { page, scroll_y }
    }
}

/// Page history for goBackward/goForward
pub struct JumpList {
    entries: VecDeque<PageLocation>,
    /// Index of the entry we have jumped back to; `None` means at the newest entry
    current_position: Option<usize>,
    max_size: usize,
}

impl Default for JumpList {
    fn default() -> Self {
        Self::new(50)
    }
}

impl JumpList {
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(max_size),
            current_position: None,
            max_size,
        }
    }

    /// Record a location. Anything after the current position is dropped.
    pub fn push(&mut self, location: PageLocation) {
        if let Some(pos) = self.current_position {
            self.entries.truncate(pos + 1);
        }

        if self.entries.back() == Some(&location) {
            self.current_position = None;
            return;
        }
        self.entries.push_back(location);
        while self.entries.len() > self.max_size {
            self.entries.pop_front();
        }
        self.current_position = None;
    }

    /// Step back in history. When at the newest entry, `current` is recorded
    /// first so that going forward returns to it.
    pub fn jump_back(&mut self, current: Option<PageLocation>) -> Option<PageLocation> {
        if self.current_position.is_none() {
            if let Some(loc) = current {
                if self.entries.back() != Some(&loc) {
                    self.entries.push_back(loc);
                    while self.entries.len() > self.max_size {
                        self.entries.pop_front();
                    }
                }
            }
        }

        match self.current_position {
            None if self.entries.len() >= 2 => {
                let new_pos = self.entries.len() - 2;
                self.current_position = Some(new_pos);
                self.entries.get(new_pos).copied()
            }
            Some(pos) if pos > 0 => {
                self.current_position = Some(pos - 1);
                self.entries.get(pos - 1).copied()
            }
            _ => None,
        }
    }

    pub fn jump_forward(&mut self) -> Option<PageLocation> {
        match self.current_position {
            Some(pos) if pos + 1 < self.entries.len() => {
                let next = pos + 1;
                self.current_position = if next + 1 == self.entries.len() {
                    None
                } else {
                    Some(next)
                };
                self.entries.get(next).copied()
            }
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.current_position = None;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
