//! One-shot effects scheduled a few ticks ahead.

use riftstorm_core::components::FoeId;

#[derive(Debug, Clone, PartialEq)]
pub enum DelayedAction {
    /// Continue a lightning chain from `from`, skipping `visited`.
    ChainLightning {
        from: FoeId,
        damage: f32,
        hops_left: u32,
        range: f32,
        visited: Vec<FoeId>,
    },
}

#[derive(Debug, Clone, PartialEq)]
struct DelayedEvent {
    remaining: f32,
    action: DelayedAction,
}

#[derive(Debug, Default)]
pub struct DelayedQueue {
    events: Vec<DelayedEvent>,
}

impl DelayedQueue {
    pub fn schedule(&mut self, delay: f32, action: DelayedAction) {
        self.events.push(DelayedEvent {
            remaining: delay,
            action,
        });
    }

    /// Count every timer down by `dt` and move due actions into `due`, in
    /// scheduling order.
    pub fn advance(&mut self, dt: f32, due: &mut Vec<DelayedAction>) {
        let mut i = 0;
        while i < self.events.len() {
            self.events[i].remaining -= dt;
            if self.events[i].remaining <= 0.0 {
                due.push(self.events.remove(i).action);
            } else {
                i += 1;
            }
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use riftstorm_core::types::Handle;

    fn hop(index: u32) -> DelayedAction {
        DelayedAction::ChainLightning {
            from: Handle::new(index, 0),
            damage: 10.0,
            hops_left: 1,
            range: 200.0,
            visited: Vec::new(),
        }
    }

    #[test]
    fn fires_after_delay() {
        let mut queue = DelayedQueue::default();
        queue.schedule(3.0, hop(1));
        let mut due = Vec::new();
        queue.advance(1.0, &mut due);
        queue.advance(1.0, &mut due);
        assert!(due.is_empty());
        queue.advance(1.0, &mut due);
        assert_eq!(due, vec![hop(1)]);
        assert!(queue.is_empty());
    }

    #[test]
    fn scaled_delta_slows_timers() {
        let mut queue = DelayedQueue::default();
        queue.schedule(3.0, hop(1));
        let mut due = Vec::new();
        for _ in 0..8 {
            queue.advance(0.35, &mut due);
        }
        assert!(due.is_empty());
        queue.advance(0.35, &mut due);
        assert_eq!(due.len(), 1);
    }

    #[test]
    fn due_actions_keep_scheduling_order() {
        let mut queue = DelayedQueue::default();
        queue.schedule(2.0, hop(1));
        queue.schedule(5.0, hop(2));
        queue.schedule(1.0, hop(3));
        let mut due = Vec::new();
        queue.advance(2.0, &mut due);
        assert_eq!(due, vec![hop(1), hop(3)]);
        assert_eq!(queue.len(), 1);
    }
}
