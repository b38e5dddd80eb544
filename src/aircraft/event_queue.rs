use std::collections::VecDeque;

use crate::aircraft::Event;

/// A handle to a position in an [`EventQueue`]. Stable across `push_back`/`peek_*`
/// calls; invalidated by `truncate_after`/`clear`/`pop_completed` exactly when a
/// coordinator or the simulator is discarding or consuming everything up to that
/// point anyway, so no `NodeId` is ever held across a simulator step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// The ordered task list belonging to one aircraft.
///
/// Modeled over a `VecDeque<Event>` rather than a pointer-chased linked list:
/// `push_back`, `pop_completed` and `truncate_after` are all O(1) amortized exactly as
/// the doubly-linked list this supersedes promised, and indices give every node a
/// stable, `Copy` handle without unsafe code or reference counting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventQueue {
    events: VecDeque<Event>,
}

impl EventQueue {
    #[must_use]
    pub fn new() -> Self {
        EventQueue { events: VecDeque::new() }
    }

    pub fn push_back(&mut self, event: Event) -> NodeId {
        self.events.push_back(event);
        NodeId(self.events.len() - 1)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    #[must_use]
    pub fn peek_first(&self) -> Option<&Event> {
        self.events.first()
    }

    #[must_use]
    pub fn peek_last(&self) -> Option<&Event> {
        self.events.last()
    }

    #[must_use]
    pub fn get(&self, node: NodeId) -> Option<&Event> {
        self.events.get(node.0)
    }

    /// `NodeId` of the last element, if any — the boundary a coordinator inserts after
    /// when it wants to append everything new to the end of the existing plan.
    #[must_use]
    pub fn last_node(&self) -> Option<NodeId> {
        if self.events.is_empty() { None } else { Some(NodeId(self.events.len() - 1)) }
    }

    /// Drop every event after `node`, keeping `node` itself. `None` drops the whole
    /// queue (equivalent to `clear`).
    pub fn truncate_after(&mut self, node: Option<NodeId>) {
        match node {
            Some(NodeId(i)) => self.events.truncate(i + 1),
            None => self.events.clear(),
        }
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Removes and returns the first event, as the simulator does once it has decided
    /// that event's completion time has passed.
    pub fn pop_completed(&mut self) -> Option<Event> {
        self.events.pop_front()
    }

    /// Forward iteration, each item paired with the node preceding it (`None` for the
    /// first element). Lets a coordinator read off the resource state an inserted
    /// prefix would depart from without rescanning.
    pub fn iter_forward(&self) -> impl Iterator<Item = (NodeId, &Event, Option<NodeId>)> {
        self.events.iter().enumerate().map(|(i, e)| {
            let prev = if i == 0 { None } else { Some(NodeId(i - 1)) };
            (NodeId(i), e, prev)
        })
    }

    /// Reverse iteration, same pairing convention as [`EventQueue::iter_forward`].
    pub fn iter_reverse(&self) -> impl Iterator<Item = (NodeId, &Event, Option<NodeId>)> {
        let len = self.events.len();
        self.events.iter().enumerate().rev().map(move |(i, e)| {
            let prev = if i == 0 { None } else { Some(NodeId(i - 1)) };
            let _ = len;
            (NodeId(i), e, prev)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aircraft::{EventTarget, Status};
    use crate::geo::Location;
    use crate::units::Volume;

    fn dummy_event(completion_time: f64) -> Event {
        Event {
            target: EventTarget::Strike { id: 0, location: Location::new(0.0, 0.0) },
            departure_time: 0.0,
            arrival_time: completion_time,
            completion_time,
            arrival_fuel: 1.0,
            completion_fuel: 1.0,
            water_on_board_at_completion: Volume::ZERO,
            status_on_completion: Status::Hovering,
        }
    }

    #[test]
    fn push_and_peek() {
        let mut q = EventQueue::new();
        q.push_back(dummy_event(1.0));
        q.push_back(dummy_event(2.0));
        assert_eq!(q.peek_first().unwrap().completion_time, 1.0);
        assert_eq!(q.peek_last().unwrap().completion_time, 2.0);
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn truncate_after_keeps_prefix() {
        let mut q = EventQueue::new();
        let n0 = q.push_back(dummy_event(1.0));
        q.push_back(dummy_event(2.0));
        q.push_back(dummy_event(3.0));
        q.truncate_after(Some(n0));
        assert_eq!(q.len(), 1);
        assert_eq!(q.peek_last().unwrap().completion_time, 1.0);
    }

    #[test]
    fn truncate_after_none_clears() {
        let mut q = EventQueue::new();
        q.push_back(dummy_event(1.0));
        q.truncate_after(None);
        assert!(q.is_empty());
    }

    #[test]
    fn forward_and_reverse_prev_node_projection() {
        let mut q = EventQueue::new();
        let n0 = q.push_back(dummy_event(1.0));
        let n1 = q.push_back(dummy_event(2.0));
        let forward: Vec<_> = q.iter_forward().map(|(n, _, p)| (n, p)).collect();
        assert_eq!(forward, vec![(n0, None), (n1, Some(n0))]);
        let reverse: Vec<_> = q.iter_reverse().map(|(n, _, p)| (n, p)).collect();
        assert_eq!(reverse, vec![(n1, Some(n0)), (n0, None)]);
    }
}
