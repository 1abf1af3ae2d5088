use crate::{PriorityTier, Task};

/// Tasks grouped by priority tier, each lane keeping the order it was given.
#[derive(Debug, Default)]
pub struct TaskLanes<'a> {
    pub high: Vec<&'a Task>,
    pub medium: Vec<&'a Task>,
    pub low: Vec<&'a Task>,
}

impl<'a> TaskLanes<'a> {
    pub fn group<I>(tasks: I) -> Self
    where
        I: IntoIterator<Item = &'a Task>,
    {
        let mut lanes = Self::default();
        for task in tasks {
            match task.priority.tier() {
                PriorityTier::High => lanes.high.push(task),
                PriorityTier::Medium => lanes.medium.push(task),
                PriorityTier::Low => lanes.low.push(task),
            }
        }
        lanes
    }

    pub fn lane(&self, tier: PriorityTier) -> &[&'a Task] {
        match tier {
            PriorityTier::High => &self.high,
            PriorityTier::Medium => &self.medium,
            PriorityTier::Low => &self.low,
        }
    }

    pub fn len(&self) -> usize {
        self.high.len() + self.medium.len() + self.low.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
