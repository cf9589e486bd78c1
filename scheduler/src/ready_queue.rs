use std::collections::VecDeque;

use crate::Process;

/// FIFO of processes waiting for the CPU.
#[derive(Debug, Default, Clone)]
pub struct ReadyQueue {
    processes: VecDeque<Process>,
}

impl ReadyQueue {
    pub fn new() -> Self {
        ReadyQueue::default()
    }

    pub fn enqueue(&mut self, process: Process) {
        self.processes.push_back(process);
    }

    pub fn dequeue_front(&mut self) -> Option<Process> {
        self.processes.pop_front()
    }

    pub fn peek_front(&self) -> Option<&Process> {
        self.processes.front()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    /// Iterates from the front of the queue to the back.
    pub fn iter(&self) -> impl Iterator<Item = &Process> {
        self.processes.iter()
    }
}
