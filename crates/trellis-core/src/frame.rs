//! Frame-boundary task queue.
//!
//! `transition` writes are not committed when they happen. Each write queues
//! one task here, and [`Document::tick_frame`] runs the queue at the next
//! frame boundary so the commit sees every write made during the frame.
//! Tasks are not de-duplicated: two writes in one frame run two commits, and
//! since each commit reads the element's current value the second is a no-op.

use std::collections::VecDeque;

use trellis_dom::NodeId;
use trellis_layout::capability::{Capability, Transition};
use trellis_layout::Invalidation;

use crate::Document;

/// Work deferred to the next frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredTask {
    /// Commit the element's current `transition` value to its box.
    CommitTransition {
        /// The element whose transition changed.
        element: NodeId,
    },
}

/// FIFO list of deferred tasks.
#[derive(Debug, Clone, Default)]
pub struct FrameScheduler {
    queue: VecDeque<DeferredTask>,
}

impl FrameScheduler {
    /// Queue a task for the next frame.
    pub fn schedule(&mut self, task: DeferredTask) {
        log::trace!("scheduled {task:?}");
        self.queue.push_back(task);
    }

    /// Number of queued tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Take every queued task, oldest first.
    pub fn take(&mut self) -> VecDeque<DeferredTask> {
        std::mem::take(&mut self.queue)
    }
}

impl Document {
    /// Run every task queued before this frame boundary. Returns how many ran.
    ///
    /// Tasks queued while the frame runs wait for the next tick.
    pub fn tick_frame(&mut self) -> usize {
        let tasks = self.frames.take();
        for task in &tasks {
            match *task {
                DeferredTask::CommitTransition { element } => self.commit_transition(element),
            }
        }
        tasks.len()
    }

    /// Tasks waiting for the next frame.
    #[must_use]
    pub fn pending_frame_tasks(&self) -> usize {
        self.frames.len()
    }

    fn commit_transition(&mut self, element: NodeId) {
        let (Some(node), Some(state)) = (self.elements.get(element), self.states.get(&element))
        else {
            log::trace!("dropping transition commit for disposed element {element}");
            return;
        };
        let render_box = state.render_box;
        let Some(target) = self.boxes.get_mut(render_box) else {
            return;
        };
        if Transition.apply(target, &node.style, "transition", node.style.value("transition"))
            == Invalidation::Paint
        {
            self.boxes.mark_needs_paint(render_box);
        }
    }
}
