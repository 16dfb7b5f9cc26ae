use glam::Mat4;

use crate::paint::Color;

/// One queued draw submission: the object's model matrix and fill color.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SpriteCmd {
    pub model: Mat4,
    pub color: Color,
}

/// Unbounded FIFO of draw submissions, drained once per frame.
///
/// Submission order is paint order: later submissions draw on top. Capacity
/// is retained across frames, so a steady scene allocates only on warmup.
#[derive(Debug, Default)]
pub struct RenderQueue {
    items: Vec<SpriteCmd>,
}

impl RenderQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueues a draw submission.
    #[inline]
    pub fn submit(&mut self, cmd: SpriteCmd) {
        self.items.push(cmd);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the queued submissions in FIFO order without draining.
    #[inline]
    pub fn items(&self) -> &[SpriteCmd] {
        &self.items
    }

    /// Drains all submissions in FIFO order. Keeps allocated capacity.
    #[inline]
    pub fn drain(&mut self) -> std::vec::Drain<'_, SpriteCmd> {
        self.items.drain(..)
    }

    /// Discards all submissions. Keeps allocated capacity.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmd(tag: f32) -> SpriteCmd {
        SpriteCmd {
            model: Mat4::from_translation(glam::Vec3::new(tag, 0.0, 0.0)),
            color: Color::WHITE,
        }
    }

    #[test]
    fn drain_preserves_submission_order() {
        let mut queue = RenderQueue::new();
        queue.submit(cmd(1.0));
        queue.submit(cmd(2.0));
        queue.submit(cmd(3.0));

        let tags: Vec<f32> = queue.drain().map(|c| c.model.w_axis.x).collect();
        assert_eq!(tags, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn drain_empties_the_queue() {
        let mut queue = RenderQueue::new();
        queue.submit(cmd(1.0));
        queue.drain().for_each(drop);
        assert!(queue.is_empty());
    }

    #[test]
    fn capacity_is_retained_after_clear() {
        let mut queue = RenderQueue::new();
        for i in 0..64 {
            queue.submit(cmd(i as f32));
        }
        let cap = queue.items.capacity();
        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.items.capacity(), cap);
    }
}
