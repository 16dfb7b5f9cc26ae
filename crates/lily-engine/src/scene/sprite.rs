use glam::Vec3;

use crate::paint::Color;
use crate::scene::{RenderQueue, SpriteCmd, Transform};

/// A colored unit quad with a transform.
///
/// The quad spans `[-0.5, 0.5]` in x/y; size comes from the transform's
/// scale. `submit` snapshots the current model matrix and color into the
/// render queue.
#[derive(Debug, Clone)]
pub struct Sprite {
    transform: Transform,
    color: Color,
}

impl Sprite {
    pub fn new(position: Vec3, scale: Vec3, color: Color) -> Self {
        Self {
            transform: Transform::new(position, Vec3::ZERO, scale),
            color,
        }
    }

    #[inline]
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    #[inline]
    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Records this sprite into the queue for the current frame.
    pub fn submit(&self, queue: &mut RenderQueue) {
        queue.submit(SpriteCmd {
            model: self.transform.model_matrix(),
            color: self.color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_snapshots_model_and_color() {
        let sprite = Sprite::new(Vec3::new(2.0, 1.0, 0.0), Vec3::ONE, Color::RED);

        let mut queue = RenderQueue::new();
        sprite.submit(&mut queue);

        let cmd = queue.items()[0];
        assert_eq!(cmd.color, Color::RED);
        assert_eq!(cmd.model, sprite.transform().model_matrix());
    }

    #[test]
    fn transform_mutation_is_visible_on_next_submit() {
        let mut sprite = Sprite::new(Vec3::ZERO, Vec3::ONE, Color::BLUE);
        let mut queue = RenderQueue::new();

        sprite.submit(&mut queue);
        sprite.transform_mut().set_position(Vec3::new(5.0, 0.0, 0.0));
        sprite.submit(&mut queue);

        let items = queue.items();
        assert_ne!(items[0].model, items[1].model);
        assert_eq!(items[1].model.w_axis.x, 5.0);
    }
}
