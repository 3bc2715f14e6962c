//! Time-based property tweens
//!
//! A [`TweenScheduler`] interpolates node transform properties from a start
//! value to a target over a duration with an easing curve. It holds at most
//! one tween per (node, property) pair: starting a tween on a pair that is
//! already animating replaces the old one.

use std::collections::BTreeMap;

use cgmath::Vector3;
use log::trace;

use crate::gfx::scene::{NodeId, SceneGraph};

/// Easing curves
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ease {
    Linear,
    /// Decaying bounces settling on the target
    BounceOut,
    /// Overshoots the target by `overshoot` before settling
    BackOut { overshoot: f32 },
}

impl Ease {
    /// Eased progress for `t` in `[0, 1]`; 0 maps to 0 and 1 maps to 1
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::BounceOut => bounce_out(t),
            Ease::BackOut { overshoot } => {
                let u = t - 1.0;
                u * u * ((overshoot + 1.0) * u + overshoot) + 1.0
            }
        }
    }
}

fn bounce_out(t: f32) -> f32 {
    const N1: f32 = 7.5625;
    const D1: f32 = 2.75;

    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let t = t - 1.5 / D1;
        N1 * t * t + 0.75
    } else if t < 2.5 / D1 {
        let t = t - 2.25 / D1;
        N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / D1;
        N1 * t * t + 0.984375
    }
}

/// Transform property a tween writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TweenProperty {
    Scale,
    Position,
    Rotation,
}

impl TweenProperty {
    pub const ALL: [TweenProperty; 3] = [
        TweenProperty::Scale,
        TweenProperty::Position,
        TweenProperty::Rotation,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: Vector3<f32>,
    pub to: Vector3<f32>,
    pub start: f32,
    pub duration: f32,
    pub ease: Ease,
}

impl Tween {
    fn progress(&self, now: f32) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            ((now - self.start) / self.duration).clamp(0.0, 1.0)
        }
    }

    /// Value at `now`; exactly `to` once finished
    pub fn value_at(&self, now: f32) -> Vector3<f32> {
        let t = self.progress(now);
        if t >= 1.0 {
            self.to
        } else {
            self.from + (self.to - self.from) * self.ease.apply(t)
        }
    }

    pub fn is_finished(&self, now: f32) -> bool {
        self.progress(now) >= 1.0
    }
}

#[derive(Debug, Default)]
pub struct TweenScheduler {
    tweens: BTreeMap<(NodeId, TweenProperty), Tween>,
}

impl TweenScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels the tween on `property` of `node`; returns whether one was running
    pub fn kill_tweens_of(&mut self, node: NodeId, property: TweenProperty) -> bool {
        self.tweens.remove(&(node, property)).is_some()
    }

    /// Starts a tween, cancelling any tween already writing the same property
    pub fn start(&mut self, node: NodeId, property: TweenProperty, tween: Tween) {
        if self.tweens.insert((node, property), tween).is_some() {
            trace!("Replaced running {:?} tween on {}", property, node);
        }
    }

    pub fn get(&self, node: NodeId, property: TweenProperty) -> Option<&Tween> {
        self.tweens.get(&(node, property))
    }

    /// Number of running tweens on `node`
    pub fn active_on(&self, node: NodeId) -> usize {
        TweenProperty::ALL
            .iter()
            .filter(|property| self.tweens.contains_key(&(node, **property)))
            .count()
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    /// Writes every running tween's value at `now` and drops finished ones
    pub fn advance(&mut self, now: f32, graph: &mut SceneGraph) {
        self.tweens.retain(|(node, property), tween| {
            let Some(scene_node) = graph.get_mut(*node) else {
                return false;
            };

            let value = tween.value_at(now);
            let transform = &mut scene_node.transform;
            match property {
                TweenProperty::Scale => transform.scale = value,
                TweenProperty::Position => transform.position = value,
                TweenProperty::Rotation => transform.rotation = value,
            }

            !tween.is_finished(now)
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::picking::Aabb;
    use crate::gfx::scene::SceneNode;
    use cgmath::Zero;

    #[test]
    fn test_ease_endpoints() {
        for ease in [
            Ease::Linear,
            Ease::BounceOut,
            Ease::BackOut { overshoot: 1.8 },
        ] {
            assert!(ease.apply(0.0).abs() < 1e-6, "{ease:?}");
            assert!((ease.apply(1.0) - 1.0).abs() < 1e-6, "{ease:?}");
        }
    }

    #[test]
    fn test_back_out_overshoots() {
        let ease = Ease::BackOut { overshoot: 1.8 };
        assert!((0..100).any(|i| ease.apply(i as f32 / 100.0) > 1.0));
    }

    #[test]
    fn test_bounce_out_stays_in_range() {
        for i in 0..=100 {
            let v = Ease::BounceOut.apply(i as f32 / 100.0);
            assert!((0.0..=1.0 + 1e-6).contains(&v));
        }
    }

    #[test]
    fn test_advance_writes_and_finishes_exactly() {
        let mut graph = SceneGraph::new("root");
        let node = graph.add_node(
            graph.root(),
            SceneNode::mesh("box", Aabb::new(Vector3::zero(), Vector3::new(1.0, 1.0, 1.0))),
        );

        let mut scheduler = TweenScheduler::new();
        scheduler.start(
            node,
            TweenProperty::Scale,
            Tween {
                from: Vector3::new(1.4, 1.4, 1.4),
                to: Vector3::new(1.0, 1.0, 1.0),
                start: 0.0,
                duration: 0.3,
                ease: Ease::BounceOut,
            },
        );

        scheduler.advance(0.15, &mut graph);
        assert_eq!(scheduler.len(), 1);
        assert_ne!(graph[node].transform.scale, Vector3::new(1.0, 1.0, 1.0));

        scheduler.advance(0.5, &mut graph);
        assert!(scheduler.is_empty());
        assert_eq!(graph[node].transform.scale, Vector3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_start_replaces_running_tween() {
        let mut scheduler = TweenScheduler::new();
        let tween = Tween {
            from: Vector3::zero(),
            to: Vector3::new(1.0, 0.0, 0.0),
            start: 0.0,
            duration: 1.0,
            ease: Ease::Linear,
        };
        scheduler.start(NodeId(1), TweenProperty::Position, tween);
        scheduler.start(
            NodeId(1),
            TweenProperty::Position,
            Tween {
                start: 0.5,
                ..tween
            },
        );

        let running = scheduler.get(NodeId(1), TweenProperty::Position).unwrap();
        assert_eq!(running.start, 0.5);
        assert!(scheduler.get(NodeId(1), TweenProperty::Scale).is_none());

        assert_eq!(scheduler.active_on(NodeId(1)), 1);
        assert!(scheduler.kill_tweens_of(NodeId(1), TweenProperty::Position));
        assert!(!scheduler.kill_tweens_of(NodeId(1), TweenProperty::Position));
    }
}
