//! # Procedural Animation
//!
//! The [`AnimationDriver`] runs once per frame. It spins every fan group
//! around its axis and turns hover transitions into scale/position tweens
//! relative to each node's captured [`HoverBaseline`].
//!
//! Fan rotation defaults to a fixed increment per frame, so the spin speed
//! follows the display refresh rate. [`FanSpin::TimeScaled`] scales the
//! increment by the elapsed time instead.

pub mod tween;

use log::{debug, warn};

use crate::classify::{Classification, FanGroups, HoverBaseline, HoverBaselines};
use crate::config::{FanSpin, HoverTweenConfig, RoomConfig};
use crate::gfx::scene::{NodeId, SceneGraph};
use crate::interaction::HoverTransition;

pub use tween::{Ease, Tween, TweenProperty, TweenScheduler};

pub struct AnimationDriver {
    fans: FanGroups,
    baselines: HoverBaselines,
    increment: f32,
    spin: FanSpin,
    hover: HoverTweenConfig,
    tweens: TweenScheduler,
    last_tick: Option<f32>,
}

impl AnimationDriver {
    pub fn new(classification: &Classification, config: &RoomConfig) -> Self {
        Self {
            fans: classification.fan_groups.clone(),
            baselines: classification.baselines.clone(),
            increment: config.fans.increment,
            spin: config.fans.spin,
            hover: config.hover.clone(),
            tweens: TweenScheduler::new(),
            last_tick: None,
        }
    }

    pub fn tweens(&self) -> &TweenScheduler {
        &self.tweens
    }

    pub fn baseline(&self, node: NodeId) -> Option<&HoverBaseline> {
        self.baselines.get(node)
    }

    /// Rotation added to every fan for a frame at `now` seconds
    fn fan_step(&mut self, now: f32) -> f32 {
        let step = match self.spin {
            FanSpin::PerFrame => self.increment,
            FanSpin::TimeScaled { reference_hz } => {
                let dt = self
                    .last_tick
                    .map_or(1.0 / reference_hz, |last| (now - last).max(0.0));
                self.increment * dt * reference_hz
            }
        };
        self.last_tick = Some(now);
        step
    }

    /// Advances every fan by one tick
    pub fn spin_fans(&mut self, graph: &mut SceneGraph, now: f32) {
        let step = self.fan_step(now);
        for group in self.fans.iter() {
            for &member in &group.members {
                if let Some(node) = graph.get_mut(member) {
                    *group.axis.of_mut(&mut node.transform.rotation) += step;
                }
            }
        }
    }

    /// Starts the tweens requested by the interaction controller
    pub fn apply_transitions(
        &mut self,
        graph: &SceneGraph,
        transitions: &[HoverTransition],
        now: f32,
    ) {
        for transition in transitions {
            match *transition {
                HoverTransition::Enter(node) => self.play_hover(graph, node, true, now),
                HoverTransition::Exit(node) => self.play_hover(graph, node, false, now),
            }
        }
    }

    /// Cancels running tweens on `node` and tweens it towards its hovered or
    /// resting pose
    pub fn play_hover(&mut self, graph: &SceneGraph, node: NodeId, hovering: bool, now: f32) {
        let Some(baseline) = self.baselines.get(node).copied() else {
            warn!("Hover requested for {} without a baseline", node);
            return;
        };
        let Some(scene_node) = graph.get(node) else {
            return;
        };
        let live = scene_node.transform;

        for property in TweenProperty::ALL {
            self.tweens.kill_tweens_of(node, property);
        }

        let (duration, scale, position, rotation) = if hovering {
            let (axis, amount) = self.hover.position_offset;
            (
                self.hover.enter_duration,
                baseline.scale * self.hover.scale_factor,
                baseline.position + axis.offset(amount),
                self.hover
                    .rotation_offset
                    .map(|(axis, amount)| baseline.rotation + axis.offset(amount)),
            )
        } else {
            (
                self.hover.exit_duration,
                baseline.scale,
                baseline.position,
                self.hover.rotation_offset.map(|_| baseline.rotation),
            )
        };

        let tween = |from, to| Tween {
            from,
            to,
            start: now,
            duration,
            ease: self.hover.ease,
        };

        self.tweens
            .start(node, TweenProperty::Scale, tween(live.scale, scale));
        self.tweens
            .start(node, TweenProperty::Position, tween(live.position, position));
        if let Some(rotation) = rotation {
            self.tweens
                .start(node, TweenProperty::Rotation, tween(live.rotation, rotation));
        }

        debug!(
            "{} hover tween on {} ({}s)",
            if hovering { "Enter" } else { "Exit" },
            scene_node.name(),
            duration
        );
    }

    /// Writes tween values for `now`
    pub fn advance_tweens(&mut self, graph: &mut SceneGraph, now: f32) {
        self.tweens.advance(now, graph);
    }
}
