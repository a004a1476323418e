//! Snake trail geometry
//!
//! The snake is an ordered chain of straight segments, tail first. Every
//! advancing tick appends exactly one segment covering the path the head
//! travelled during that tick, so `current_segment` is always this tick's
//! head movement. The tail retracts whenever the trail is longer than the
//! target length.

use std::collections::VecDeque;

use glam::Vec2;

use super::motion::Motion;
use super::segment::{Segment, intersect};

/// Distance within which a trail segment counts as joined to the head
const JOIN_TOLERANCE: f32 = 1e-3;

/// The player's snake
#[derive(Debug, Clone)]
pub struct Snake {
    /// Trail, tail first, head last (never empty)
    segments: VecDeque<Segment>,
    /// Head point (end of the last segment)
    position: Vec2,
    /// Unit heading
    heading: Vec2,
    /// Length the trail is allowed to reach
    target_length: f32,
    /// Body radius (also the nose probe length)
    radius: f32,
    /// Radius of the circle followed while turning
    turn_radius: f32,
}

impl Snake {
    pub fn new(position: Vec2, heading: Vec2, length: f32, radius: f32, turn_radius: f32) -> Self {
        let mut snake = Self {
            segments: VecDeque::new(),
            position,
            heading,
            target_length: 0.0,
            radius,
            turn_radius: turn_radius.max(f32::EPSILON),
        };
        snake.reinitialize(position, heading, length, radius);
        snake
    }

    /// Reset to a fresh snake: the trail collapses to a point at `position`
    /// and grows until it reaches `length`.
    pub fn reinitialize(&mut self, position: Vec2, heading: Vec2, length: f32, radius: f32) {
        self.segments.clear();
        self.segments.push_back(Segment::point(position));
        self.position = position;
        self.heading = heading.try_normalize().unwrap_or(Vec2::NEG_Y);
        self.target_length = length.max(0.0);
        self.radius = radius;
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn heading(&self) -> Vec2 {
        self.heading
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn target_length(&self) -> f32 {
        self.target_length
    }

    /// Most recently created head segment
    pub fn current_segment(&self) -> &Segment {
        // The trail always holds at least one segment
        &self.segments[self.segments.len() - 1]
    }

    /// Trail segments, tail first
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }

    /// Current rendered length of the trail
    pub fn length(&self) -> f32 {
        self.segments.iter().map(Segment::length).sum()
    }

    /// Short probe from the head along the heading
    pub fn nose(&self) -> Segment {
        Segment::new(self.position, self.position + self.heading * self.radius)
    }

    /// Extend the head by `grow` and retract the tail by `shrink`
    pub fn advance(&mut self, grow: f32, shrink: f32, motion: Motion) {
        let grow = grow.max(0.0);
        self.target_length = (self.target_length + grow - shrink.max(0.0)).max(0.0);

        if grow > 0.0 {
            let turn = motion.turn_sign() * grow / self.turn_radius;
            // Chord of the turning arc lies along the mid-turn heading
            let chord = Vec2::from_angle(turn * 0.5).rotate(self.heading);
            let end = self.position + chord * grow;

            self.segments.push_back(Segment::new(self.position, end));
            self.position = end;
            self.heading = Vec2::from_angle(turn).rotate(self.heading).normalize_or(chord);
        }

        self.retract_tail();
    }

    /// Drop trail from the tail until it fits the target length
    fn retract_tail(&mut self) {
        let mut excess = self.length() - self.target_length;

        while excess > 0.0 {
            let count = self.segments.len();
            let Some(tail) = self.segments.front_mut() else {
                break;
            };
            let len = tail.length();
            if len <= excess && count > 1 {
                self.segments.pop_front();
                excess -= len;
            } else {
                // Shorten the tail segment in place (may collapse it to a point)
                let cut = excess.min(len);
                tail.start += tail.direction() * cut;
                if len - cut <= f32::EPSILON {
                    tail.start = tail.end;
                }
                break;
            }
        }
    }

    /// Does the snake intersect any of the given segments?
    ///
    /// Non-strict compares the trail only. Strict also includes the nose
    /// probe, so an obstacle is struck as the head approaches it.
    pub fn intersects_segments(&self, others: &[Segment], strict: bool) -> bool {
        if others.is_empty() {
            return false;
        }
        if strict && self.nose().intersects_any(others) {
            return true;
        }
        self.segments.iter().any(|s| s.intersects_any(others))
    }

    /// Head segment crosses some older part of the trail
    pub fn crosses_itself(&self) -> bool {
        let n = self.segments.len();
        if n < 3 {
            return false;
        }
        let head = self.current_segment();
        if head.is_degenerate() {
            return false;
        }
        // Skip the head itself and the segment it is joined to. Anything
        // else touching the head's start point is a zero-length tick
        // between them, not a crossing.
        self.segments
            .iter()
            .take(n - 2)
            .filter(|s| !s.is_degenerate() && s.distance_to_point(head.start) > JOIN_TOLERANCE)
            .any(|s| intersect(head, s))
    }
}
