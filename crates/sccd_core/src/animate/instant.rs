//! Animator without time: every tween lands immediately.

use crate::animate::{apply_value, Animator, Tween, TweenProp, TweenValue};
use crate::dom::{Document, NodeId};

/// Direct style assignment; completions run inside `to`.
#[derive(Debug, Default, Clone, Copy)]
pub struct InstantAnimator;

impl InstantAnimator {
    pub fn new() -> Self {
        Self
    }
}

impl Animator for InstantAnimator {
    fn set(&self, doc: &mut Document, target: NodeId, prop: TweenProp, value: TweenValue) {
        apply_value(doc, target, prop, value);
    }

    fn to(&self, doc: &mut Document, tween: Tween) {
        apply_value(doc, tween.target, tween.prop, tween.to);
        if let Some(done) = tween.on_complete {
            done(doc, self);
        }
    }

    fn kill_tweens_of(&self, _target: NodeId) {}

    fn advance(&self, _doc: &mut Document, _elapsed_ms: u64) {}

    fn active_tweens(&self) -> usize {
        0
    }
}
