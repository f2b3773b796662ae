//! Timed animator driven by an explicit clock.

use crate::animate::{apply_value, read_value, Animator, Completion, Ease, Tween, TweenProp, TweenValue};
use crate::dom::{Document, NodeId};
use log::trace;
use std::cell::RefCell;

struct Running {
    target: NodeId,
    prop: TweenProp,
    from: Option<TweenValue>,
    to: TweenValue,
    duration_ms: u64,
    delay_ms: u64,
    elapsed_ms: u64,
    ease: Ease,
    on_complete: Option<Completion>,
}

/// Eased, interruptible tweens advanced by `Animator::advance`.
#[derive(Default)]
pub struct TweenAnimator {
    running: RefCell<Vec<Running>>,
}

impl std::fmt::Debug for TweenAnimator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TweenAnimator")
            .field("running", &self.running.borrow().len())
            .finish()
    }
}

impl TweenAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a tween on `target`/`prop` is still running.
    pub fn is_animating(&self, target: NodeId, prop: TweenProp) -> bool {
        self.running
            .borrow()
            .iter()
            .any(|tween| tween.target == target && tween.prop == prop)
    }

    fn cancel(&self, target: NodeId, prop: TweenProp) {
        self.running
            .borrow_mut()
            .retain(|tween| !(tween.target == target && tween.prop == prop));
    }
}

impl Animator for TweenAnimator {
    fn set(&self, doc: &mut Document, target: NodeId, prop: TweenProp, value: TweenValue) {
        self.cancel(target, prop);
        apply_value(doc, target, prop, value);
    }

    fn to(&self, doc: &mut Document, tween: Tween) {
        self.cancel(tween.target, tween.prop);
        if tween.duration_ms == 0 && tween.delay_ms == 0 {
            apply_value(doc, tween.target, tween.prop, tween.to);
            if let Some(done) = tween.on_complete {
                done(doc, self);
            }
            return;
        }
        trace!(
            "event=tween_start module=animate prop={:?} duration_ms={} delay_ms={}",
            tween.prop,
            tween.duration_ms,
            tween.delay_ms
        );
        self.running.borrow_mut().push(Running {
            target: tween.target,
            prop: tween.prop,
            from: None,
            to: tween.to,
            duration_ms: tween.duration_ms,
            delay_ms: tween.delay_ms,
            elapsed_ms: 0,
            ease: tween.ease,
            on_complete: tween.on_complete,
        });
    }

    fn kill_tweens_of(&self, target: NodeId) {
        self.running
            .borrow_mut()
            .retain(|tween| tween.target != target);
    }

    fn advance(&self, doc: &mut Document, elapsed_ms: u64) {
        let mut finished = Vec::new();
        {
            let mut running = self.running.borrow_mut();
            for tween in running.iter_mut() {
                tween.elapsed_ms += elapsed_ms;
                if tween.elapsed_ms < tween.delay_ms {
                    continue;
                }
                let (target, prop, to) = (tween.target, tween.prop, tween.to);
                let from = *tween.from.get_or_insert_with(|| {
                    read_value(doc, target, prop).unwrap_or(match to {
                        TweenValue::Auto => TweenValue::Px(0.0),
                        other => other,
                    })
                });
                let active_ms = tween.elapsed_ms - tween.delay_ms;
                let progress = if tween.duration_ms == 0 {
                    1.0
                } else {
                    (active_ms as f64 / tween.duration_ms as f64).min(1.0)
                };
                let value = if progress >= 1.0 {
                    tween.to
                } else {
                    from.lerp(tween.to, tween.ease.apply(progress))
                };
                apply_value(doc, target, prop, value);
            }

            let mut index = 0;
            while index < running.len() {
                let tween = &running[index];
                if tween.elapsed_ms >= tween.delay_ms + tween.duration_ms {
                    finished.push(running.remove(index));
                } else {
                    index += 1;
                }
            }
        }

        for tween in finished {
            if let Some(done) = tween.on_complete {
                done(doc, self);
            }
        }
    }

    fn active_tweens(&self) -> usize {
        self.running.borrow().len()
    }
}

#[cfg(test)]
mod tests {
    use super::TweenAnimator;
    use crate::animate::{Animator, Ease, Tween, TweenProp, TweenValue};
    use crate::dom::{Document, Element, Fragment, NodeId};
    use std::cell::Cell;
    use std::rc::Rc;

    fn doc_with_node() -> (Document, NodeId) {
        let doc = Document::from_fragment(
            Fragment::new().with(Element::new("div").id("x").style("height", "0px")),
        );
        let node = doc.get_element_by_id("x").expect("node");
        (doc, node)
    }

    #[test]
    fn interpolates_and_completes_on_time() {
        let (mut doc, node) = doc_with_node();
        let animator = TweenAnimator::new();
        animator.to(
            &mut doc,
            Tween::new(node, TweenProp::Height, TweenValue::Px(100.0), 400).ease(Ease::Linear),
        );

        animator.advance(&mut doc, 200);
        assert_eq!(doc.style(node, "height"), Some("50px"));
        assert_eq!(animator.active_tweens(), 1);

        animator.advance(&mut doc, 200);
        assert_eq!(doc.style(node, "height"), Some("100px"));
        assert!(animator.is_idle());
    }

    #[test]
    fn auto_target_switches_at_completion() {
        let (mut doc, node) = doc_with_node();
        let animator = TweenAnimator::new();
        animator.to(
            &mut doc,
            Tween::new(node, TweenProp::Height, TweenValue::Auto, 500),
        );
        animator.advance(&mut doc, 250);
        assert_eq!(doc.style(node, "height"), Some("0px"));
        animator.advance(&mut doc, 250);
        assert_eq!(doc.style(node, "height"), Some("auto"));
    }

    #[test]
    fn overwrite_drops_previous_completion() {
        let (mut doc, node) = doc_with_node();
        let animator = TweenAnimator::new();
        let first_done = Rc::new(Cell::new(false));
        let flag = Rc::clone(&first_done);
        animator.to(
            &mut doc,
            Tween::new(node, TweenProp::Height, TweenValue::Px(0.0), 400)
                .on_complete(move |_, _| flag.set(true)),
        );
        animator.to(
            &mut doc,
            Tween::new(node, TweenProp::Height, TweenValue::Auto, 500),
        );
        animator.advance(&mut doc, 1_000);
        assert!(!first_done.get());
        assert_eq!(doc.style(node, "height"), Some("auto"));
    }

    #[test]
    fn delay_and_kill() {
        let (mut doc, node) = doc_with_node();
        let animator = TweenAnimator::new();
        animator.to(
            &mut doc,
            Tween::new(node, TweenProp::Opacity, TweenValue::Number(1.0), 100).delay(100),
        );
        animator.advance(&mut doc, 50);
        assert_eq!(doc.style(node, "opacity"), None);
        animator.kill_tweens_of(node);
        animator.advance(&mut doc, 500);
        assert_eq!(doc.style(node, "opacity"), None);
        assert!(animator.is_idle());
    }

    #[test]
    fn completion_can_chain_another_tween() {
        let (mut doc, node) = doc_with_node();
        let animator = TweenAnimator::new();
        animator.to(
            &mut doc,
            Tween::new(node, TweenProp::Opacity, TweenValue::Number(0.0), 100).on_complete(
                move |doc, animator| {
                    animator.to(
                        doc,
                        Tween::new(node, TweenProp::Opacity, TweenValue::Number(1.0), 100),
                    );
                },
            ),
        );
        animator.advance(&mut doc, 100);
        assert_eq!(animator.active_tweens(), 1);
        animator.advance(&mut doc, 100);
        assert_eq!(doc.style(node, "opacity"), Some("1"));
    }
}
