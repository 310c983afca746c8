use hyperdrive::{
    anim::{Animator, Ease, Phase, Position, Repeat, Timeline, Tween, TweenEngine, stagger},
    dom::{NodeId, Prop},
};

use crate::common::test_utils::{TestDom, assert_close, ms};

mod common;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Hook {
    Done(usize),
}

fn dom_with(n: usize) -> (TestDom, Vec<NodeId>) {
    let dom = TestDom::new(1280.0, 800.0);
    let nodes = (0..n).map(|_| dom.add(None, "div")).collect();
    (dom, nodes)
}

#[test]
fn yoyo_with_one_repeat_ends_where_it_started() {
    let (mut dom, nodes) = dom_with(1);
    let mut engine = TweenEngine::<Hook>::new();
    engine.add(
        Tween::to(nodes[0], Prop::Scale, 0.95, ms(100))
            .yoyo()
            .repeat(Repeat::Times(1))
            .on_complete(Hook::Done(0)),
        ms(0),
    );

    assert!(engine.tick(ms(100), &mut dom).is_empty());
    assert_close(dom.style(nodes[0]).scale, 0.95);
    assert!(engine.tick(ms(150), &mut dom).is_empty());
    assert_eq!(engine.tick(ms(200), &mut dom), vec![Hook::Done(0)]);
    assert_eq!(dom.style(nodes[0]).scale, 1.0);
    assert!(engine.is_empty());
}

#[test]
fn endless_tweens_never_finish() {
    let tween = Tween::<Hook>::to(NodeId(0), Prop::Scale, 1.05, ms(500))
        .yoyo()
        .repeat(Repeat::Forever);
    assert_eq!(tween.total(), None);
    assert!(matches!(tween.phase(ms(3_600_000)), Phase::Running(_)));
}

#[test]
fn delayed_tweens_wait() {
    let tween = Tween::<Hook>::to(NodeId(0), Prop::Opacity, 1.0, ms(100)).delay(ms(50));
    assert_eq!(tween.phase(ms(49)), Phase::Waiting);
    assert_eq!(tween.phase(ms(100)), Phase::Running(Ease::Power2Out.apply(0.5)));
    assert_eq!(tween.phase(ms(150)), Phase::Done(1.0));
    assert_eq!(tween.total(), Some(ms(150)));
}

#[test]
fn hooks_are_returned_once() {
    let (mut dom, nodes) = dom_with(2);
    let mut engine = TweenEngine::new();
    engine.add(
        Tween::to(nodes[0], Prop::Opacity, 0.0, ms(100)).on_complete(Hook::Done(0)),
        ms(0),
    );
    engine.add(
        Tween::to(nodes[1], Prop::Opacity, 0.0, ms(300)).on_complete(Hook::Done(1)),
        ms(0),
    );
    assert_eq!(engine.tick(ms(120), &mut dom), vec![Hook::Done(0)]);
    assert!(engine.tick(ms(130), &mut dom).is_empty());
    assert_eq!(engine.tick(ms(1000), &mut dom), vec![Hook::Done(1)]);
    assert!(engine.tick(ms(2000), &mut dom).is_empty());
}

#[test]
fn newer_tween_takes_over_from_the_current_value() {
    let (mut dom, nodes) = dom_with(1);
    let node = nodes[0];
    let mut engine = TweenEngine::<Hook>::new();
    engine.add(Tween::to(node, Prop::X, 100.0, ms(100)).ease(Ease::Linear), ms(0));
    engine.tick(ms(50), &mut dom);
    assert_close(dom.style(node).x, 50.0);

    engine.add(Tween::to(node, Prop::X, 0.0, ms(100)).ease(Ease::Linear), ms(50));
    assert_eq!(engine.len(), 1);
    engine.tick(ms(100), &mut dom);
    assert_close(dom.style(node).x, 25.0);
    engine.tick(ms(150), &mut dom);
    assert_eq!(dom.style(node).x, 0.0);
}

#[test]
fn set_cancels_and_jumps() {
    let (mut dom, nodes) = dom_with(1);
    let node = nodes[0];
    let mut engine = TweenEngine::<Hook>::new();
    engine.add(Tween::to(node, Prop::Y, 100.0, ms(100)), ms(0));
    engine.set(&mut dom, node, Prop::Y, 30.0);
    assert!(!engine.is_animating(node, Prop::Y));
    assert_eq!(engine.value(node, Prop::Y), 30.0);
    engine.tick(ms(100), &mut dom);
    assert_eq!(dom.style(node).y, 30.0);
}

#[test]
fn kill_freezes_a_node() {
    let (mut dom, nodes) = dom_with(1);
    let node = nodes[0];
    let mut engine = TweenEngine::<Hook>::new();
    engine.add(Tween::to(node, Prop::Scale, 2.0, ms(100)).ease(Ease::Linear), ms(0));
    engine.add(Tween::to(node, Prop::Opacity, 0.0, ms(100)), ms(0));
    engine.tick(ms(50), &mut dom);
    engine.kill(node);
    assert!(engine.is_empty());
    engine.tick(ms(100), &mut dom);
    assert_close(dom.style(node).scale, 1.5);
    assert_eq!(engine.value(NodeId(99), Prop::Scale), 1.0);
}

#[test]
fn timeline_positions_overlap_the_previous_end() {
    let tween = |d| Tween::<Hook>::to(NodeId(0), Prop::Y, 0.0, ms(d));
    let timeline = Timeline::new()
        .add(tween(1500), Position::End)
        .add(tween(1000), Position::Overlap(ms(800)))
        .add_all([tween(800), tween(800)], Position::Overlap(ms(500)))
        .add(tween(100), Position::At(ms(50)));
    assert_eq!(timeline.duration(), ms(2000));

    let delays: Vec<_> = timeline.into_tweens().iter().map(|t| t.delay).collect();
    assert_eq!(delays, vec![ms(0), ms(700), ms(1200), ms(1200), ms(50)]);
}

#[test]
fn overlap_never_starts_before_zero() {
    let timeline = Timeline::<Hook>::new().add(
        Tween::to(NodeId(0), Prop::Y, 0.0, ms(100)),
        Position::Overlap(ms(500)),
    );
    assert_eq!(timeline.into_tweens()[0].delay, ms(0));
}

#[test]
fn stagger_spaces_out_starts() {
    let nodes = [NodeId(0), NodeId(1), NodeId(2)];
    let tweens = stagger(&nodes, ms(200), |node| {
        Tween::<Hook>::to(node, Prop::Opacity, 1.0, ms(1000)).delay(ms(10))
    });
    let delays: Vec<_> = tweens.iter().map(|t| t.delay).collect();
    assert_eq!(delays, vec![ms(10), ms(210), ms(410)]);
    assert_eq!(tweens[2].node, NodeId(2));
}

#[test]
fn back_out_overshoots_on_the_way() {
    let (mut dom, nodes) = dom_with(1);
    let node = nodes[0];
    let mut engine = TweenEngine::<Hook>::new();
    engine.add(
        Tween::to(node, Prop::Scale, 1.0, ms(800)).from(0.8).ease(Ease::BACK_OUT),
        ms(0),
    );
    let peak = (1..=50)
        .map(|i| {
            engine.tick(ms(i * 16), &mut dom);
            dom.style(node).scale
        })
        .fold(f64::MIN, f64::max);
    assert!(peak > 1.0);
    engine.tick(ms(800), &mut dom);
    assert_eq!(dom.style(node).scale, 1.0);
}
