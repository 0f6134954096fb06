use glam::Vec2;
use pretty_assertions::assert_eq;
use redline::{
    systems::{
        actor_pose,
        draw::{fit_scale, lerp_color, rgba, sample_gradient, text_width, with_alpha},
        Actor, GameStage, Palette, Viewport,
    },
    variant::Variant,
};
use sdl2::pixels::Color;
use speculoos::prelude::*;
use strum::IntoEnumIterator;

fn actor() -> Actor {
    let mut actor = Actor::spawn(&Variant::FunFly.config(), &Viewport::new(480, 800));
    actor.y = 250.0;
    actor.rotation = -0.3;
    actor
}

#[test]
fn colors_blend_linearly() {
    assert_eq!(lerp_color(Color::BLACK, Color::WHITE, 0.5), Color::RGBA(128, 128, 128, 255));
    assert_eq!(lerp_color(Color::BLACK, Color::WHITE, -1.0), Color::BLACK);
    assert_eq!(lerp_color(Color::BLACK, Color::WHITE, 2.0), Color::WHITE);
}

#[test]
fn alpha_is_scaled_to_a_byte() {
    assert_eq!(rgba(10, 20, 30, 0.5).a, 128);
    assert_eq!(rgba(10, 20, 30, 3.0).a, 255);
    assert_eq!(with_alpha(Color::RGBA(1, 2, 3, 128), 0.5).a, 64);
}

#[test]
fn gradients_interpolate_between_stops() {
    let stops = [(0.0, Color::BLACK), (0.5, Color::RGB(200, 0, 0)), (1.0, Color::WHITE)];

    assert_eq!(sample_gradient(&stops, 0.0), Color::BLACK);
    assert_eq!(sample_gradient(&stops, 0.25), Color::RGBA(100, 0, 0, 255));
    assert_eq!(sample_gradient(&stops, 0.5), Color::RGB(200, 0, 0));
    assert_eq!(sample_gradient(&stops, 1.5), Color::WHITE);
    assert_eq!(sample_gradient(&[], 0.5), Color::BLACK);
}

#[test]
fn text_shrinks_to_fit() {
    assert_eq!(text_width("SCORE", 2.0), 80.0);
    assert_eq!(fit_scale("ABCD", 100.0, 6.0), 3.0);
    assert_eq!(fit_scale("AB", 1_000.0, 4.0), 4.0);
    assert_eq!(fit_scale("A VERY LONG LINE OF TEXT", 10.0, 4.0), 1.0);
    assert_eq!(fit_scale("", 10.0, 2.0), 2.0);
}

#[test]
fn idle_actor_hovers_around_the_center() {
    let viewport = Viewport::new(480, 800);

    for millis in [0.0, 471.0, 942.0, 2_000.0] {
        let pose = actor_pose(Variant::DkFly, GameStage::Start, &actor(), &viewport, millis, true);
        assert_that(&(pose.position.y - 400.0).abs()).is_less_than_or_equal_to(15.0);
        assert_eq!(pose.position.x, 100.0);
        assert_eq!(pose.rotation, 0.0);
        assert_that(&pose.thrusting).is_false();
    }

    let pose = actor_pose(Variant::DkFly, GameStage::Countdown, &actor(), &viewport, 0.0, false);
    assert_eq!(pose.position, Vec2::new(100.0, 400.0));
}

#[test]
fn playing_actor_is_drawn_where_it_is() {
    let viewport = Viewport::new(480, 800);

    let pose = actor_pose(Variant::FunFly, GameStage::Playing, &actor(), &viewport, 1_234.0, true);

    assert_eq!(pose.position, Vec2::new(100.0, 250.0));
    assert_eq!(pose.rotation, -0.3);
    assert_that(&pose.thrusting).is_true();
}

#[test]
fn crashed_pod_slumps_nose_down() {
    let viewport = Viewport::new(480, 800);

    let funfly = actor_pose(Variant::FunFly, GameStage::GameOver, &actor(), &viewport, 0.0, true);
    let dk = actor_pose(Variant::DkFly, GameStage::GameOver, &actor(), &viewport, 0.0, true);

    assert_eq!(funfly.rotation, 0.5);
    assert_that(&funfly.thrusting).is_false();
    assert_eq!(dk.rotation, -0.3);
    assert_eq!(dk.position, Vec2::new(100.0, 250.0));
}

#[test]
fn every_variant_has_a_visible_palette() {
    for variant in Variant::iter() {
        let palette = Palette::for_variant(variant);
        assert_that(&palette.countdown_veil).is_greater_than(0.0);
        assert_that(&palette.countdown_veil).is_less_than(1.0);
        assert_that(&(palette.text != palette.backdrop)).is_true();
    }

    assert_eq!(Palette::for_variant(Variant::FunFly).accent, Color::RGB(0xFF, 0x4C, 0x29));
}
