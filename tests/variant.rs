use std::str::FromStr;

use pretty_assertions::assert_eq;
use redline::{
    asset::Asset,
    variant::{ForceModel, Variant},
};
use speculoos::prelude::*;
use strum::IntoEnumIterator;

#[test]
fn ids_round_trip_through_parsing() {
    for variant in Variant::iter() {
        assert_eq!(Variant::from_str(variant.id()), Ok(variant));
    }
    assert_eq!(Variant::from_str("FunFly"), Ok(Variant::FunFly));
    assert_that(&Variant::from_str("snake").is_err()).is_true();
}

#[test]
fn registry_lists_three_games() {
    let ids: Vec<&str> = Variant::iter().map(Variant::id).collect();

    assert_eq!(ids, vec!["dkfly", "funfly", "amitabfly"]);
}

#[test]
fn only_funfly_uses_thrust_and_particles() {
    for variant in Variant::iter() {
        let config = variant.config();
        let thrust = matches!(config.force, ForceModel::Thrust { .. });

        assert_eq!(thrust, variant == Variant::FunFly);
        assert_eq!(config.has_particles(), variant == Variant::FunFly);
        assert_eq!(config.variant, variant);
    }
}

#[test]
fn funfly_tuning() {
    let config = Variant::FunFly.config();

    assert_eq!(config.gravity, 0.6);
    assert_eq!(config.force, ForceModel::Thrust { thrust: -1.2 });
    assert_eq!(config.max_speed, 10.0);
    assert_eq!(config.scroll_speed, 5.0);
    assert_eq!(config.spawn_interval, 90);
    assert_eq!(config.gap_height, 220.0);
    assert_eq!(config.hitbox_size, 30.0);
    assert_eq!(config.hitbox_padding, 8.0);
}

#[test]
fn impulse_tuning() {
    let dk = Variant::DkFly.config();
    let amitab = Variant::AmitabFly.config();

    assert_eq!(dk.force, ForceModel::Impulse { jump: 7.0 });
    assert_eq!((dk.gravity, dk.scroll_speed, dk.spawn_interval), (0.3, 3.5, 110));
    assert_eq!(amitab.force, ForceModel::Impulse { jump: 6.0 });
    assert_eq!(
        (amitab.gravity, amitab.scroll_speed, amitab.spawn_interval),
        (0.25, 3.0, 120)
    );
    assert_eq!(amitab.gap_height, 200.0);
}

#[test]
fn image_assets_are_only_requested_by_image_games() {
    let funfly = Variant::FunFly.config();
    let dk = Variant::DkFly.config();

    assert_that(&funfly.assets.iter().any(|asset| asset.is_image())).is_false();
    assert_that(&dk.assets.contains(&Asset::ActorImage)).is_true();
    assert_that(&dk.assets.contains(&Asset::Music)).is_true();
}

#[test]
fn menu_copy_is_filled_in() {
    for variant in Variant::iter() {
        let copy = variant.config().copy;
        for text in [copy.title, copy.tagline, copy.begin, copy.retry, copy.game_over, copy.high_score_label] {
            assert_that(&text.is_empty()).is_false();
        }
    }
}
