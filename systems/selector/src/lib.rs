#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that draws the playthrough's target letter from a catalog.

use gift_hunt_core::{AssetRef, PlaceTag, TargetDefinition};
use rand::Rng;
use thiserror::Error;

/// Errors raised while drawing a target.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    /// The catalog contained no letters to choose from.
    #[error("target catalog is empty; configure at least one letter")]
    EmptyCatalog,
}

/// Letters shipped with the room scene and the place each one asks for.
#[must_use]
pub fn default_catalog() -> Vec<TargetDefinition> {
    [
        ("images/michelle-wants-a-teddy-bear.png", PlaceTag::Sofa),
        ("images/kate-is-after-santa.png", PlaceTag::Tree),
        ("images/yuli-the-raw-onion.png", PlaceTag::Window),
        ("images/daniel-wants-summer-santa.png", PlaceTag::Ground),
        ("images/charlie-never-cries.png", PlaceTag::Sofa),
    ]
    .into_iter()
    .map(|(asset, place)| TargetDefinition::new(AssetRef::new(asset), place))
    .collect()
}

/// Draws one target uniformly at random from the catalog.
pub fn select<R: Rng>(
    catalog: &[TargetDefinition],
    rng: &mut R,
) -> Result<TargetDefinition, SelectionError> {
    if catalog.is_empty() {
        return Err(SelectionError::EmptyCatalog);
    }
    let index = rng.gen_range(0..catalog.len());
    let target = catalog[index].clone();
    log::info!(
        "selected letter {} of {}: {}",
        index + 1,
        catalog.len(),
        target.asset().as_str()
    );
    Ok(target)
}
