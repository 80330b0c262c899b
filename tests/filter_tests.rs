// SPDX-License-Identifier: MPL-2.0

//! Integration tests for the filter registry

use filter_camera::{EffectDescriptor, FilterType};

#[test]
fn test_registry_has_exactly_ten_entries() {
    assert_eq!(FilterType::ALL.len(), 10);
}

#[test]
fn test_every_name_resolves_to_a_descriptor() {
    for filter in FilterType::ALL {
        let resolved = FilterType::from_name(filter.name()).unwrap();
        assert_eq!(resolved, filter);
        // descriptor lookup never fails for registry members
        let _ = resolved.descriptor();
    }
}

#[test]
fn test_listing_order_matches_definition_order() {
    let names: Vec<&str> = FilterType::ALL.iter().map(|f| f.name()).collect();
    assert_eq!(names[0], "Normal", "identity entry comes first");
    assert_eq!(
        names,
        [
            "Normal",
            "Bright",
            "Dark",
            "Soft",
            "Vibrant",
            "Warm",
            "Cool",
            "Smooth",
            "Sharp",
            "BlackWhite"
        ]
    );
}

#[test]
fn test_normal_is_the_identity_entry() {
    assert!(FilterType::Normal.descriptor().is_identity());
    assert_eq!(*FilterType::Normal.descriptor(), EffectDescriptor::IDENTITY);
}

#[test]
fn test_sharp_descriptor_is_contrast_1_4_and_nothing_else() {
    let desc = FilterType::Sharp.descriptor();
    assert_eq!(desc.contrast, 1.4);
    assert_eq!(
        *desc,
        EffectDescriptor {
            contrast: 1.4,
            ..EffectDescriptor::IDENTITY
        }
    );
}

#[test]
fn test_lookup_outside_the_closed_set_fails() {
    assert!(FilterType::from_name("Pencil").is_err());
    assert!(FilterType::from_name("normal").is_err(), "names are case-sensitive");
    assert!(FilterType::from_name("").is_err());
}
